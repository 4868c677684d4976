//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Serialize config to TOML string
    ///
    /// An unset API key is written as a comment so the file still parses
    /// and the env var stays the recommended place for the credential.
    pub fn to_toml(&self) -> String {
        let api_key_line = match &self.omdb.api_key {
            Some(key) => format!("api_key = \"{}\"", key),
            None => "# api_key = \"your-key\"  # or set OMDB_API_KEY".to_string(),
        };

        format!(
            r#"# reelsearch configuration

# OMDb search endpoint (REELSEARCH_API_URL env var overrides)
[omdb]
api_url = "{api_url}"
{api_key_line}
timeout_secs = {timeout}

# Results grid
[display]
skeleton_count = {skeletons}      # Placeholder cards while searching
settle_delay_ms = {settle}     # Pause after a fetch before cards swap in
card_width = {card_width}
poster_min_rows = {min_rows}
poster_max_rows = {max_rows}
poster_timeout_secs = {poster_timeout}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (in addition to TUI buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            api_url = self.omdb.api_url,
            api_key_line = api_key_line,
            timeout = self.omdb.timeout_secs,
            skeletons = self.display.skeleton_count,
            settle = self.display.settle_delay_ms,
            card_width = self.display.card_width,
            min_rows = self.display.poster_min_rows,
            max_rows = self.display.poster_max_rows,
            poster_timeout = self.display.poster_timeout_secs,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
