//! Configuration tests
//!
//! Round-trips guard the hand-written TOML in `to_toml()`: when a field is
//! added to a section, these fail until the serializer knows about it.

use super::*;

fn no_env(_: &str) -> Option<String> {
    None
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let resolved = Config::resolve(parsed.unwrap(), no_env);
    assert_eq!(resolved.omdb.api_url, config.omdb.api_url);
    assert_eq!(resolved.omdb.api_key, None);
    assert_eq!(resolved.display.settle_delay_ms, 700);
    assert_eq!(resolved.display.skeleton_count, 6);
    assert_eq!(resolved.logging.level, "info");
}

#[test]
fn test_config_roundtrip_custom_values() {
    let mut config = Config::default();
    config.omdb.api_key = Some("abc123".to_string());
    config.omdb.timeout_secs = 3;
    config.display.skeleton_count = 9;
    config.display.settle_delay_ms = 250;
    config.display.card_width = 30;
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    let parsed: FileConfig = toml::from_str(&config.to_toml()).unwrap();
    let resolved = Config::resolve(parsed, no_env);

    assert_eq!(resolved.omdb.api_key.as_deref(), Some("abc123"));
    assert_eq!(resolved.omdb.timeout_secs, 3);
    assert_eq!(resolved.display.skeleton_count, 9);
    assert_eq!(resolved.display.settle_delay_ms, 250);
    assert_eq!(resolved.display.card_width, 30);
    assert!(resolved.logging.file_enabled);
    assert_eq!(resolved.logging.file_rotation, LogRotation::Hourly);
}

#[test]
fn test_file_rewrite_keeps_env_key_off_disk() {
    let file: FileConfig = toml::from_str(
        r#"
[omdb]
api_url = "http://file.example/"
"#,
    )
    .unwrap();

    let rewritten = Config::file_values(file).to_toml();
    assert!(!rewritten.contains("api_key = \""));
    assert!(rewritten.contains("# api_key"));
    assert!(rewritten.contains("http://file.example/"));

    let reparsed: FileConfig = toml::from_str(&rewritten).unwrap();
    assert_eq!(Config::file_values(reparsed).omdb.api_key, None);
}

#[test]
fn test_file_rewrite_preserves_file_key() {
    let file: FileConfig = toml::from_str(
        r#"
[omdb]
api_key = "from-file"
"#,
    )
    .unwrap();

    let rewritten = Config::file_values(file).to_toml();
    assert!(rewritten.contains("api_key = \"from-file\""));
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_env_overrides_file() {
    let file: FileConfig = toml::from_str(
        r#"
[omdb]
api_url = "http://file.example/"
api_key = "from-file"
"#,
    )
    .unwrap();

    let resolved = Config::resolve(file, |key| match key {
        "OMDB_API_KEY" => Some("from-env".to_string()),
        "REELSEARCH_API_URL" => Some("http://env.example/".to_string()),
        "REELSEARCH_NO_TUI" => Some("1".to_string()),
        _ => None,
    });

    assert_eq!(resolved.omdb.api_key.as_deref(), Some("from-env"));
    assert_eq!(resolved.omdb.api_url, "http://env.example/");
    assert!(!resolved.enable_tui);
}

#[test]
fn test_empty_file_uses_defaults() {
    let resolved = Config::resolve(FileConfig::default(), no_env);
    assert_eq!(resolved.omdb.api_url, DEFAULT_API_URL);
    assert!(resolved.enable_tui);
    assert_eq!(resolved.display.poster_min_rows, 4);
}

#[test]
fn test_blank_api_key_is_unset() {
    let resolved = Config::resolve(FileConfig::default(), |key| {
        (key == "OMDB_API_KEY").then(|| "   ".to_string())
    });
    assert_eq!(resolved.omdb.api_key, None);
}

#[test]
fn test_poster_row_range_never_inverted() {
    let file: FileConfig = toml::from_str(
        r#"
[display]
poster_min_rows = 10
poster_max_rows = 3
"#,
    )
    .unwrap();
    let resolved = Config::resolve(file, no_env);
    assert_eq!(resolved.display.poster_min_rows, 10);
    assert_eq!(resolved.display.poster_max_rows, 10);
}

#[test]
fn test_rotation_parses_any_case() {
    assert_eq!("NEVER".parse::<LogRotation>(), Ok(LogRotation::Never));
    assert_eq!(" hourly ".parse::<LogRotation>(), Ok(LogRotation::Hourly));
    for rotation in LogRotation::ALL {
        assert_eq!(rotation.as_str().parse::<LogRotation>(), Ok(rotation));
    }
}

#[test]
fn test_unknown_rotation_is_rejected() {
    let err = "weekly".parse::<LogRotation>().unwrap_err();
    assert!(err.to_string().contains("weekly"));

    let parsed: Result<FileConfig, _> = toml::from_str(
        r#"
[logging]
file_rotation = "weekly"
"#,
    );
    assert!(parsed.is_err());
}

#[test]
fn test_logging_section_from_file() {
    let file: FileConfig = toml::from_str(
        r#"
[logging]
level = "debug"
file_enabled = true
file_dir = "/tmp/reelsearch-logs"
file_rotation = "Never"
"#,
    )
    .unwrap();
    let logging = Config::resolve(file, no_env).logging;
    assert_eq!(logging.level, "debug");
    assert!(logging.file_enabled);
    assert_eq!(logging.file_dir, std::path::PathBuf::from("/tmp/reelsearch-logs"));
    assert_eq!(logging.file_rotation, LogRotation::Never);
    assert_eq!(logging.file_prefix, "reelsearch");
}
