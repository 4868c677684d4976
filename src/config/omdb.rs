//! OMDb endpoint configuration

use serde::Deserialize;

/// Public OMDb endpoint
pub const DEFAULT_API_URL: &str = "https://www.omdbapi.com/";

/// OMDb endpoint and credentials
#[derive(Debug, Clone)]
pub struct OmdbConfig {
    /// Search endpoint URL
    pub api_url: String,
    /// API key (OMDB_API_KEY env var takes precedence over the file)
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            timeout_secs: 10,
        }
    }
}

/// OMDb settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileOmdb {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl OmdbConfig {
    /// Create from file config with env overrides and defaults
    pub fn from_file(
        file: Option<FileOmdb>,
        env_api_url: Option<String>,
        env_api_key: Option<String>,
    ) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        // Blank keys count as unset
        let api_key = env_api_key
            .or(file.api_key)
            .filter(|k| !k.trim().is_empty());

        Self {
            api_url: env_api_url.or(file.api_url).unwrap_or(defaults.api_url),
            api_key,
            timeout_secs: file.timeout_secs.unwrap_or(defaults.timeout_secs),
        }
    }
}
