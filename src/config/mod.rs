use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub mod loader;
pub mod validator;

pub use loader::{load, load_from_sources};
pub use validator::validate_config;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_PAGE_SIZE: usize = 50;
pub const DEFAULT_OFFSET_PARAM: &str = "offset";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_FILE: &str = "imoveis-cli.log";

/// Connection settings for the remote listings API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub page_size: usize,
    pub offset_param: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    /// Destination for log records while the terminal UI owns the screen.
    pub log_file: PathBuf,
}

impl Config {
    pub fn builtin() -> Self {
        Config {
            api: ApiConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                page_size: DEFAULT_PAGE_SIZE,
                offset_param: DEFAULT_OFFSET_PARAM.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
                user_agent: format!("imoveis-cli/{}", env!("CARGO_PKG_VERSION")),
            },
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }

    /// Apply command-line overrides, which take precedence over every other source.
    pub fn with_overrides(mut self, base_url: Option<&str>, page_size: Option<usize>) -> Self {
        if let Some(url) = base_url {
            self.api.base_url = url.to_string();
        }
        if let Some(size) = page_size {
            self.api.page_size = size;
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_matches_reference_client() {
        let config = Config::builtin();

        assert_eq!(config.api.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.api.page_size, 50);
        assert_eq!(config.api.offset_param, "offset");
        assert!(config.api.user_agent.starts_with("imoveis-cli/"));
    }

    #[test]
    fn overrides_replace_only_given_values() {
        let config = Config::builtin().with_overrides(None, Some(20));

        assert_eq!(config.api.page_size, 20);
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    }
}
