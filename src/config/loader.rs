use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::error::{AppError, Context, Result};

use super::Config;

pub const ENV_API_URL: &str = "IMOVEIS_API_URL";
pub const ENV_PAGE_SIZE: &str = "IMOVEIS_PAGE_SIZE";

/// Builtin defaults, then the optional JSON file, then environment variables.
pub fn load(path: Option<&Path>) -> Result<Config> {
    load_from_sources(path, |key| std::env::var(key).ok())
}

/// Same as [`load`] with an injectable environment lookup.
pub fn load_from_sources<F>(path: Option<&Path>, env: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = Config::builtin();

    if let Some(path) = path {
        let (raw, source) = read_config_file(path)?;
        debug!("Loaded configuration from {}", source.display());
        raw.apply(&mut config);
    }

    apply_env(&mut config, env)?;
    Ok(config)
}

fn apply_env<F>(config: &mut Config, env: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = env(ENV_API_URL).filter(|value| !value.trim().is_empty()) {
        config.api.base_url = url.trim().to_string();
    }

    if let Some(size) = env(ENV_PAGE_SIZE).filter(|value| !value.trim().is_empty()) {
        config.api.page_size = size.trim().parse::<usize>().map_err(|_| {
            AppError::message(format!("{ENV_PAGE_SIZE} must be a positive integer, got `{size}`"))
        })?;
    }

    Ok(())
}

/// Try the path as given, next to the executable, then under the working directory.
fn read_config_file(path: &Path) -> Result<(RawConfig, PathBuf)> {
    let search_paths = vec![
        path.to_path_buf(),
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|p| p.join(path)))
            .unwrap_or_else(|| path.to_path_buf()),
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf()),
    ];

    let mut last_error = None;

    for search_path in search_paths {
        match fs::read_to_string(&search_path) {
            Ok(content) => {
                let raw: RawConfig = serde_json::from_str(&content).with_context(|| {
                    format!("failed to parse config JSON at {}", search_path.display())
                })?;
                return Ok((raw, search_path));
            }
            Err(err) => {
                last_error = Some(format!("Failed to read {}: {}", search_path.display(), err));
            }
        }
    }

    Err(AppError::message(format!(
        "Could not find config file. Last error: {}",
        last_error.unwrap_or_else(|| "No search paths".to_string())
    )))
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    api: RawApiConfig,
    #[serde(default)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct RawApiConfig {
    base_url: Option<String>,
    page_size: Option<usize>,
    offset_param: Option<String>,
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

impl RawConfig {
    fn apply(self, config: &mut Config) {
        let api = self.api;
        if let Some(value) = api.base_url {
            config.api.base_url = value;
        }
        if let Some(value) = api.page_size {
            config.api.page_size = value;
        }
        if let Some(value) = api.offset_param {
            config.api.offset_param = value;
        }
        if let Some(value) = api.timeout_secs {
            config.api.timeout_secs = value;
        }
        if let Some(value) = api.user_agent {
            config.api.user_agent = value;
        }
        if let Some(value) = self.log_file {
            config.log_file = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn builtin_when_no_file_and_no_env() {
        let config = load_from_sources(None, no_env).unwrap();
        assert_eq!(config, Config::builtin());
    }

    #[test]
    fn file_values_override_builtin() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"api": {{"base_url": "http://imoveis.local:9000", "offset_param": "skip"}}}}"#
        )
        .unwrap();

        let config = load_from_sources(Some(file.path()), no_env).unwrap();

        assert_eq!(config.api.base_url, "http://imoveis.local:9000");
        assert_eq!(config.api.offset_param, "skip");
        assert_eq!(config.api.page_size, super::super::DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"api": {{"page_size": 10}}}}"#).unwrap();
        let env = HashMap::from([(ENV_PAGE_SIZE, "25"), (ENV_API_URL, "https://api.example")]);

        let config =
            load_from_sources(Some(file.path()), |key| env.get(key).map(|v| v.to_string()))
                .unwrap();

        assert_eq!(config.api.page_size, 25);
        assert_eq!(config.api.base_url, "https://api.example");
    }

    #[test]
    fn invalid_env_page_size_is_reported() {
        let err = load_from_sources(None, |key| {
            (key == ENV_PAGE_SIZE).then(|| "many".to_string())
        })
        .unwrap_err();

        assert!(err.to_string().contains(ENV_PAGE_SIZE), "{err}");
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_from_sources(Some(Path::new("/definitely/not/here.json")), no_env)
            .unwrap_err();

        assert!(err.to_string().contains("Could not find config file"), "{err}");
    }

    #[test]
    fn malformed_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        assert!(load_from_sources(Some(file.path()), no_env).is_err());
    }
}
