use crate::api::request::normalize_base_url;
use crate::error::{AppError, Result};

use super::{ApiConfig, Config};

pub const MAX_PAGE_SIZE: usize = 1000;

/// Validate the merged configuration and report every problem at once.
pub fn validate_config(config: &Config) -> Result<()> {
    let mut issues = Vec::new();

    validate_api(&config.api, &mut issues);

    if config.log_file.as_os_str().is_empty() {
        issues.push("log_file must not be empty".to_string());
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(AppError::message(format!(
            "configuration invalid:\n  - {}",
            issues.join("\n  - ")
        )))
    }
}

fn validate_api(api: &ApiConfig, issues: &mut Vec<String>) {
    if let Err(err) = normalize_base_url(&api.base_url) {
        issues.push(format!("api.base_url: {err}"));
    }

    if api.page_size == 0 || api.page_size > MAX_PAGE_SIZE {
        issues.push(format!(
            "api.page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
            api.page_size
        ));
    }

    if api.offset_param.trim().is_empty() {
        issues.push("api.offset_param must not be empty".to_string());
    }

    if api.timeout_secs == 0 {
        issues.push("api.timeout_secs must be greater than zero".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_config_is_valid() {
        validate_config(&Config::builtin()).expect("builtin config should be valid");
    }

    #[test]
    fn rejects_zero_page_size() {
        let mut config = Config::builtin();
        config.api.page_size = 0;

        let err = validate_config(&config).expect_err("validation should fail");
        assert!(
            err.to_string().contains("page_size"),
            "unexpected error message: {err}"
        );
    }

    #[test]
    fn aggregates_multiple_issues() {
        let mut config = Config::builtin();
        config.api.base_url = "ftp://listings".to_string();
        config.api.offset_param = "  ".to_string();
        config.api.timeout_secs = 0;

        let msg = validate_config(&config).unwrap_err().to_string();
        assert!(msg.contains("base_url"), "{msg}");
        assert!(msg.contains("offset_param"), "{msg}");
        assert!(msg.contains("timeout_secs"), "{msg}");
    }
}
