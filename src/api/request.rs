use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::error::{AppError, Context, Result};

use super::PageQuery;

pub const LISTINGS_PATH: &str = "imoveis";
pub const FAVORITES_PATH: &str = "favoritos";

/// Parse the API root and make sure relative joins append instead of replacing the last segment.
pub fn normalize_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let mut url = Url::parse(trimmed).with_context(|| format!("Invalid API base URL `{trimmed}`"))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::message(format!(
            "Unsupported URL scheme `{}` in API base URL",
            url.scheme()
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

pub fn endpoint(base: &Url, path: &str) -> Result<Url> {
    Ok(base.join(path)?)
}

pub fn favorite_endpoint(base: &Url, id: i64) -> Result<Url> {
    endpoint(base, &format!("{FAVORITES_PATH}/{id}"))
}

/// Query pairs for a page request: the offset under the configured key, `limit`, then criteria.
pub fn page_params(query: &PageQuery<'_>, offset_param: &str) -> Vec<(String, String)> {
    let mut params = Vec::with_capacity(4);
    params.push((offset_param.to_string(), query.offset.to_string()));
    params.push(("limit".to_string(), query.limit.to_string()));
    params.extend(
        query
            .criteria
            .query_params()
            .into_iter()
            .map(|(key, value)| (key.to_string(), value)),
    );
    params
}

pub fn build_headers(user_agent: &str) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    let value = HeaderValue::from_str(user_agent)
        .with_context(|| format!("Invalid user agent `{user_agent}`"))?;
    map.insert(HeaderName::from_static("user-agent"), value);
    map.insert(
        HeaderName::from_static("accept"),
        HeaderValue::from_static("application/json"),
    );
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterCriteria, PropertyKind, RangeBound};

    #[test]
    fn base_url_gains_trailing_slash() {
        let base = normalize_base_url("http://localhost:8000/api").unwrap();
        let url = endpoint(&base, LISTINGS_PATH).unwrap();

        assert_eq!(url.as_str(), "http://localhost:8000/api/imoveis");
    }

    #[test]
    fn bare_host_joins_at_root() {
        let base = normalize_base_url("http://127.0.0.1:8000").unwrap();

        assert_eq!(
            favorite_endpoint(&base, 42).unwrap().as_str(),
            "http://127.0.0.1:8000/favoritos/42"
        );
    }

    #[test]
    fn rejects_non_http_scheme() {
        assert!(normalize_base_url("ftp://example.com").is_err());
        assert!(normalize_base_url("not a url").is_err());
    }

    #[test]
    fn page_params_use_configured_offset_key() {
        let criteria = FilterCriteria {
            kind: Some(PropertyKind::House),
            built_area: RangeBound::new(Some(10.0), None),
            ..Default::default()
        };
        let query = PageQuery {
            offset: 100,
            limit: 50,
            criteria: &criteria,
        };

        let params = page_params(&query, "skip");

        assert_eq!(
            params,
            vec![
                ("skip".to_string(), "100".to_string()),
                ("limit".to_string(), "50".to_string()),
                ("tipo".to_string(), "casa".to_string()),
            ]
        );
    }
}
