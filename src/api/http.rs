use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response, StatusCode};
use url::Url;

use crate::config::ApiConfig;
use crate::error::{AppError, Context, Result};
use crate::listing::{Listing, ListingId};

use super::request::{
    build_headers, endpoint, favorite_endpoint, normalize_base_url, page_params, FAVORITES_PATH,
    LISTINGS_PATH,
};
use super::{ListingsApi, PageQuery};

/// `reqwest`-backed client for the listings API.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: Url,
    offset_param: String,
}

impl HttpApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = normalize_base_url(&config.base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(build_headers(&config.user_agent)?)
            .build()
            .context("Failed to construct HTTP client")?;

        Ok(Self {
            client,
            base_url,
            offset_param: config.offset_param.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

fn ensure_success(response: Response, context: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(AppError::status(context, status))
    }
}

#[async_trait]
impl ListingsApi for HttpApi {
    async fn fetch_page(&self, query: &PageQuery<'_>) -> Result<Vec<Listing>> {
        let url = endpoint(&self.base_url, LISTINGS_PATH)?;
        let params = page_params(query, &self.offset_param);
        debug!("GET {} {:?}", url, params);

        let response = self.client.get(url).query(&params).send().await?;
        let response = ensure_success(response, "GET /imoveis")?;
        Ok(response.json::<Vec<Listing>>().await?)
    }

    async fn favorites(&self) -> Result<Vec<Listing>> {
        let url = endpoint(&self.base_url, FAVORITES_PATH)?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let response = ensure_success(response, "GET /favoritos")?;
        Ok(response.json::<Vec<Listing>>().await?)
    }

    async fn add_favorite(&self, listing: &Listing) -> Result<()> {
        let url = endpoint(&self.base_url, FAVORITES_PATH)?;
        debug!("POST {} id={}", url, listing.id);

        let response = self.client.post(url).json(listing).send().await?;
        ensure_success(response, "POST /favoritos")?;
        Ok(())
    }

    async fn remove_favorite(&self, id: ListingId) -> Result<StatusCode> {
        let url = favorite_endpoint(&self.base_url, id)?;
        debug!("DELETE {}", url);

        let response = self.client.delete(url).send().await?;
        Ok(response.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn builds_from_builtin_config() {
        let config = Config::builtin();
        let api = HttpApi::new(&config.api).unwrap();

        assert_eq!(api.base_url().as_str(), "http://127.0.0.1:8000/");
    }

    #[test]
    fn rejects_bad_base_url() {
        let mut config = Config::builtin();
        config.api.base_url = "127.0.0.1 8000".to_string();

        assert!(HttpApi::new(&config.api).is_err());
    }
}
