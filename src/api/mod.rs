use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::Result;
use crate::filter::FilterCriteria;
use crate::listing::{Listing, ListingId};

pub mod decode;
pub mod http;
pub mod request;

#[cfg(test)]
pub mod fake;

pub use http::HttpApi;

/// Parameters of one `/imoveis` page request.
#[derive(Debug, Clone, Copy)]
pub struct PageQuery<'a> {
    pub offset: usize,
    pub limit: usize,
    pub criteria: &'a FilterCriteria,
}

/// Remote listings service. The paginator and favorites state only talk to this seam.
#[async_trait]
pub trait ListingsApi: Send + Sync {
    /// `GET /imoveis` with offset, limit and the categorical criteria.
    async fn fetch_page(&self, query: &PageQuery<'_>) -> Result<Vec<Listing>>;

    /// `GET /favoritos`.
    async fn favorites(&self) -> Result<Vec<Listing>>;

    /// `POST /favoritos` with the full listing as body.
    async fn add_favorite(&self, listing: &Listing) -> Result<()>;

    /// `DELETE /favoritos/{id}`. Returns the raw status; callers decide what counts as success.
    async fn remove_favorite(&self, id: ListingId) -> Result<StatusCode>;
}
