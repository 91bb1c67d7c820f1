//! In-memory `ListingsApi` used by unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::{AppError, Result};
use crate::listing::{Listing, ListingId};

use super::{ListingsApi, PageQuery};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPage {
    pub offset: usize,
    pub limit: usize,
    pub params: Vec<(&'static str, String)>,
}

#[derive(Default)]
pub struct FakeApi {
    pages: Mutex<VecDeque<Result<Vec<Listing>>>>,
    favorites: Mutex<Vec<Listing>>,
    fail_favorites: Mutex<bool>,
    delete_status: Mutex<Option<StatusCode>>,
    pub page_requests: Mutex<Vec<RecordedPage>>,
    pub added: Mutex<Vec<Listing>>,
    pub removed: Mutex<Vec<ListingId>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_page(&self, page: Vec<Listing>) {
        self.pages.lock().unwrap().push_back(Ok(page));
    }

    pub fn push_error(&self, message: &str) {
        self.pages
            .lock()
            .unwrap()
            .push_back(Err(AppError::message(message)));
    }

    pub fn set_favorites(&self, favorites: Vec<Listing>) {
        *self.favorites.lock().unwrap() = favorites;
    }

    pub fn fail_favorites(&self) {
        *self.fail_favorites.lock().unwrap() = true;
    }

    /// `None` makes the delete call fail at transport level.
    pub fn set_delete_status(&self, status: Option<StatusCode>) {
        *self.delete_status.lock().unwrap() = status;
    }

    pub fn page_request_count(&self) -> usize {
        self.page_requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ListingsApi for FakeApi {
    async fn fetch_page(&self, query: &PageQuery<'_>) -> Result<Vec<Listing>> {
        self.page_requests.lock().unwrap().push(RecordedPage {
            offset: query.offset,
            limit: query.limit,
            params: query.criteria.query_params(),
        });
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn favorites(&self) -> Result<Vec<Listing>> {
        if *self.fail_favorites.lock().unwrap() {
            return Err(AppError::message("favorites unavailable"));
        }
        Ok(self.favorites.lock().unwrap().clone())
    }

    async fn add_favorite(&self, listing: &Listing) -> Result<()> {
        self.added.lock().unwrap().push(listing.clone());
        Ok(())
    }

    async fn remove_favorite(&self, id: ListingId) -> Result<StatusCode> {
        self.removed.lock().unwrap().push(id);
        match *self.delete_status.lock().unwrap() {
            Some(status) => Ok(status),
            None => Err(AppError::message("connection refused")),
        }
    }
}
