//! Offset/limit pagination over `/imoveis` with local post-filtering.
//!
//! [`PageState`] plus [`transition`] form the state machine; [`Paginator`] wires
//! it to a [`ListingsApi`] and the current [`FilterCriteria`].

use std::future::Future;
use std::sync::Arc;

use log::{debug, error, info};

use crate::api::{ListingsApi, PageQuery};
use crate::error::Result;
use crate::filter::FilterCriteria;
use crate::listing::Listing;

/// Offset of the next page and whether the server may still have rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub offset: usize,
    pub has_more: bool,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            offset: 0,
            has_more: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Exhausted,
}

/// Everything a listings screen needs to render: accumulated rows, cursor, in-flight flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageState {
    pub listings: Vec<Listing>,
    pub cursor: Cursor,
    pub loading: bool,
    /// Bumped on every reset so responses to older requests can be recognised.
    pub generation: u64,
}

impl PageState {
    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if !self.cursor.has_more {
            Phase::Exhausted
        } else {
            Phase::Idle
        }
    }

    pub fn can_fetch(&self) -> bool {
        !self.loading && self.cursor.has_more
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Requested,
    /// `fetched` is the raw row count from the server; `visible` is what survived local filters.
    Loaded {
        fetched: usize,
        visible: Vec<Listing>,
    },
    Failed,
    Reset,
}

/// Pure transition function of the pagination state machine.
///
/// `Requested` is ignored unless the state can fetch; `Loaded`/`Failed` are ignored unless a
/// request is outstanding. An empty raw page is terminal until `Reset`.
pub fn transition(mut state: PageState, event: PageEvent, page_size: usize) -> PageState {
    match event {
        PageEvent::Requested => {
            if state.can_fetch() {
                state.loading = true;
            }
        }
        PageEvent::Loaded { fetched, visible } => {
            if !state.loading {
                return state;
            }
            state.loading = false;
            if fetched == 0 {
                state.cursor.has_more = false;
            } else {
                state.listings.extend(visible);
                state.cursor.offset += page_size;
            }
        }
        PageEvent::Failed => {
            state.loading = false;
        }
        PageEvent::Reset => {
            state = PageState {
                generation: state.generation + 1,
                ..PageState::default()
            };
        }
    }
    state
}

/// A page request handed out by [`Paginator::begin_fetch`]; must be passed back to `complete`.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
    pub generation: u64,
    pub criteria: FilterCriteria,
}

impl PageRequest {
    pub fn query(&self) -> PageQuery<'_> {
        PageQuery {
            offset: self.offset,
            limit: self.limit,
            criteria: &self.criteria,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// A fetch was already in flight or the cursor is exhausted.
    Skipped,
    Appended { fetched: usize, visible: usize },
    Exhausted,
    Failed(String),
    /// The response belonged to a request issued before the last reset.
    Stale,
}

pub struct Paginator<A: ?Sized> {
    api: Arc<A>,
    criteria: FilterCriteria,
    state: PageState,
    page_size: usize,
}

impl<A: ListingsApi + ?Sized> Paginator<A> {
    pub fn new(api: Arc<A>, page_size: usize) -> Self {
        Self::with_criteria(api, page_size, FilterCriteria::default())
    }

    pub fn with_criteria(api: Arc<A>, page_size: usize, criteria: FilterCriteria) -> Self {
        Self {
            api,
            criteria,
            state: PageState::default(),
            page_size: page_size.max(1),
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn listings(&self) -> &[Listing] {
        &self.state.listings
    }

    pub fn cursor(&self) -> Cursor {
        self.state.cursor
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn api(&self) -> Arc<A> {
        Arc::clone(&self.api)
    }

    /// Replace the criteria and restart from offset 0.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.apply(PageEvent::Reset);
        debug!(
            "Pagination reset (generation {}) with {}",
            self.state.generation,
            self.criteria.describe()
        );
    }

    /// Enter `Loading` and describe the page to fetch, or `None` when guarded.
    pub fn begin_fetch(&mut self) -> Option<PageRequest> {
        if !self.state.can_fetch() {
            return None;
        }
        self.apply(PageEvent::Requested);
        Some(PageRequest {
            offset: self.state.cursor.offset,
            limit: self.page_size,
            generation: self.state.generation,
            criteria: self.criteria.clone(),
        })
    }

    /// Merge the result of a request previously returned by `begin_fetch`.
    pub fn complete(&mut self, request: PageRequest, result: Result<Vec<Listing>>) -> LoadOutcome {
        if request.generation != self.state.generation {
            debug!(
                "Discarding response for offset {} from generation {} (current {})",
                request.offset, request.generation, self.state.generation
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(page) => {
                let fetched = page.len();
                let visible = request.criteria.apply(page);
                let visible_count = visible.len();
                self.apply(PageEvent::Loaded { fetched, visible });

                if fetched == 0 {
                    info!(
                        "Listings exhausted at offset {} ({} shown)",
                        request.offset,
                        self.state.listings.len()
                    );
                    LoadOutcome::Exhausted
                } else {
                    debug!(
                        "Fetched {} listings at offset {}, {} passed local filters",
                        fetched, request.offset, visible_count
                    );
                    LoadOutcome::Appended {
                        fetched,
                        visible: visible_count,
                    }
                }
            }
            Err(err) => {
                error!("Failed to fetch listings at offset {}: {}", request.offset, err);
                self.apply(PageEvent::Failed);
                LoadOutcome::Failed(err.to_string())
            }
        }
    }

    /// Fetch and merge the next page in place.
    pub async fn load_next(&mut self) -> LoadOutcome {
        let Some(request) = self.begin_fetch() else {
            return LoadOutcome::Skipped;
        };
        let result = self.api.fetch_page(&request.query()).await;
        self.complete(request, result)
    }

    fn apply(&mut self, event: PageEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = transition(state, event, self.page_size);
    }
}

impl<A: ListingsApi + ?Sized + 'static> Paginator<A> {
    /// Detached fetch for callers that run the request on a spawned task.
    pub fn fetch_task(
        &self,
        request: PageRequest,
    ) -> impl Future<Output = (PageRequest, Result<Vec<Listing>>)> + Send + 'static {
        let api = self.api();
        async move {
            let result = api.fetch_page(&request.query()).await;
            (request, result)
        }
    }
}
