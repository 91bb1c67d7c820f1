use std::sync::Arc;

use crate::api::ListingsApi;
use crate::favorites::Favorites;
use crate::filter::{FilterForm, FORM_FIELDS};
use crate::listing::Listing;
use crate::notice::Notice;
use crate::pagination::Paginator;

pub type SharedApi = Arc<dyn ListingsApi>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Listings,
    Favorites,
}

impl Tab {
    pub fn index(self) -> usize {
        match self {
            Tab::Listings => 0,
            Tab::Favorites => 1,
        }
    }
}

/// Text state of the filter form while it is open.
#[derive(Debug, Clone, Default)]
pub struct FilterEditor {
    pub form: FilterForm,
    pub focused: usize,
    pub error: Option<String>,
}

impl FilterEditor {
    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % FORM_FIELDS.len();
    }

    pub fn focus_prev(&mut self) {
        self.focused = if self.focused == 0 {
            FORM_FIELDS.len() - 1
        } else {
            self.focused - 1
        };
    }
}

/// Whether the selection is within half a viewport of the end of the list.
pub fn near_end(selected: usize, len: usize, viewport: usize) -> bool {
    if len == 0 {
        return true;
    }
    let remaining = len.saturating_sub(selected + 1);
    remaining < (viewport / 2).max(1)
}

/// Everything the browse screens render; mutated only by the controller loop.
pub struct BrowseState {
    pub paginator: Paginator<dyn ListingsApi>,
    pub favorites: Favorites<dyn ListingsApi>,
    pub tab: Tab,
    pub listing_cursor: usize,
    pub favorite_cursor: usize,
    pub editor: Option<FilterEditor>,
    pub notice: Option<Notice>,
    /// Set after a failed page fetch; cleared by the next navigation key.
    pub stalled: Option<String>,
    /// Rows visible in the listings pane, updated on every draw.
    pub viewport: usize,
}

impl BrowseState {
    pub fn new(api: SharedApi, page_size: usize) -> Self {
        Self {
            paginator: Paginator::new(Arc::clone(&api), page_size),
            favorites: Favorites::new(api),
            tab: Tab::Listings,
            listing_cursor: 0,
            favorite_cursor: 0,
            editor: None,
            notice: None,
            stalled: None,
            viewport: 10,
        }
    }

    pub fn selected_listing(&self) -> Option<&Listing> {
        self.paginator.listings().get(self.listing_cursor)
    }

    pub fn selected_favorite(&self) -> Option<&Listing> {
        self.favorites.items().get(self.favorite_cursor)
    }

    /// Move the cursor of the active tab; any movement also lifts a stalled fetch.
    pub fn move_cursor(&mut self, delta: isize) {
        self.stalled = None;
        let (cursor, len) = match self.tab {
            Tab::Listings => (&mut self.listing_cursor, self.paginator.listings().len()),
            Tab::Favorites => (&mut self.favorite_cursor, self.favorites.items().len()),
        };
        if len == 0 {
            *cursor = 0;
            return;
        }
        let next = (*cursor as isize + delta).clamp(0, len as isize - 1);
        *cursor = next as usize;
    }

    pub fn clamp_cursors(&mut self) {
        let listings = self.paginator.listings().len();
        let favorites = self.favorites.items().len();
        self.listing_cursor = self.listing_cursor.min(listings.saturating_sub(1));
        self.favorite_cursor = self.favorite_cursor.min(favorites.saturating_sub(1));
    }

    /// True when the listings pane wants the next page right now.
    pub fn wants_next_page(&self) -> bool {
        self.tab == Tab::Listings
            && self.editor.is_none()
            && self.stalled.is_none()
            && self.paginator.state().can_fetch()
            && near_end(
                self.listing_cursor,
                self.paginator.listings().len(),
                self.viewport,
            )
    }

    pub fn open_editor(&mut self) {
        self.editor = Some(FilterEditor {
            form: FilterForm::from_criteria(self.paginator.criteria()),
            ..Default::default()
        });
    }

    /// Validate the form and restart pagination with the new criteria.
    /// Returns false (keeping the form open with an error) when validation fails.
    pub fn apply_editor(&mut self) -> bool {
        let Some(editor) = self.editor.as_mut() else {
            return false;
        };
        match editor.form.to_criteria() {
            Ok(criteria) => {
                self.paginator.set_criteria(criteria);
                self.listing_cursor = 0;
                self.stalled = None;
                self.editor = None;
                true
            }
            Err(err) => {
                editor.error = Some(err.to_string());
                false
            }
        }
    }
}
