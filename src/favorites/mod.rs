use std::sync::Arc;

use log::{error, info, warn};
use reqwest::StatusCode;

use crate::api::ListingsApi;
use crate::error::Result;
use crate::listing::{Listing, ListingId};
use crate::notice::Notice;

/// Post a listing to the favorites resource. Purely remote: no local list is touched.
pub async fn add_favorite<A: ListingsApi + ?Sized>(api: &A, listing: &Listing) -> Notice {
    match api.add_favorite(listing).await {
        Ok(()) => {
            info!("Listing {} added to favorites", listing.id);
            Notice::success("Saved", "Listing added to favorites.")
        }
        Err(err) => {
            error!("Failed to add listing {} to favorites: {}", listing.id, err);
            Notice::error("Error", "Could not add the listing to favorites.")
        }
    }
}

/// Local view of the favorites resource with a single "currently removing" slot.
pub struct Favorites<A: ?Sized> {
    api: Arc<A>,
    items: Vec<Listing>,
    loading: bool,
    removing: Option<ListingId>,
}

impl<A: ListingsApi + ?Sized> Favorites<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            items: Vec::new(),
            loading: false,
            removing: None,
        }
    }

    pub fn items(&self) -> &[Listing] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn removing(&self) -> Option<ListingId> {
        self.removing
    }

    pub fn is_removing(&self, id: ListingId) -> bool {
        self.removing == Some(id)
    }

    pub fn api(&self) -> Arc<A> {
        Arc::clone(&self.api)
    }

    pub fn begin_refresh(&mut self) {
        self.loading = true;
    }

    /// Replace the list on success; on failure log and keep the previous rows.
    pub fn complete_refresh(&mut self, result: Result<Vec<Listing>>) -> Result<usize> {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                Ok(self.items.len())
            }
            Err(err) => {
                error!("Failed to load favorites: {}", err);
                Err(err)
            }
        }
    }

    /// Reload the whole list from `GET /favoritos`.
    pub async fn refresh(&mut self) -> Result<usize> {
        self.begin_refresh();
        let result = self.api.favorites().await;
        self.complete_refresh(result)
    }

    /// Claim the removing slot for `id`. Returns false when that id is already being removed.
    pub fn begin_remove(&mut self, id: ListingId) -> bool {
        if self.is_removing(id) {
            return false;
        }
        info!("Removing favorite {}", id);
        self.removing = Some(id);
        true
    }

    /// Apply the server's answer: only a 200 drops the row locally.
    pub fn complete_remove(&mut self, id: ListingId, result: Result<StatusCode>) -> Notice {
        if self.removing == Some(id) {
            self.removing = None;
        }

        match result {
            Ok(status) if status == StatusCode::OK => {
                self.items.retain(|listing| listing.id != id);
                info!("Favorite {} removed", id);
                Notice::success("Removed", "Listing removed from favorites.")
            }
            Ok(status) => {
                warn!("Removing favorite {} returned status {}", id, status);
                Notice::error("Error", "Could not remove the favorite.")
            }
            Err(err) => {
                error!("Failed to remove favorite {}: {}", id, err);
                Notice::error(
                    "Error",
                    "A problem occurred while trying to remove the favorite.",
                )
            }
        }
    }

    /// Delete one favorite; `None` when the same id is already in flight.
    pub async fn remove(&mut self, id: ListingId) -> Option<Notice> {
        if !self.begin_remove(id) {
            return None;
        }
        let result = self.api.remove_favorite(id).await;
        Some(self.complete_remove(id, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::notice::NoticeLevel;

    fn favorites_with(ids: &[i64]) -> (Arc<FakeApi>, Favorites<FakeApi>) {
        let api = Arc::new(FakeApi::new());
        api.set_favorites(
            ids.iter()
                .map(|id| Listing::new(*id, format!("fav {id}")))
                .collect(),
        );
        let favorites = Favorites::new(api.clone());
        (api, favorites)
    }

    fn ids<A: ListingsApi + ?Sized>(favorites: &Favorites<A>) -> Vec<i64> {
        favorites.items().iter().map(|l| l.id).collect()
    }

    #[tokio::test]
    async fn refresh_replaces_items() {
        let (_, mut favorites) = favorites_with(&[1, 2, 3]);

        assert_eq!(favorites.refresh().await.unwrap(), 3);
        assert_eq!(ids(&favorites), vec![1, 2, 3]);
        assert!(!favorites.is_loading());
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_rows() {
        let (api, mut favorites) = favorites_with(&[1, 2]);
        favorites.refresh().await.unwrap();

        api.fail_favorites();
        assert!(favorites.refresh().await.is_err());
        assert_eq!(ids(&favorites), vec![1, 2]);
        assert!(!favorites.is_loading());
    }

    #[tokio::test]
    async fn accepted_delete_removes_exactly_that_id() {
        let (api, mut favorites) = favorites_with(&[1, 2, 3]);
        favorites.refresh().await.unwrap();
        api.set_delete_status(Some(StatusCode::OK));

        let notice = favorites.remove(2).await.unwrap();

        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(ids(&favorites), vec![1, 3]);
        assert_eq!(*api.removed.lock().unwrap(), vec![2]);
        assert_eq!(favorites.removing(), None);
    }

    #[tokio::test]
    async fn rejected_delete_leaves_state_and_signals_error() {
        let (api, mut favorites) = favorites_with(&[1, 2, 3]);
        favorites.refresh().await.unwrap();
        api.set_delete_status(Some(StatusCode::NOT_FOUND));
        let before = favorites.items().to_vec();

        let notice = favorites.remove(2).await.unwrap();

        assert!(notice.is_error());
        assert_eq!(favorites.items(), before.as_slice());
        assert_eq!(favorites.removing(), None);
    }

    #[tokio::test]
    async fn non_200_success_status_is_still_rejected() {
        let (api, mut favorites) = favorites_with(&[1]);
        favorites.refresh().await.unwrap();
        api.set_delete_status(Some(StatusCode::NO_CONTENT));

        let notice = favorites.remove(1).await.unwrap();

        assert!(notice.is_error());
        assert_eq!(ids(&favorites), vec![1]);
    }

    #[tokio::test]
    async fn transport_failure_leaves_state_and_signals_error() {
        let (api, mut favorites) = favorites_with(&[4, 5]);
        favorites.refresh().await.unwrap();
        api.set_delete_status(None);

        let notice = favorites.remove(5).await.unwrap();

        assert!(notice.is_error());
        assert_eq!(ids(&favorites), vec![4, 5]);
    }

    #[test]
    fn removing_slot_guards_only_the_same_id() {
        let (_, mut favorites) = favorites_with(&[]);

        assert!(favorites.begin_remove(1));
        assert!(!favorites.begin_remove(1));
        assert!(favorites.begin_remove(2));
        assert!(favorites.is_removing(2));
        assert!(!favorites.is_removing(1));
    }

    #[test]
    fn late_completion_does_not_clear_a_newer_slot() {
        let (_, mut favorites) = favorites_with(&[]);
        favorites.begin_remove(1);
        favorites.begin_remove(2);

        favorites.complete_remove(1, Ok(StatusCode::OK));

        assert_eq!(favorites.removing(), Some(2));
    }

    #[tokio::test]
    async fn add_posts_full_listing_without_local_change() {
        let (api, favorites) = favorites_with(&[]);
        let mut listing = Listing::new(10, "Casa");
        listing.sale_price = Some(300_000.0);

        let notice = add_favorite(api.as_ref(), &listing).await;

        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(*api.added.lock().unwrap(), vec![listing]);
        assert!(favorites.items().is_empty());
    }
}
