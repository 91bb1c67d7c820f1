//! Non-interactive subcommands: the same paginator and favorites logic the
//! browser uses, driven to completion and printed to stdout.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use log::info;

use crate::api::ListingsApi;
use crate::error::{AppError, Result};
use crate::export::save_listings_csv;
use crate::favorites::{add_favorite, Favorites};
use crate::filter::FilterCriteria;
use crate::listing::{format_amount, Listing, ListingId};
use crate::notice::Notice;
use crate::pagination::{LoadOutcome, Paginator};
use crate::utils::{pad_to_width, truncate_to_width};

/// Load pages until `max_pages` have been appended (or the server runs dry when `None`).
/// A failed page aborts with its reason.
pub async fn collect_listings<A: ListingsApi + ?Sized>(
    paginator: &mut Paginator<A>,
    max_pages: Option<usize>,
) -> Result<Vec<Listing>> {
    let mut pages = 0;
    while max_pages.map_or(true, |max| pages < max) {
        match paginator.load_next().await {
            LoadOutcome::Appended { .. } => pages += 1,
            LoadOutcome::Failed(reason) => {
                return Err(AppError::message(format!("failed to load listings: {reason}")))
            }
            LoadOutcome::Exhausted | LoadOutcome::Skipped | LoadOutcome::Stale => break,
        }
    }
    Ok(paginator.listings().to_vec())
}

/// Page through `/imoveis` until the listing with `id` shows up.
pub async fn find_listing<A: ListingsApi + ?Sized>(
    api: Arc<A>,
    criteria: FilterCriteria,
    page_size: usize,
    id: ListingId,
) -> Result<Option<Listing>> {
    let mut paginator = Paginator::with_criteria(api, page_size, criteria);
    loop {
        if let Some(found) = paginator.listings().iter().find(|l| l.id == id) {
            return Ok(Some(found.clone()));
        }
        match paginator.load_next().await {
            LoadOutcome::Appended { .. } => continue,
            LoadOutcome::Failed(reason) => {
                return Err(AppError::message(format!("failed to load listings: {reason}")))
            }
            LoadOutcome::Exhausted | LoadOutcome::Skipped | LoadOutcome::Stale => return Ok(None),
        }
    }
}

pub fn print_listings<W: Write>(mut out: W, listings: &[Listing]) -> Result<()> {
    writeln!(
        out,
        "{} {} {} {} {} {}",
        pad_to_width("ID", 6),
        pad_to_width("NAME", 28),
        pad_to_width("NEIGHBORHOOD", 18),
        pad_to_width("TYPE", 12),
        pad_to_width("SALE", 12),
        "RENT"
    )?;
    for listing in listings {
        writeln!(
            out,
            "{} {} {} {} {} {}",
            pad_to_width(&listing.id.to_string(), 6),
            pad_to_width(&truncate_to_width(&listing.name, 28), 28),
            pad_to_width(&truncate_to_width(&listing.neighborhood, 18), 18),
            pad_to_width(&truncate_to_width(&listing.kind, 12), 12),
            pad_to_width(&format_amount(listing.sale_price), 12),
            format_amount(listing.rent_price)
        )?;
    }
    Ok(())
}

fn emit(listings: &[Listing], csv: Option<&Path>, prefix: &str) -> Result<()> {
    match csv {
        Some(target) => {
            let path = save_listings_csv(target, prefix, listings)?;
            println!("{} rows written to {}", listings.len(), path.display());
        }
        None => {
            print_listings(std::io::stdout().lock(), listings)?;
            println!("{} listings", listings.len());
        }
    }
    Ok(())
}

pub async fn run_list(
    api: Arc<dyn ListingsApi>,
    page_size: usize,
    criteria: FilterCriteria,
    max_pages: Option<usize>,
    csv: Option<&Path>,
) -> Result<()> {
    info!("Listing with {}", criteria.describe());
    let mut paginator = Paginator::with_criteria(api, page_size, criteria);
    let listings = collect_listings(&mut paginator, max_pages).await?;
    emit(&listings, csv, "listings")
}

pub async fn run_favorites_list(api: Arc<dyn ListingsApi>, csv: Option<&Path>) -> Result<()> {
    let mut favorites = Favorites::new(api);
    favorites.refresh().await?;
    emit(favorites.items(), csv, "favorites")
}

pub async fn run_favorites_remove(api: Arc<dyn ListingsApi>, id: ListingId) -> Result<Notice> {
    let mut favorites = Favorites::new(api);
    // only the single requested id is ever in flight here
    let notice = favorites
        .remove(id)
        .await
        .ok_or(AppError::Cancelled)?;
    Ok(notice)
}

pub async fn run_favorites_add(
    api: Arc<dyn ListingsApi>,
    page_size: usize,
    criteria: FilterCriteria,
    id: ListingId,
) -> Result<Notice> {
    let listing = find_listing(Arc::clone(&api), criteria, page_size, id)
        .await?
        .ok_or_else(|| AppError::message(format!("listing {id} not found")))?;
    Ok(add_favorite(api.as_ref(), &listing).await)
}
