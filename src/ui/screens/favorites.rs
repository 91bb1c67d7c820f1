use ratatui::{
    prelude::*,
    widgets::{Row, TableState},
};

use crate::app::state::BrowseState;
use crate::listing::{format_amount, Listing};
use crate::ui::components::render_listing_detail;
use crate::utils::truncate_to_width;

use super::listings::listing_table;

fn favorite_row(listing: &Listing, removing: bool) -> Row<'static> {
    let name = if removing {
        format!("{} (Removing...)", listing.name)
    } else {
        listing.name.clone()
    };
    let row = Row::new(vec![
        truncate_to_width(&name, 28),
        truncate_to_width(&listing.neighborhood, 18),
        listing.kind.clone(),
        listing.purposes_label(),
        format_amount(listing.sale_price),
        format_amount(listing.rent_price),
    ]);
    if removing {
        row.style(Style::default().add_modifier(Modifier::DIM))
    } else {
        row
    }
}

pub fn render_favorites(f: &mut Frame, area: Rect, state: &mut BrowseState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let favorites = &state.favorites;
    let rows: Vec<Row> = favorites
        .items()
        .iter()
        .map(|listing| favorite_row(listing, favorites.is_removing(listing.id)))
        .collect();
    let title = if favorites.is_loading() {
        "Favorites (loading...)".to_string()
    } else {
        format!("Favorites ({})", favorites.items().len())
    };
    let mut table_state = TableState::default();
    if !favorites.items().is_empty() {
        table_state.select(Some(state.favorite_cursor));
    }
    f.render_stateful_widget(listing_table(rows, title), chunks[0], &mut table_state);

    render_listing_detail(f, chunks[1], state.selected_favorite());
}
