use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Row, Table, TableState},
};

use crate::app::state::BrowseState;
use crate::listing::{format_amount, Listing};
use crate::ui::components::render_listing_detail;
use crate::ui::styles::{label_span, selection_style};
use crate::utils::truncate_to_width;

const NAME_WIDTH: usize = 28;

fn listing_row(listing: &Listing) -> Row<'static> {
    Row::new(vec![
        truncate_to_width(&listing.name, NAME_WIDTH),
        truncate_to_width(&listing.neighborhood, 18),
        listing.kind.clone(),
        listing.purposes_label(),
        format_amount(listing.sale_price),
        format_amount(listing.rent_price),
    ])
}

pub(super) fn listing_table<'a>(rows: Vec<Row<'a>>, title: String) -> Table<'a> {
    let widths = [
        Constraint::Length(NAME_WIDTH as u16),
        Constraint::Length(18),
        Constraint::Length(12),
        Constraint::Length(16),
        Constraint::Length(12),
        Constraint::Min(8),
    ];
    let header = Row::new(vec![
        label_span("Name"),
        label_span("Neighborhood"),
        label_span("Type"),
        label_span("Purpose"),
        label_span("Sale"),
        label_span("Rent"),
    ]);
    Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(selection_style())
}

pub fn render_listings(f: &mut Frame, area: Rect, state: &mut BrowseState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    // borders plus the header row
    state.viewport = chunks[0].height.saturating_sub(3).max(1) as usize;

    let listings = state.paginator.listings();
    let rows: Vec<Row> = listings.iter().map(listing_row).collect();
    let title = format!("Listings ({})", listings.len());
    let mut table_state = TableState::default();
    if !listings.is_empty() {
        table_state.select(Some(state.listing_cursor));
    }
    f.render_stateful_widget(listing_table(rows, title), chunks[0], &mut table_state);

    render_listing_detail(f, chunks[1], state.selected_listing());
}
