mod favorites;
mod filters;
mod listings;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Tabs},
};

use crate::app::state::{BrowseState, Tab};
use crate::pagination::Phase;
use crate::ui::components::render_notice;
use crate::ui::styles::{header_text, secondary_line, ACCENT};

pub use favorites::render_favorites;
pub use filters::render_filter_form;
pub use listings::render_listings;

const TAB_TITLES: [&str; 2] = ["Listings", "Favorites"];

/// Draw the whole browser: tab bar, active pane, status footer, and any popup on top.
pub fn render_browser(f: &mut Frame, state: &mut BrowseState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(2),
        ])
        .split(f.size());

    let tabs = Tabs::new(TAB_TITLES.to_vec())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(header_text("Imoveis")),
        )
        .select(state.tab.index())
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, chunks[0]);

    match state.tab {
        Tab::Listings => render_listings(f, chunks[1], state),
        Tab::Favorites => render_favorites(f, chunks[1], state),
    }

    f.render_widget(Paragraph::new(footer_lines(state)), chunks[2]);

    if let Some(editor) = &state.editor {
        render_filter_form(f, editor);
    }
    if let Some(notice) = &state.notice {
        render_notice(f, notice);
    }
}

fn footer_lines(state: &BrowseState) -> Vec<Line<'static>> {
    let status = match state.tab {
        Tab::Listings => listings_status(state),
        Tab::Favorites => {
            let favorites = &state.favorites;
            if favorites.is_loading() {
                "Loading favorites...".to_string()
            } else {
                format!("{} favorites", favorites.items().len())
            }
        }
    };
    let help = match state.tab {
        Tab::Listings => "↑/↓ move  / filter  f favorite  Tab switch  q quit",
        Tab::Favorites => "↑/↓ move  d remove  r refresh  Tab switch  q quit",
    };
    vec![Line::from(status), secondary_line(help)]
}

fn listings_status(state: &BrowseState) -> String {
    let paginator = &state.paginator;
    let count = paginator.listings().len();
    let filters = paginator.criteria().describe();
    if let Some(reason) = &state.stalled {
        return format!("Load failed ({reason}); move or press r to retry  |  {filters}");
    }
    match paginator.state().phase() {
        Phase::Loading => format!("{count} listings, loading more...  |  {filters}"),
        Phase::Exhausted => format!("{count} listings, end of results  |  {filters}"),
        Phase::Idle => format!("{count} listings  |  {filters}"),
    }
}
