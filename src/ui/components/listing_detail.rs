use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::listing::{format_amount, Listing};
use crate::ui::styles::{label_span, secondary_line};

fn field<'a>(label: &'static str, value: String) -> Line<'a> {
    Line::from(vec![label_span(format!("{label}: ")), Span::raw(value)])
}

/// Full record view: every attribute of the listing, one per line.
pub fn detail_lines(listing: &Listing) -> Vec<Line<'static>> {
    vec![
        field("Name", listing.name.clone()),
        field("Neighborhood", listing.neighborhood.clone()),
        field("Description", listing.description.clone()),
        field("Type", listing.kind.clone()),
        field("Purpose", listing.purposes_label()),
        field("Status", listing.status.clone()),
        field("Land area", format!("{} m²", format_amount(listing.land_area))),
        field("Built area", format!("{} m²", format_amount(listing.built_area))),
        field("Rent", format!("R$ {}", format_amount(listing.rent_price))),
        field("Sale price", format!("R$ {}", format_amount(listing.sale_price))),
        field("Image", listing.image.clone()),
        Line::default(),
        secondary_line(format!("id {}", listing.id)),
    ]
}

pub fn render_listing_detail(f: &mut Frame, area: Rect, listing: Option<&Listing>) {
    let block = Block::default().borders(Borders::ALL).title("Details");
    let paragraph = match listing {
        Some(listing) => Paragraph::new(detail_lines(listing)),
        None => Paragraph::new(secondary_line("Nothing selected")),
    };
    f.render_widget(paragraph.block(block).wrap(Wrap { trim: true }), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_shows_missing_amounts_as_dash() {
        let mut listing = Listing::new(3, "Sala comercial");
        listing.rent_price = Some(1200.0);

        let text: Vec<String> = detail_lines(&listing)
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();

        assert!(text.contains(&"Rent: R$ 1200".to_string()));
        assert!(text.contains(&"Sale price: R$ -".to_string()));
    }
}
