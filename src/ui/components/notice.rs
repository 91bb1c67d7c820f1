use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::notice::Notice;
use crate::ui::styles::{notice_color, secondary_line};

use super::centered_rect;

/// Blocking popup for the outcome of a favorites mutation; dismissed with Enter/Esc.
pub fn render_notice(f: &mut Frame, notice: &Notice) {
    let area = centered_rect(50, 25, f.size());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(notice_color(notice.level)))
        .title(notice.title.clone());
    let body = vec![
        Line::from(notice.message.clone()),
        Line::default(),
        secondary_line("Enter or Esc to dismiss"),
    ];
    f.render_widget(
        Paragraph::new(body)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}
