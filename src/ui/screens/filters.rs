use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::state::FilterEditor;
use crate::filter::FORM_FIELDS;
use crate::ui::components::centered_rect;
use crate::ui::styles::{header_text, secondary_line, ACCENT};
use crate::utils::pad_to_width;

const LABEL_WIDTH: usize = 36;

fn form_lines(editor: &FilterEditor) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = FORM_FIELDS
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let focused = idx == editor.focused;
            let marker = if focused { "> " } else { "  " };
            let label = pad_to_width(&field.label(), LABEL_WIDTH);
            let mut value = editor.form.value(idx).to_string();
            if focused {
                value.push('_');
            }
            let style = if focused {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!("{marker}{label}"), style),
                Span::styled(value, style),
            ])
        })
        .collect();

    lines.push(Line::default());
    if let Some(error) = &editor.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(secondary_line(
        "↑/↓ field  Enter apply  Ctrl+X clear all  Esc cancel",
    ));
    lines
}

pub fn render_filter_form(f: &mut Frame, editor: &FilterEditor) {
    let area = centered_rect(70, 70, f.size());
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(header_text("Filters"));
    f.render_widget(Paragraph::new(form_lines(editor)).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focused_field_gets_cursor_and_error_is_shown() {
        let mut editor = FilterEditor::default();
        editor.focused = 2;
        editor.form.push_char(2, 'C');
        editor.error = Some("invalid filter: `x` is not a number".to_string());

        let lines = form_lines(&editor);
        let focused: String = lines[2].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(focused.starts_with("> Neighborhood"));
        assert!(focused.ends_with("C_"));
        assert!(lines
            .iter()
            .any(|line| line.spans.iter().any(|s| s.content.contains("not a number"))));
    }
}
