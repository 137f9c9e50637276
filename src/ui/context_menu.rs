use ratatui::Frame;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::menu::{ContextMenu, MenuAction};
use crate::state::UiState;

/// Render the context menu overlay. A hidden menu draws nothing.
pub fn render_context_menu(frame: &mut Frame, menu: &ContextMenu, state: &UiState) {
    let Some(area) = menu.area() else {
        return;
    };
    let area = area.intersection(frame.area());

    let style = state.style();
    let text = Style::default()
        .fg(style.color("dropdown-text"))
        .bg(style.color("dropdown-background"));
    let muted = text.fg(style.color("secondary-text-color"));

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(text.fg(style.color("dropdown-border")))
        .style(text);
    let inner_width = block.inner(area).width as usize;

    let lines: Vec<Line> = menu
        .items()
        .iter()
        .enumerate()
        .map(|(i, entry)| match entry {
            MenuAction::Separator => Line::from(Span::styled(
                "─".repeat(inner_width),
                text.fg(style.color("dropdown-border")),
            )),
            MenuAction::Item(item) => {
                let row_style = if item.disabled {
                    muted
                } else if menu.selected() == Some(i) {
                    text.bg(style.color("dropdown-hover"))
                } else {
                    text
                };
                let label = format!(" {}", item.label);
                let shortcut = item.shortcut.as_deref().unwrap_or("");
                let gap = inner_width.saturating_sub(label.width() + shortcut.width() + 1);
                Line::from(vec![
                    Span::styled(label, row_style),
                    Span::styled(" ".repeat(gap), row_style),
                    Span::styled(
                        shortcut.to_string(),
                        row_style.fg(style.color("secondary-text-color")),
                    ),
                    Span::styled(" ", row_style),
                ])
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
