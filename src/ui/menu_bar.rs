use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::menu::{DropdownEntry, MENU_BAR_HEIGHT};

use super::app::{App, Focus};

/// Render the top row of menu labels.
pub fn render_menu_bar(frame: &mut Frame, area: Rect, app: &App) {
    let style = app.state.style();
    let bar_area = Rect {
        height: MENU_BAR_HEIGHT.min(area.height),
        ..area
    };
    let bar_style = Style::default()
        .fg(style.color("menu-text"))
        .bg(style.color("menu-background"));
    frame.render_widget(Block::default().style(bar_style), bar_area);

    for (item, slot) in app.menu_bar.layout(area, &app.state) {
        let focused = app.focus == Focus::Menu(item.id().clone());
        let label_style = if item.is_disabled() {
            bar_style.fg(style.color("secondary-text-color"))
        } else if item.is_open(&app.state) || focused {
            bar_style
                .bg(style.color("menu-hover"))
                .add_modifier(Modifier::BOLD)
        } else {
            bar_style
        };

        let mut spans = vec![Span::styled(format!(" {}", item.label()), label_style)];
        if let Some(shortcut) = item.shortcut_text(&app.state) {
            spans.push(Span::styled(
                format!(" {}", shortcut),
                label_style.fg(style.color("secondary-text-color")),
            ));
        }
        spans.push(Span::styled(" ", label_style));

        frame.render_widget(Paragraph::new(Line::from(spans)), slot);
    }
}

/// Render the dropdown of the open menu, if any.
pub fn render_dropdown(frame: &mut Frame, area: Rect, app: &App) {
    let Some(open) = app.state.current_menu() else {
        return;
    };
    let Some(item) = app.menu_bar.item(open) else {
        return;
    };
    let Some(rect) = app.menu_bar.dropdown_rect(area, &app.state, open) else {
        return;
    };

    let style = app.state.style();
    let text = Style::default()
        .fg(style.color("dropdown-text"))
        .bg(style.color("dropdown-background"));

    frame.render_widget(Clear, rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(text.fg(style.color("dropdown-border")))
        .style(text);
    let inner = block.inner(rect);

    let lines: Vec<Line> = item
        .dropdown()
        .iter()
        .map(|entry| match entry {
            DropdownEntry::Row(label) => Line::from(Span::styled(format!(" {}", label), text)),
            DropdownEntry::Separator => Line::from(Span::styled(
                "─".repeat(inner.width as usize),
                text.fg(style.color("dropdown-border")),
            )),
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), rect);
}
