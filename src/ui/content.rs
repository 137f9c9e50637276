use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::state::{StyleSheet, Theme};

use super::app::{App, Focus};

/// Line of the content block the theme button is drawn on.
const THEME_BUTTON_LINE: u16 = 3;

const SHORTCUT_HELP: [(&str, &str); 12] = [
    ("Alt + F", "File Menu"),
    ("Alt + E", "Edit Menu"),
    ("Alt + V", "View Menu"),
    ("Alt + P", "Project Menu"),
    ("Alt + T", "Tools Menu"),
    ("Alt + H", "Help Menu"),
    ("Ctrl + N", "New Project"),
    ("Ctrl + O", "Open Project"),
    ("Ctrl + S", "Save Project"),
    ("Right Click", "Context Menu"),
    ("Tab", "Move focus"),
    ("Ctrl + Q", "Quit"),
];

fn theme_button_label(theme: Theme) -> String {
    format!("[ Switch to {} Theme ]", theme.toggled().title())
}

/// Cells occupied by the theme switch button inside the content area.
pub fn theme_button_area(area: Rect, theme: Theme) -> Rect {
    let inner = content_block(&StyleSheet::default()).inner(area);
    let width = theme_button_label(theme).width() as u16;
    Rect::new(inner.x, inner.y + THEME_BUTTON_LINE, width, 1).intersection(inner)
}

fn content_block(style: &StyleSheet) -> Block<'static> {
    Block::default()
        .title(" rpgkit ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(style.color("menu-border")))
}

/// Render the welcome text, theme switch and shortcut list.
pub fn render_content(frame: &mut Frame, area: Rect, app: &App) {
    let style = app.state.style();
    let text = Style::default().fg(style.color("text-color"));
    let secondary = Style::default().fg(style.color("secondary-text-color"));

    let button_style = if app.focus == Focus::ThemeButton {
        Style::default()
            .fg(style.color("menu-text"))
            .bg(style.color("menu-hover"))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(style.color("menu-text"))
            .bg(style.color("menu-background"))
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "RPG Toolkit 5",
            text.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Welcome to the modern RPG development toolkit",
            secondary,
        )),
        Line::from(""),
        Line::from(Span::styled(
            theme_button_label(app.state.theme()),
            button_style,
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Keyboard Shortcuts:",
            text.add_modifier(Modifier::BOLD),
        )),
    ];

    for (keys, description) in SHORTCUT_HELP {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<12}", keys), text.add_modifier(Modifier::BOLD)),
            Span::styled(format!("- {}", description), secondary),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(content_block(style))
        .style(Style::default().bg(style.color("background-color")));
    frame.render_widget(paragraph, area);
}
