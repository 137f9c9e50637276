use std::io::{self, IsTerminal};
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Paragraph};
use thiserror::Error;

use crate::config::Config;
use crate::debug_log;
use crate::menu::{
    Command, ContextClick, ContextMenu, MENU_BAR_HEIGHT, MenuAction, MenuBar, command_for_ctrl_key,
    menu_for_alt_key,
};
use crate::state::{ActionLog, MenuId, UiState};

use super::content::{render_content, theme_button_area};
use super::context_menu::render_context_menu;
use super::menu_bar::{render_dropdown, render_menu_bar};

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("stdout is not an interactive terminal")]
    NotATerminal,

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Which control has keyboard focus.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    None,
    Menu(MenuId),
    ThemeButton,
}

/// The fixed right-click action list.
pub fn context_menu_items() -> Vec<MenuAction> {
    vec![
        MenuAction::item("Cut", Command::ContextCut).with_shortcut("Ctrl+X"),
        MenuAction::item("Copy", Command::ContextCopy).with_shortcut("Ctrl+C"),
        MenuAction::item("Paste", Command::ContextPaste).with_shortcut("Ctrl+V"),
        MenuAction::Separator,
        MenuAction::item("Select All", Command::SelectAll).with_shortcut("Ctrl+A"),
        MenuAction::Separator,
        MenuAction::item("Properties", Command::Properties),
    ]
}

/// Application shell: menu bar, content, status line and context menu.
pub struct App {
    /// Shared UI state.
    pub state: UiState,

    pub menu_bar: MenuBar,

    pub context_menu: ContextMenu,

    /// Which control has focus.
    pub focus: Focus,

    /// Whether the app should quit.
    pub should_quit: bool,

    /// Last action or notice, shown on the bottom row.
    pub status_message: Option<String>,

    /// Last known terminal size.
    pub last_size: (u16, u16),

    action_log: ActionLog,
}

impl App {
    /// Build the shell and apply the configured theme and shortcuts.
    pub fn new(config: &Config, action_log: ActionLog) -> Self {
        let mut state = UiState::new();
        state.subscribe(debug_log::log_state_change);

        for (action, text) in &config.shortcuts {
            state.set_shortcut(action.as_str(), text.as_str());
        }
        state.set_theme(config.theme);

        Self {
            state,
            menu_bar: MenuBar::new(),
            context_menu: ContextMenu::new(),
            focus: Focus::default(),
            should_quit: false,
            status_message: None,
            last_size: (0, 0),
            action_log,
        }
    }

    /// Run the application main loop.
    pub fn run(&mut self) -> Result<(), ShellError> {
        if !io::stdout().is_terminal() {
            return Err(ShellError::NotATerminal);
        }

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        // Re-assert the theme now that the screen exists.
        self.state.set_theme(self.state.theme());

        let result = self.main_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<(), ShellError> {
        loop {
            let size = terminal.size()?;
            self.last_size = (size.width, size.height);
            let screen = self.screen();
            self.context_menu.place(screen);

            terminal.draw(|frame| self.render(frame))?;

            if event::poll(Duration::from_millis(100))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }

            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    /// Whole-screen area as of the last frame.
    pub fn screen(&self) -> Rect {
        Rect::new(0, 0, self.last_size.0, self.last_size.1)
    }

    /// Area between the menu bar and the status line.
    pub fn content_area(&self) -> Rect {
        let screen = self.screen();
        Rect {
            x: screen.x,
            y: screen.y + MENU_BAR_HEIGHT,
            width: screen.width,
            height: screen.height.saturating_sub(MENU_BAR_HEIGHT + 1),
        }
    }

    pub fn render(&self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        let style = self.state.style();

        let background = Block::default().style(
            Style::default()
                .bg(style.color("background-color"))
                .fg(style.color("text-color")),
        );
        frame.render_widget(background, area);

        render_menu_bar(frame, area, self);
        render_content(frame, self.content_area(), self);

        if let Some(ref msg) = self.status_message {
            let status_area = Rect {
                x: area.x,
                y: area.height.saturating_sub(1),
                width: area.width,
                height: 1,
            };
            let status = Paragraph::new(msg.as_str())
                .style(Style::default().fg(style.color("secondary-text-color")));
            frame.render_widget(status, status_area);
        }

        render_dropdown(frame, area, self);
        render_context_menu(frame, &self.context_menu, &self.state);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        debug_log::log_key(&key);

        if let Some(outcome) = self.context_menu.handle_key(key) {
            if let ContextClick::Selected(command) = outcome {
                self.dispatch(command);
            }
            return;
        }

        if self.handle_global_shortcut(key) {
            return;
        }

        match &self.focus {
            Focus::Menu(id) => {
                if let Some(item) = self.menu_bar.item(id)
                    && item.handle_key(key, &mut self.state)
                {
                    return;
                }
            }
            Focus::ThemeButton => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.toggle_theme();
                    return;
                }
            }
            Focus::None => {}
        }

        match key.code {
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Tab => self.cycle_focus(true),
            KeyCode::BackTab => self.cycle_focus(false),
            KeyCode::Left => self.step_menu(false),
            KeyCode::Right => self.step_menu(true),
            KeyCode::Esc => {
                self.state.close_all_menus();
                self.focus = Focus::None;
            }
            _ => {}
        }
    }

    /// Alt+letter focuses a menu, Ctrl+letter runs an action. Both tables
    /// are consulted on every key, so Alt+Ctrl+V does both.
    fn handle_global_shortcut(&mut self, key: KeyEvent) -> bool {
        let KeyCode::Char(c) = key.code else {
            return false;
        };
        let mut handled = false;

        if key.modifiers.contains(KeyModifiers::ALT)
            && let Some(id) = menu_for_alt_key(c)
        {
            self.focus_menu(&id);
            handled = true;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL)
            && let Some(command) = command_for_ctrl_key(c)
        {
            self.dispatch(command);
            handled = true;
        }

        handled
    }

    /// Move focus to a menu label without opening it.
    pub fn focus_menu(&mut self, id: &MenuId) {
        if self.menu_bar.item(id).is_some_and(|item| item.is_focusable()) {
            self.focus = Focus::Menu(id.clone());
        }
    }

    /// Tab order: focusable menus left to right, then the theme button.
    fn cycle_focus(&mut self, forward: bool) {
        let mut order: Vec<Focus> = self
            .menu_bar
            .focus_order()
            .map(|id| Focus::Menu(id.clone()))
            .collect();
        order.push(Focus::ThemeButton);

        let len = order.len();
        let next = match order.iter().position(|f| *f == self.focus) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => i.checked_sub(1).unwrap_or(len - 1),
            None if forward => 0,
            None => len - 1,
        };
        self.focus = order.swap_remove(next);
    }

    /// Left/Right along the menu bar. An open dropdown follows the focus.
    fn step_menu(&mut self, forward: bool) {
        let Focus::Menu(current) = &self.focus else {
            return;
        };
        let order: Vec<&MenuId> = self.menu_bar.focus_order().collect();
        let Some(i) = order.iter().position(|id| *id == current) else {
            return;
        };
        let next = if forward {
            (i + 1) % order.len()
        } else {
            i.checked_sub(1).unwrap_or(order.len() - 1)
        };
        let next = order[next].clone();

        if self.state.is_open(current) {
            self.state.open_menu(&next);
        }
        self.focus = Focus::Menu(next);
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        debug_log::log_mouse(&mouse);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_click(mouse.column, mouse.row),
            MouseEventKind::Down(MouseButton::Right) => {
                self.open_context_menu(mouse.column, mouse.row)
            }
            _ => {}
        }
    }

    fn handle_click(&mut self, col: u16, row: u16) {
        match self.context_menu.click(col, row) {
            ContextClick::Selected(command) => {
                self.dispatch(command);
                return;
            }
            ContextClick::Inert => return,
            ContextClick::Outside | ContextClick::Ignored => {}
        }

        let screen = self.screen();
        for item in self.menu_bar.items() {
            if !self
                .menu_bar
                .item_contains(screen, &self.state, item, col, row)
            {
                item.click_outside(&mut self.state);
            }
        }

        // Dropdown rows are inert and cover whatever is drawn beneath them.
        if let Some(open) = self.state.current_menu()
            && self
                .menu_bar
                .dropdown_rect(screen, &self.state, open)
                .is_some_and(|rect| rect.contains((col, row).into()))
        {
            return;
        }

        if let Some(item) = self.menu_bar.item_at(screen, &self.state, col, row) {
            let id = item.id().clone();
            if item.activate(&mut self.state) {
                self.focus = Focus::Menu(id);
            }
            return;
        }

        let button = theme_button_area(self.content_area(), self.state.theme());
        if button.contains((col, row).into()) {
            self.focus = Focus::ThemeButton;
            self.toggle_theme();
            return;
        }

        if self.state.current_menu().is_none() {
            self.focus = Focus::None;
        }
    }

    /// Show the context menu at the pointer.
    pub fn open_context_menu(&mut self, col: u16, row: u16) {
        self.context_menu
            .open(col, row, context_menu_items(), &mut self.state);
    }

    pub fn toggle_theme(&mut self) {
        let theme = self.state.theme().toggled();
        self.state.set_theme(theme);
        self.action_log.log_theme_changed(theme);
        self.status_message = Some(format!("Switched to {} theme", theme));
    }

    /// Run a placeholder action.
    pub fn dispatch(&mut self, command: Command) {
        let description = command.describe();
        debug_log::log_debug(&format!("dispatch {description}"));
        self.action_log.log_action(description);
        self.status_message = Some(description.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Theme;
    use crossterm::event::KeyEventState;

    fn app() -> App {
        let mut app = App::new(&Config::default(), ActionLog::disabled());
        app.last_size = (80, 24);
        app
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn left_click(app: &mut App, column: u16, row: u16) {
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), column, row));
    }

    fn right_click(app: &mut App, column: u16, row: u16) {
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Right), column, row));
    }

    fn id(s: &str) -> MenuId {
        MenuId::new(s)
    }

    #[test]
    fn test_new_applies_theme_and_shortcuts() {
        let mut config = Config {
            theme: Theme::Light,
            ..Default::default()
        };
        config.shortcuts.insert("file".into(), "Alt+F".into());

        let app = App::new(&config, ActionLog::disabled());
        assert_eq!(app.state.theme(), Theme::Light);
        assert_eq!(app.state.shortcut("file"), Some("Alt+F"));
        assert_eq!(app.state.style().len(), 11);
    }

    #[test]
    fn test_alt_p_focuses_project_without_opening() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('p'), KeyModifiers::ALT));

        assert_eq!(app.focus, Focus::Menu(id("project")));
        assert!(app.state.current_menu().is_none());
    }

    #[test]
    fn test_alt_is_case_insensitive() {
        let mut app = app();
        app.handle_key(key(
            KeyCode::Char('H'),
            KeyModifiers::ALT | KeyModifiers::SHIFT,
        ));
        assert_eq!(app.focus, Focus::Menu(id("help")));
    }

    #[test]
    fn test_ctrl_shortcut_dispatches() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert_eq!(app.status_message.as_deref(), Some("Save Project"));
    }

    #[test]
    fn test_unbound_ctrl_key_does_nothing() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('a'), KeyModifiers::CONTROL));
        assert!(app.status_message.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_alt_and_ctrl_both_fire() {
        let mut app = app();
        app.handle_key(key(
            KeyCode::Char('v'),
            KeyModifiers::ALT | KeyModifiers::CONTROL,
        ));
        assert_eq!(app.focus, Focus::Menu(id("view")));
        assert_eq!(app.status_message.as_deref(), Some("Paste"));
    }

    #[test]
    fn test_enter_opens_focused_menu() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('f'), KeyModifiers::ALT));
        app.handle_key(key(KeyCode::Enter, KeyModifiers::NONE));
        assert!(app.state.is_open(&id("file")));

        app.handle_key(key(KeyCode::Right, KeyModifiers::NONE));
        assert_eq!(app.focus, Focus::Menu(id("edit")));
        assert!(app.state.is_open(&id("edit")));

        app.handle_key(key(KeyCode::Esc, KeyModifiers::NONE));
        assert!(app.state.current_menu().is_none());
    }

    #[test]
    fn test_tab_cycles_focus() {
        let mut app = app();
        app.handle_key(key(KeyCode::Tab, KeyModifiers::NONE));
        assert_eq!(app.focus, Focus::Menu(id("file")));

        app.handle_key(key(KeyCode::BackTab, KeyModifiers::SHIFT));
        assert_eq!(app.focus, Focus::ThemeButton);

        app.handle_key(key(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(app.state.theme(), Theme::Light);
    }

    #[test]
    fn test_ctrl_q_quits() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_click_label_toggles_and_switches() {
        let mut app = app();
        left_click(&mut app, 2, 0);
        assert!(app.state.is_open(&id("file")));
        assert_eq!(app.focus, Focus::Menu(id("file")));

        left_click(&mut app, 8, 0);
        assert!(app.state.is_open(&id("edit")));
        assert!(!app.state.is_open(&id("file")));

        left_click(&mut app, 8, 0);
        assert!(app.state.current_menu().is_none());
    }

    #[test]
    fn test_click_inside_dropdown_keeps_open() {
        let mut app = app();
        left_click(&mut app, 2, 0);
        left_click(&mut app, 4, 2);
        assert!(app.state.is_open(&id("file")));
    }

    #[test]
    fn test_dropdown_row_over_theme_button_is_inert() {
        let mut app = app();
        left_click(&mut app, 8, 0);
        assert!(app.state.is_open(&id("edit")));

        let screen = app.screen();
        let dropdown = app
            .menu_bar
            .dropdown_rect(screen, &app.state, &id("edit"))
            .unwrap();
        let button = theme_button_area(app.content_area(), app.state.theme());
        // The "Cut" row of the Edit dropdown is drawn over the theme button.
        assert!(dropdown.contains((9, 5).into()));
        assert!(button.contains((9, 5).into()));

        left_click(&mut app, 9, 5);
        assert_eq!(app.state.theme(), Theme::Dark);
        assert!(app.state.is_open(&id("edit")));
        assert_eq!(app.focus, Focus::Menu(id("edit")));
    }

    #[test]
    fn test_click_outside_closes_menu() {
        let mut app = app();
        left_click(&mut app, 2, 0);
        left_click(&mut app, 60, 15);
        assert!(app.state.current_menu().is_none());
    }

    #[test]
    fn test_right_click_opens_context_menu_and_closes_dropdown() {
        let mut app = app();
        left_click(&mut app, 2, 0);
        right_click(&mut app, 30, 10);

        assert!(app.context_menu.is_visible());
        assert_eq!(app.context_menu.position(), (30, 10));
        assert_eq!(app.context_menu.items().len(), 7);
        assert!(app.state.current_menu().is_none());

        let screen = app.screen();
        let placed = app.context_menu.place(screen).unwrap();
        assert_eq!((placed.x, placed.y), (30, 10));
    }

    #[test]
    fn test_context_copy_runs_once_and_closes() {
        let mut app = app();
        right_click(&mut app, 30, 10);
        let screen = app.screen();
        app.context_menu.place(screen);

        left_click(&mut app, 32, 12);
        assert_eq!(app.status_message.as_deref(), Some("Context Copy"));
        assert!(!app.context_menu.is_visible());
    }

    #[test]
    fn test_context_escape_runs_nothing() {
        let mut app = app();
        right_click(&mut app, 30, 10);
        app.handle_key(key(KeyCode::Esc, KeyModifiers::NONE));

        assert!(!app.context_menu.is_visible());
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_context_near_corner_stays_on_screen() {
        let mut app = app();
        right_click(&mut app, 79, 23);
        let screen = app.screen();
        let placed = app.context_menu.place(screen).unwrap();

        assert!(placed.right() <= 80);
        assert!(placed.bottom() <= 24);
    }

    #[test]
    fn test_theme_button_click() {
        let mut app = app();
        let button = theme_button_area(app.content_area(), app.state.theme());
        left_click(&mut app, button.x + 1, button.y);

        assert_eq!(app.state.theme(), Theme::Light);
        assert_eq!(app.focus, Focus::ThemeButton);
    }
}
