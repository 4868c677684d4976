// TUI application state
//
// Everything the terminal view needs beyond the session itself: the search
// input line, which widget has focus, panel toggles, and scroll position.
// Key handling is pure: it returns an Action for the event loop to hand to
// the driver, so it can be tested without a terminal or a runtime.

use super::layout::grid_columns;
use crate::logging::LogBuffer;
use crate::session::Session;
use crate::sort::SortKey;
use chrono::Datelike;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Spinner frames for the loading indicator
const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];

/// Which widget receives typed keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Search,
    Sort,
}

/// What the event loop should ask the driver to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Submit(String),
    Sort(SortKey),
}

/// Main application state for the TUI
pub struct App {
    /// Current contents of the search box
    pub input: String,

    pub focus: Focus,

    /// Help/navigation panel (F1)
    pub show_help: bool,

    /// System log panel (F2)
    pub show_logs: bool,

    /// Whether the app should quit
    pub should_quit: bool,

    /// First visible row of the results grid, never past the last row
    pub scroll: u16,

    /// Terminal width at the last draw; decides how many cards share a row
    width: u16,

    /// Log buffer for system logs display
    pub log_buffer: LogBuffer,

    /// Year shown in the footer, fixed at startup
    pub footer_year: i32,

    /// Card width in columns
    pub card_width: u16,

    /// Rows given to a poster that has not finished loading
    pub poster_min_rows: u16,

    /// Animation frame counter (advanced on tick)
    frame: usize,
}

impl App {
    pub fn new(log_buffer: LogBuffer, card_width: u16, poster_min_rows: u16) -> Self {
        Self {
            input: String::new(),
            focus: Focus::default(),
            show_help: false,
            show_logs: false,
            should_quit: false,
            scroll: 0,
            width: 0,
            log_buffer,
            footer_year: chrono::Local::now().year(),
            card_width,
            poster_min_rows,
            frame: 0,
        }
    }

    pub fn tick_animation(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    pub fn spinner_char(&self) -> char {
        SPINNER[self.frame % SPINNER.len()]
    }

    /// Record the terminal width and pull `scroll` back onto the grid
    ///
    /// Called before every draw: a resize or a shorter result list can
    /// leave the old position past the end.
    pub fn sync_viewport(&mut self, width: u16, session: &Session) {
        self.width = width;
        self.scroll = self.scroll.min(self.max_scroll(session));
    }

    /// Index of the last grid row
    fn max_scroll(&self, session: &Session) -> u16 {
        let cards = session.container().children().len();
        let cols = grid_columns(self.width, self.card_width);
        let rows = cards.div_ceil(cols);
        u16::try_from(rows.saturating_sub(1)).unwrap_or(u16::MAX)
    }

    fn scroll_by(&mut self, delta: i32, session: &Session) {
        let target = (i32::from(self.scroll) + delta).max(0);
        let target = u16::try_from(target).unwrap_or(u16::MAX);
        self.scroll = target.min(self.max_scroll(session));
    }

    /// Translate a key press into state changes and, possibly, an action
    pub fn handle_key(&mut self, key: KeyEvent, session: &Session) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        // Global keys
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                return None;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return None;
            }
            KeyCode::F(1) => {
                self.show_help = !self.show_help;
                return None;
            }
            KeyCode::F(2) => {
                self.show_logs = !self.show_logs;
                return None;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.toggle_focus(session);
                return None;
            }
            KeyCode::Up => {
                self.scroll_by(-1, session);
                return None;
            }
            KeyCode::Down => {
                self.scroll_by(1, session);
                return None;
            }
            KeyCode::PageUp => {
                self.scroll_by(-10, session);
                return None;
            }
            KeyCode::PageDown => {
                self.scroll_by(10, session);
                return None;
            }
            _ => {}
        }

        match self.focus {
            Focus::Search => self.handle_search_key(key),
            Focus::Sort => self.handle_sort_key(key, session),
        }
    }

    fn toggle_focus(&mut self, session: &Session) {
        self.focus = match self.focus {
            Focus::Search if session.sort_visible() => Focus::Sort,
            _ => Focus::Search,
        };
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Enter => {
                self.scroll = 0;
                Some(Action::Submit(self.input.clone()))
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                None
            }
            _ => None,
        }
    }

    fn handle_sort_key(&mut self, key: KeyEvent, session: &Session) -> Option<Action> {
        let current = session.sort();
        let key = match key.code {
            KeyCode::Right => current.map_or(SortKey::ALL[0], SortKey::next),
            KeyCode::Left => current.map_or(SortKey::ALL[SortKey::ALL.len() - 1], SortKey::prev),
            KeyCode::Char(c @ '1'..='4') => SortKey::ALL[(c as usize) - ('1' as usize)],
            // Typing while the sort bar has focus goes back to the search box
            KeyCode::Char(c) => {
                self.focus = Focus::Search;
                self.input.push(c);
                return None;
            }
            _ => return None,
        };
        self.scroll = 0;
        Some(Action::Sort(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movie::MovieSummary;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        App::new(LogBuffer::new(), 24, 4)
    }

    fn displaying() -> Session {
        let mut session = Session::new(6);
        let ticket = session.submit("heat").unwrap();
        let settle = session
            .complete_search(
                ticket.generation,
                Ok(vec![MovieSummary::new("Heat", "1995", "")]),
            )
            .unwrap();
        session.settle(settle.generation);
        session
    }

    #[test]
    fn test_typing_then_enter_submits_input() {
        let mut app = app();
        let session = Session::new(6);
        for c in "alien".chars() {
            assert_eq!(app.handle_key(press(KeyCode::Char(c)), &session), None);
        }
        app.handle_key(press(KeyCode::Backspace), &session);
        assert_eq!(
            app.handle_key(press(KeyCode::Enter), &session),
            Some(Action::Submit("alie".to_string()))
        );
    }

    #[test]
    fn test_tab_ignored_until_sort_bar_visible() {
        let mut app = app();
        app.handle_key(press(KeyCode::Tab), &Session::new(6));
        assert_eq!(app.focus, Focus::Search);

        let session = displaying();
        app.handle_key(press(KeyCode::Tab), &session);
        assert_eq!(app.focus, Focus::Sort);
        app.handle_key(press(KeyCode::Tab), &session);
        assert_eq!(app.focus, Focus::Search);
    }

    #[test]
    fn test_sort_bar_cycles_keys() {
        let mut app = app();
        let session = displaying();
        app.focus = Focus::Sort;

        assert_eq!(
            app.handle_key(press(KeyCode::Right), &session),
            Some(Action::Sort(SortKey::TitleAsc))
        );
        assert_eq!(
            app.handle_key(press(KeyCode::Left), &session),
            Some(Action::Sort(SortKey::YearDesc))
        );
        assert_eq!(
            app.handle_key(press(KeyCode::Char('3')), &session),
            Some(Action::Sort(SortKey::YearAsc))
        );
    }

    #[test]
    fn test_quit_keys() {
        let session = Session::new(6);
        let mut by_esc = app();
        by_esc.handle_key(press(KeyCode::Esc), &session);
        assert!(by_esc.should_quit);

        let mut by_ctrl_c = app();
        by_ctrl_c.handle_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &session,
        );
        assert!(by_ctrl_c.should_quit);
        assert!(by_ctrl_c.input.is_empty());
    }

    #[test]
    fn test_scroll_stops_at_last_row() {
        let mut session = Session::new(6);
        let ticket = session.submit("alien").unwrap();
        let movies = (0..5)
            .map(|i| MovieSummary::new(format!("Alien {}", i), "1979", ""))
            .collect();
        let settle = session.complete_search(ticket.generation, Ok(movies)).unwrap();
        session.settle(settle.generation);

        // 24-wide cards at 49 columns: two per row, three rows
        let mut app = app();
        app.sync_viewport(49, &session);
        app.handle_key(press(KeyCode::PageDown), &session);
        assert_eq!(app.scroll, 2);
        app.handle_key(press(KeyCode::Down), &session);
        assert_eq!(app.scroll, 2);

        // One step up moves the view right away
        app.handle_key(press(KeyCode::Up), &session);
        assert_eq!(app.scroll, 1);
        app.handle_key(press(KeyCode::PageUp), &session);
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn test_wider_terminal_pulls_scroll_back() {
        let mut session = Session::new(6);
        let ticket = session.submit("alien").unwrap();
        let movies = (0..4)
            .map(|i| MovieSummary::new(format!("Alien {}", i), "1979", ""))
            .collect();
        let settle = session.complete_search(ticket.generation, Ok(movies)).unwrap();
        session.settle(settle.generation);

        let mut app = app();
        app.sync_viewport(30, &session);
        app.handle_key(press(KeyCode::PageDown), &session);
        assert_eq!(app.scroll, 3);

        // Four cards fit on one row at 120 columns
        app.sync_viewport(120, &session);
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn test_panel_toggles() {
        let session = Session::new(6);
        let mut app = app();
        app.handle_key(press(KeyCode::F(1)), &session);
        app.handle_key(press(KeyCode::F(2)), &session);
        assert!(app.show_help && app.show_logs);
        app.handle_key(press(KeyCode::F(1)), &session);
        assert!(!app.show_help);
    }
}
