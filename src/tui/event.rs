//! Keyboard event handling for the TUI.
//!
//! Maps crossterm keyboard events to form edits, submissions and scrolling.
//! There is a single input, so printable keys always edit the query.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::App;

/// Lines scrolled by PageUp/PageDown.
const PAGE_SCROLL: u16 = 10;

/// What the event loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Keep running; state may have changed
    Continue,
    /// Dispatch this query to the backend
    Submit(String),
    /// Leave the TUI
    Quit,
}

/// Handles a keyboard event and updates the app state accordingly.
///
/// # Event Handling
///
/// - `Esc` / `Ctrl+C`: Quit
/// - `Enter`: Submit the query (ignored while a request is in flight)
/// - `Ctrl+U`: Clear the query
/// - `Backspace`: Delete the last character
/// - `Up`/`Down`, `PageUp`/`PageDown`: Scroll the answer
/// - Any other character: Append to the query
///
/// # Examples
///
/// ```
/// use askdocs::tui::{App, event::{KeyAction, handle_key_event}};
/// use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
///
/// let mut app = App::new();
/// let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
/// assert_eq!(handle_key_event(&mut app, key), KeyAction::Quit);
/// ```
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => return KeyAction::Quit,
        KeyCode::Char('c') if ctrl => return KeyAction::Quit,
        KeyCode::Enter => {
            return app.submit().map_or(KeyAction::Continue, KeyAction::Submit);
        }
        KeyCode::Char('u') if ctrl => app.clear_query(),
        KeyCode::Char(c) if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => {
            app.push_query_char(c);
        }
        KeyCode::Backspace => app.pop_query_char(),
        KeyCode::Down => app.scroll_answer_down(1),
        KeyCode::Up => app.scroll_answer_up(1),
        KeyCode::PageDown => app.scroll_answer_down(PAGE_SCROLL),
        KeyCode::PageUp => app.scroll_answer_up(PAGE_SCROLL),
        _ => {}
    }

    KeyAction::Continue
}
