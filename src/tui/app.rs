use std::sync::mpsc::{Receiver, TryRecvError};

use tracing::warn;

use crate::client::QueryError;
use crate::form::{FormView, QueryForm};

/// Channel end on which a worker delivers the result of one query.
pub type PendingQuery = Receiver<Result<String, QueryError>>;

/// Application state for the TUI.
///
/// Wraps the `QueryForm` together with the in-flight request, if any, and
/// the scroll offset of the answer panel.
#[derive(Debug)]
pub struct App {
    form: QueryForm,
    /// Result channel of the request currently in flight
    pending: Option<PendingQuery>,
    /// Scroll offset for the answer panel
    answer_scroll: u16,
}

impl App {
    /// Creates a new App with an empty, idle form.
    ///
    /// # Examples
    ///
    /// ```
    /// use askdocs::tui::App;
    ///
    /// let app = App::new();
    /// assert_eq!(app.form().query(), "");
    /// assert!(!app.has_pending());
    /// ```
    pub fn new() -> Self {
        Self {
            form: QueryForm::new(),
            pending: None,
            answer_scroll: 0,
        }
    }

    /// Returns the underlying form state.
    pub fn form(&self) -> &QueryForm {
        &self.form
    }

    /// Returns what the body of the screen should show.
    pub fn view(&self) -> FormView<'_> {
        self.form.view()
    }

    /// Returns whether a request is being tracked.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Appends a character to the query.
    pub fn push_query_char(&mut self, c: char) {
        let mut text = self.form.query().to_string();
        text.push(c);
        self.form.on_query_change(text);
    }

    /// Removes the last character of the query, if any.
    pub fn pop_query_char(&mut self) {
        let mut text = self.form.query().to_string();
        if text.pop().is_some() {
            self.form.on_query_change(text);
        }
    }

    /// Clears the query text.
    pub fn clear_query(&mut self) {
        self.form.on_query_change(String::new());
    }

    /// Starts a submission if the submit control is enabled.
    ///
    /// Returns the query to send; the caller is expected to dispatch it and
    /// hand the result channel to [`App::track_request`].
    pub fn submit(&mut self) -> Option<String> {
        let query = self.form.begin_submit()?;
        self.answer_scroll = 0;
        Some(query)
    }

    /// Registers the result channel for the submission in flight.
    pub fn track_request(&mut self, pending: PendingQuery) {
        self.pending = Some(pending);
    }

    /// Checks for a finished request without blocking.
    ///
    /// Returns `true` if the form state changed.
    pub fn poll_pending(&mut self) -> bool {
        let Some(pending) = &self.pending else {
            return false;
        };

        let result = match pending.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                warn!("query worker exited without sending a result");
                Err(QueryError::Interrupted)
            }
        };

        self.pending = None;
        self.form.complete_submit(result);
        true
    }

    /// Returns the current answer panel scroll offset.
    pub fn answer_scroll(&self) -> u16 {
        self.answer_scroll
    }

    /// Scrolls the answer panel down by the specified amount.
    pub fn scroll_answer_down(&mut self, amount: u16) {
        self.answer_scroll = self.answer_scroll.saturating_add(amount);
    }

    /// Scrolls the answer panel up by the specified amount.
    pub fn scroll_answer_up(&mut self, amount: u16) {
        self.answer_scroll = self.answer_scroll.saturating_sub(amount);
    }

    /// Caps the answer scroll offset so the last line stays at the bottom.
    pub fn clamp_answer_scroll(&mut self, max: u16) {
        self.answer_scroll = self.answer_scroll.min(max);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
