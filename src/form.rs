//! The query form: query text, last answer and the loading flag.
//!
//! `QueryForm` owns all user-visible state. The submit path is split into
//! [`QueryForm::begin_submit`] and [`QueryForm::complete_submit`] so that an
//! interactive frontend can keep handling input while the request is in
//! flight; [`QueryForm::submit`] composes both for blocking callers.

use tracing::{error, info};

use crate::client::{QueryClientTrait, QueryError};

/// Text shown in place of an answer when a query fails for any reason.
pub const ERROR_MESSAGE: &str = "An error occurred while fetching the answer.";

/// What the form should display, derived purely from its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormView<'a> {
    /// Nothing submitted yet, or the last answer was empty
    Idle,
    /// A request is in flight; the answer panel is hidden
    Loading,
    /// The most recent answer (or the error message)
    Answered(&'a str),
}

/// How a submission resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Answered,
    Failed,
}

/// Form state for a single question/answer surface.
///
/// `is_loading` is true only between `begin_submit` and `complete_submit`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryForm {
    query: String,
    answer: String,
    is_loading: bool,
}

impl QueryForm {
    /// Creates an empty, idle form.
    ///
    /// # Examples
    ///
    /// ```
    /// use askdocs::form::{FormView, QueryForm};
    ///
    /// let form = QueryForm::new();
    /// assert_eq!(form.query(), "");
    /// assert_eq!(form.view(), FormView::Idle);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Whether the submit control accepts a submission right now.
    pub fn can_submit(&self) -> bool {
        !self.is_loading
    }

    /// Replaces the query text. No validation is applied.
    pub fn on_query_change(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    /// Starts a submission.
    ///
    /// Sets the loading flag and returns the query to send, or `None` if a
    /// request is already in flight (the submit control is disabled).
    /// An empty query is returned as-is.
    pub fn begin_submit(&mut self) -> Option<String> {
        if self.is_loading {
            return None;
        }
        self.is_loading = true;
        info!(query_len = self.query.len(), "submitting query");
        Some(self.query.clone())
    }

    /// Resolves the in-flight submission with the backend's result.
    ///
    /// Failures are logged and replaced by [`ERROR_MESSAGE`]; they are never
    /// returned to the caller.
    pub fn complete_submit(&mut self, result: Result<String, QueryError>) -> SubmitOutcome {
        let outcome = match result {
            Ok(answer) => {
                self.answer = answer;
                SubmitOutcome::Answered
            }
            Err(e) => {
                error!(error = %e, "Error fetching answer");
                self.answer = ERROR_MESSAGE.to_string();
                SubmitOutcome::Failed
            }
        };
        self.is_loading = false;
        outcome
    }

    /// Submits the current query and blocks until the backend responds.
    ///
    /// Returns `None` if a submission is already in flight.
    pub fn submit(&mut self, client: &dyn QueryClientTrait) -> Option<SubmitOutcome> {
        let query = self.begin_submit()?;
        let result = client.query(&query);
        Some(self.complete_submit(result))
    }

    /// Returns what should be displayed for the current state.
    pub fn view(&self) -> FormView<'_> {
        if self.is_loading {
            FormView::Loading
        } else if !self.answer.is_empty() {
            FormView::Answered(&self.answer)
        } else {
            FormView::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every query it receives and replies from a script.
    struct ScriptedClient {
        replies: Mutex<Vec<Result<String, QueryError>>>,
        seen: Mutex<Vec<String>>,
    }

    impl ScriptedClient {
        fn new(mut replies: Vec<Result<String, QueryError>>) -> Self {
            replies.reverse();
            Self {
                replies: Mutex::new(replies),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn seen(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl QueryClientTrait for ScriptedClient {
        fn query(&self, query: &str) -> Result<String, QueryError> {
            self.seen.lock().unwrap().push(query.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop()
                .expect("no scripted reply left")
        }
    }

    #[test]
    fn new_form_is_idle() {
        let form = QueryForm::new();
        assert_eq!(form.query(), "");
        assert_eq!(form.answer(), "");
        assert!(!form.is_loading());
        assert!(form.can_submit());
        assert_eq!(form.view(), FormView::Idle);
    }

    #[test]
    fn query_change_replaces_text() {
        let mut form = QueryForm::new();
        form.on_query_change("first");
        form.on_query_change("  second, with spaces  ");
        assert_eq!(form.query(), "  second, with spaces  ");
    }

    #[test]
    fn begin_submit_sets_loading_and_disables_submit() {
        let mut form = QueryForm::new();
        form.on_query_change("What is the answer?");

        let sent = form.begin_submit();
        assert_eq!(sent.as_deref(), Some("What is the answer?"));
        assert!(form.is_loading());
        assert!(!form.can_submit());
        assert_eq!(form.view(), FormView::Loading);

        // A second submission while in flight is refused
        assert_eq!(form.begin_submit(), None);
    }

    #[test]
    fn loading_hides_previous_answer() {
        let mut form = QueryForm::new();
        form.begin_submit();
        form.complete_submit(Ok("old answer".to_string()));
        assert_eq!(form.view(), FormView::Answered("old answer"));

        form.begin_submit();
        assert_eq!(form.view(), FormView::Loading);
    }

    #[test]
    fn successful_submit_shows_answer() {
        let client = ScriptedClient::new(vec![Ok("42".to_string())]);
        let mut form = QueryForm::new();
        form.on_query_change("What is the answer?");

        let outcome = form.submit(&client);

        assert_eq!(outcome, Some(SubmitOutcome::Answered));
        assert_eq!(form.view(), FormView::Answered("42"));
        assert!(!form.is_loading());
        assert_eq!(client.seen(), vec!["What is the answer?"]);
    }

    #[test]
    fn failed_submit_shows_error_message() {
        let client = ScriptedClient::new(vec![Err(QueryError::Http { status: 500 })]);
        let mut form = QueryForm::new();
        form.on_query_change("anything");

        let outcome = form.submit(&client);

        assert_eq!(outcome, Some(SubmitOutcome::Failed));
        assert_eq!(form.view(), FormView::Answered(ERROR_MESSAGE));
        assert!(!form.is_loading());
    }

    #[test]
    fn sequential_submits_show_latest_result() {
        let client = ScriptedClient::new(vec![
            Ok("first answer".to_string()),
            Ok("second answer".to_string()),
        ]);
        let mut form = QueryForm::new();
        form.on_query_change("same question");

        form.submit(&client);
        form.submit(&client);

        assert_eq!(client.seen().len(), 2);
        assert_eq!(form.answer(), "second answer");
    }

    #[test]
    fn error_then_success_replaces_error_message() {
        let client = ScriptedClient::new(vec![
            Err(QueryError::InvalidUrl("x".to_string())),
            Ok("recovered".to_string()),
        ]);
        let mut form = QueryForm::new();

        form.submit(&client);
        assert_eq!(form.answer(), ERROR_MESSAGE);
        form.submit(&client);
        assert_eq!(form.answer(), "recovered");
    }

    #[test]
    fn empty_query_is_still_submitted() {
        let client = ScriptedClient::new(vec![Ok("ok".to_string())]);
        let mut form = QueryForm::new();

        form.submit(&client);

        assert_eq!(client.seen(), vec![""]);
    }

    #[test]
    fn empty_answer_renders_as_idle() {
        let mut form = QueryForm::new();
        form.begin_submit();
        form.complete_submit(Ok(String::new()));
        assert_eq!(form.view(), FormView::Idle);
    }

    #[test]
    fn submit_refused_while_in_flight() {
        let client = ScriptedClient::new(Vec::new());
        let mut form = QueryForm::new();
        form.begin_submit();

        assert_eq!(form.submit(&client), None);
        assert!(client.seen().is_empty());
    }
}
