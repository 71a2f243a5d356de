pub mod client;
pub mod form;
pub mod logging;
pub mod tui;

pub use client::{QueryClient, QueryClientBuilder, QueryClientTrait, QueryError};
pub use form::{ERROR_MESSAGE, FormView, QueryForm, SubmitOutcome};
