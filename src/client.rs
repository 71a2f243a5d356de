/// Query endpoint HTTP client module.
///
/// This module provides a blocking HTTP client for posting questions to the
/// document Q&A backend, along with its error type and wire types.
mod http;
mod types;

pub use http::{DEFAULT_ENDPOINT, QueryClient, QueryClientBuilder, QueryClientTrait, QueryError};
pub use types::{QueryRequest, QueryResponse};
