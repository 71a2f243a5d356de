//! Wire types for the `/query` endpoint.

use serde::{Deserialize, Serialize};

/// Request body sent to the query endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRequest<'a> {
    pub query: &'a str,
}

/// Response body returned by the query endpoint.
///
/// Only `answer` is read; any other fields the backend adds are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueryResponse {
    pub answer: String,
}
