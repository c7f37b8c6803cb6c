use async_graphql::SerializerError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

/// Body of the 400 response sent when no query could be found
pub const MISSING_QUERY: &str = "Must provide query string.";

#[derive(Debug, thiserror::Error)]
pub enum ResponderError {
    /// The request cannot be served as sent
    #[error("{0}")]
    BadRequest(String),

    /// The engine's response could not be turned into a value
    #[error("failed to convert execution result: {0}")]
    Execution(#[from] SerializerError),
}

impl ResponderError {
    pub fn missing_query() -> Self {
        Self::BadRequest(MISSING_QUERY.to_string())
    }
}

impl IntoResponse for ResponderError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            Self::Execution(_) => {
                error!("GraphQL execution failed: {self}");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
        }
    }
}
