//! Request-level error taxonomy.
//!
//! Every error is terminal for the request it belongs to and maps to
//! exactly one status code. None of them is fatal to the server.

use thiserror::Error;

use crate::http::parser::ParseError;
use crate::http::response::StatusCode;

#[derive(Debug, Error)]
pub enum HttpError {
    /// Request line or header block did not parse.
    #[error("malformed request: {0}")]
    MalformedRequest(#[from] ParseError),

    #[error("no route for {0}")]
    RouteNotFound(String),

    #[error("method not allowed for {0}")]
    MethodNotAllowed(String),

    /// Missing file, missing header or missing body.
    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    #[error("storage write failed: {0}")]
    StorageWriteFailure(#[source] std::io::Error),
}

impl HttpError {
    /// Status code surfaced to the client.
    ///
    /// Malformed requests are answered with 404, not 400.
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::MalformedRequest(_) => StatusCode::NotFound,
            HttpError::RouteNotFound(_) => StatusCode::NotFound,
            HttpError::MethodNotAllowed(_) => StatusCode::MethodNotAllowed,
            HttpError::ResourceNotFound(_) => StatusCode::NotFound,
            HttpError::StorageWriteFailure(_) => StatusCode::InternalServerError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_taxonomy() {
        assert_eq!(
            HttpError::MalformedRequest(ParseError::InvalidMethod).status(),
            StatusCode::NotFound
        );
        assert_eq!(HttpError::RouteNotFound("/x".into()).status(), StatusCode::NotFound);
        assert_eq!(
            HttpError::MethodNotAllowed("/".into()).status(),
            StatusCode::MethodNotAllowed
        );
        assert_eq!(
            HttpError::StorageWriteFailure(std::io::Error::other("disk full")).status(),
            StatusCode::InternalServerError
        );
    }
}
