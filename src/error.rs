//! Error types for option loading and prediction requests.

use thiserror::Error;

/// Failure while loading the choice lists a form needs before it can render.
///
/// Any of these blocks the whole view; a form never renders with a partial
/// set of choices.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("Could not load {path}: {reason}")]
    Fetch { path: String, reason: String },

    #[error("Could not load {path}: HTTP {status}")]
    Status { path: String, status: u16 },

    #[error("No valid data in {path}")]
    Empty { path: String },

    #[error("Malformed data in {path}: {reason}")]
    Malformed { path: String, reason: String },

    #[error("Invalid resource location {path}: {reason}")]
    Location { path: String, reason: String },

    #[error("Invalid batting options table: {0}")]
    Table(String),
}

/// Failure of a single prediction request. Shown inline; the form stays usable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error: {status} - {message}")]
    Server { status: u16, message: String },

    #[error("Could not encode request: {0}")]
    Encode(String),

    #[error("Could not decode prediction: {0}")]
    Decode(String),

    #[error("Invalid endpoint URL: {0}")]
    Endpoint(String),
}

/// Error surfaced by a [`crate::transport::Transport`] when no HTTP response
/// was obtained at all.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_mentions_http_code() {
        let err = LoadError::Status {
            path: "match_prediction/teams.txt".into(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "Could not load match_prediction/teams.txt: HTTP 404"
        );
    }

    #[test]
    fn server_error_formats_status_and_message() {
        let err = PredictError::Server {
            status: 500,
            message: "model not loaded".into(),
        };
        assert_eq!(err.to_string(), "Server error: 500 - model not loaded");
    }
}
