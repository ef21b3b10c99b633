use thiserror::Error;

use crate::http::Response;

/// Error type for HubSpot API operations.
///
/// - `RequestFailed` — network/transport errors (wraps `reqwest::Error`)
/// - `Status` — any non-2xx status code, carrying the wrapped response
/// - `Deserialization` — a response body did not match the requested type
/// - `MissingCredentials` — an authenticated call without a key or token
/// - `InvalidHeader` — a header name or value was rejected
/// - `Config` — the client configuration could not be assembled
#[derive(Debug, Error)]
pub enum HubSpotError {
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status {
        status: u16,
        message: String,
        response: Box<Response>,
    },

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("You must provide a HubSpot api key or token")]
    MissingCredentials,

    #[error("Invalid header {name}: {message}")]
    InvalidHeader { name: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl HubSpotError {
    /// Build a `Status` error from a non-2xx response.
    ///
    /// HubSpot error bodies carry a `message` field; when it is missing the
    /// message falls back to the status's canonical reason.
    pub fn from_response(response: Response) -> Self {
        let status = response.status();
        let message = response
            .get("message")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| {
                reqwest::StatusCode::from_u16(status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Unknown status")
                    .to_string()
            });

        HubSpotError::Status {
            status,
            message,
            response: Box::new(response),
        }
    }

    /// HTTP status of the failed call, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            HubSpotError::Status { status, .. } => Some(*status),
            HubSpotError::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The wrapped response of a non-2xx call.
    pub fn response(&self) -> Option<&Response> {
        match self {
            HubSpotError::Status { response, .. } => Some(response),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, HubSpotError>;
