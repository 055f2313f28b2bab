//! Planning client error types

use thiserror::Error;

use crate::domain::EMPTY_INPUT_MESSAGE;

/// Errors that can occur while planning a trip
///
/// Every variant is caught at the request boundary and turned into the
/// `Failed` request state; none of them terminate the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// Input was empty after trimming; no request was sent
    #[error("{}", EMPTY_INPUT_MESSAGE)]
    EmptyInput,

    /// Non-2xx status, network failure, timeout, or undecodable body
    #[error("Failed to plan trip: {detail}")]
    Transport { status: Option<u16>, detail: String },

    /// The service answered 2xx but reported a logical failure
    #[error("{0}")]
    Service(String),

    /// The service answered 2xx with neither an itinerary nor an error
    #[error("The planning service returned neither an itinerary nor an error")]
    AmbiguousEmptyResponse,

    /// Artifact GET failed: non-2xx status, network failure, or a broken body
    #[error("Failed to download artifact: {detail}")]
    Download { status: Option<u16>, detail: String },

    /// A downloaded artifact could not be written locally
    #[error("Failed to save {path}: {detail}")]
    Io { path: String, detail: String },
}

impl PlanError {
    /// Transport failure for a non-success HTTP status
    pub fn http_status(status: u16) -> Self {
        Self::Transport {
            status: Some(status),
            detail: format!("HTTP error! status: {}", status),
        }
    }

    /// Transport failure raised by the HTTP stack itself
    pub fn network(err: reqwest::Error) -> Self {
        let (status, detail) = describe(&err);
        Self::Transport { status, detail }
    }

    /// Artifact download answered with a non-success HTTP status
    pub fn download_status(status: u16) -> Self {
        Self::Download {
            status: Some(status),
            detail: format!("HTTP error! status: {}", status),
        }
    }

    /// Artifact download failed inside the HTTP stack
    pub fn download_network(err: reqwest::Error) -> Self {
        let (status, detail) = describe(&err);
        Self::Download { status, detail }
    }

    /// Check if this came from the HTTP layer rather than the service payload
    pub fn is_transport(&self) -> bool {
        matches!(self, PlanError::Transport { .. } | PlanError::Download { .. })
    }

    /// HTTP status code, when one is known
    pub fn status(&self) -> Option<u16> {
        match self {
            PlanError::Transport { status, .. } | PlanError::Download { status, .. } => *status,
            _ => None,
        }
    }
}

fn describe(err: &reqwest::Error) -> (Option<u16>, String) {
    let status = err.status().map(|s| s.as_u16());
    let detail = if err.is_timeout() {
        format!("request timed out ({})", err)
    } else if err.is_decode() {
        format!("invalid response body ({})", err)
    } else {
        err.to_string()
    };
    (status, detail)
}
