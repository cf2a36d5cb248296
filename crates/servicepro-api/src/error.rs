use thiserror::Error;

/// Errors returned by the ServicePro REST client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status. `message` is the body's
    /// `error` field when present.
    #[error("API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A shop record decoded but its coordinates are unusable.
    #[error("invalid shop record: {0}")]
    InvalidRecord(String),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ApiError {
    /// True when the remote collection could not be reached at all, as
    /// opposed to answering with an error.
    #[must_use]
    pub fn is_unreachable(&self) -> bool {
        match self {
            ApiError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            _ => false,
        }
    }
}

/// Errors returned by the OSRM routing client.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// OSRM answered but could not route (`NoRoute`, `NoSegment`, ...).
    #[error("no route found ({code}): {message}")]
    NoRoute { code: String, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
