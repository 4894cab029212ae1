//! Transport errors for the tracker backend

/// Failure talking to the tracker's REST API
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request never produced a response
    #[error("tracker request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The tracker answered with a non-2xx status
    #[error("tracker returned status {status} for {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// The requested URL
        url: String,
    },

    /// The response body was not the expected JSON shape
    #[error("could not decode tracker response: {0}")]
    Decode(#[source] reqwest::Error),
}
