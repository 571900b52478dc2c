//! Error types for build requests
//!
//! Parsing never fails (see [`crate::parsers::ParseMismatch`] for the soft
//! events it records); everything here comes from sending a query and
//! reading the service's answer.

use reqwest::StatusCode;

/// Errors returned by [`crate::client::BuildClient`] and
/// [`crate::session::BuildSession`]
#[derive(Debug, thiserror::Error)]
pub enum ForgeError {
    /// The query was blank; nothing was sent
    #[error("Please enter a valid question.")]
    EmptyQuery,

    /// The query does not mention PC building; nothing was sent
    #[error("Your question doesn't seem to be about PC building or hardware.")]
    OffTopic,

    /// A request from the same session has not completed yet
    #[error("A build request is already in progress")]
    RequestInFlight,

    /// The configured server URL could not be used
    #[error("Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request could not be sent or timed out
    #[error("Failed to reach the build service: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Build service returned {0}")]
    Status(StatusCode),

    /// The service refused the query with an explanation
    #[error("{0}")]
    Rejected(String),

    /// A success response whose body could not be decoded
    #[error("Failed to decode build service response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ForgeError {
    /// True for failures of the request/response exchange itself, as
    /// opposed to local checks made before sending
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ForgeError::Transport(_)
                | ForgeError::Status(_)
                | ForgeError::Rejected(_)
                | ForgeError::Decode(_)
        )
    }
}
