use thiserror::Error;

/// Failure of a single category fetch.
///
/// The three kinds are reported separately for logging, but callers treat
/// them identically: any of them fails the whole analysis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExplorerError {
    /// Network or transport failure, including timeouts.
    #[error("explorer unavailable: {0}")]
    Unavailable(String),

    /// The response body could not be decoded into the expected record shape.
    #[error("malformed explorer response: {0}")]
    Malformed(String),

    /// The provider answered with an error status.
    #[error("explorer rejected request: {0}")]
    Rejected(String),
}
