use thiserror::Error;

/// SDK-specific error types for stake hub operations
#[derive(Debug, Error)]
pub enum StakeHubError {
    /// No wallet capability is present. Fatal for the session; there is no
    /// retry path.
    #[error("wallet unavailable")]
    WalletUnavailable,

    /// A session has already been established; reconnecting is not supported.
    #[error("session already established")]
    AlreadyConnected,

    /// No session has been established yet.
    #[error("no session established")]
    NotConnected,

    /// Amount failed local validation; nothing was submitted.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Another operation holds the single-flight slot.
    #[error("another operation is in flight")]
    OperationInFlight,

    /// The remote service definitively rejected the submission.
    #[error("submission rejected: {0}")]
    SubmissionRejected(String),

    /// The submission may or may not have been applied.
    #[error("submission outcome unknown: {0}")]
    AmbiguousSubmission(String),

    /// Reconciliation or history pull failed; prior local state was retained.
    #[error("fetch failed: {0}")]
    FetchFailed(String),

    /// Account data did not parse as a stake record.
    #[error("invalid record data: {0}")]
    InvalidRecordData(String),
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, StakeHubError>;
