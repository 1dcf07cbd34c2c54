//! Structured error handling for the tournament core.
//!
//! Absence of data is only an error on the required-lookup path
//! ([`TourneyError::NotFound`]); plural-row queries and optional lookups
//! report emptiness through their return types. There is no retry policy
//! anywhere in this crate: every failure propagates to the caller, who owns
//! the retry decision.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TourneyError {
    /// A storage operation failed. Transactional writes roll back before
    /// this surfaces, and the underlying error is passed through unchanged.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A required single-row lookup produced zero rows. Carries the
    /// caller-supplied message, e.g. `"Player not found: alice"`.
    #[error("{0}")]
    NotFound(String),

    /// A compact textual timestamp did not match `YYYYMMDDHHMMSS`.
    #[error("Malformed timestamp: {0}")]
    MalformedTimestamp(String),

    /// The nomination feed violated its strictly-increasing activation
    /// order. Interval construction refuses to guess and fails fast.
    #[error("Nomination feed out of order: {0}")]
    NominationOrder(String),

    /// A demarcated transaction exceeded its caller-supplied deadline and
    /// was rolled back.
    #[error("Transaction exceeded deadline of {0}ms")]
    TransactionTimeout(u64),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, TourneyError>;
