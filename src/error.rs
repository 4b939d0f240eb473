//! Error type for the deserialization boundary.
//!
//! Leaderboard building itself is infallible; only turning an input document
//! into [`Restaurant`](crate::model::Restaurant) records can fail.

/// Errors produced while reading a restaurant dataset.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input was not a valid JSON array of restaurant records.
    #[error("invalid restaurant dataset: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
