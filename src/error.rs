// File: ./src/error.rs
//! Failure reasons surfaced to whoever asked for filters to be applied.
//!
//! The `Display` text of each variant is the status line shown to the user.

/// Result type alias using [`ApplyError`].
pub type Result<T> = std::result::Result<T, ApplyError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApplyError {
    /// Pasted text was empty or whitespace only.
    #[error("Please paste the item text.")]
    EmptyInput,

    /// Only the header and label:value lines were present.
    #[error("No valid stats found in the text.")]
    NoValidStats,

    /// The stored or supplied buffer percentage is not a number in 0..=100.
    #[error("Invalid minimum buffer '{0}': expected a percentage between 0 and 100.")]
    InvalidBuffer(String),

    /// The sink refused or failed to take the events.
    #[error("Failed to set filters.")]
    DeliveryFailure(String),
}
