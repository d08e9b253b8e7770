//! Core error types.

use thiserror::Error;

/// Core catalog errors.
///
/// Absence is deliberately not represented here: unknown schemas, tables and
/// annotations read as empty values, and an uninterpretable search query
/// degrades to an empty result set.
#[derive(Debug, Error)]
pub enum Error {
    /// Backing store unreachable, or a query against it failed.
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),

    /// Month number outside the 1-12 calendar range.
    #[error("invalid month number: {0}")]
    InvalidMonth(i32),
}

/// Convenience result alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
