//! Error handling types and utilities.

use thiserror::Error;

/// A specialized Result type for confdocs operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Error raised while building the search-term index from the key catalog.
///
/// Term ownership must be unambiguous: every search term resolves to exactly
/// one canonical key. A conflicting alias in the input catalog is a data bug
/// upstream and must surface instead of being silently resolved either way.
#[derive(Debug, Clone, Error)]
pub enum TermIndexError {
    /// Two canonical keys claim the same search term.
    #[error("search term '{term}' is claimed by both '{first_key}' and '{second_key}'")]
    TermConflict {
        term: String,
        first_key: String,
        second_key: String,
    },
}
