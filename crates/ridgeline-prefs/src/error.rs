//! Error types for the preferences crate.

use thiserror::Error;

/// Errors returned by [`PrefListController`](crate::PrefListController)
/// entry points when the host addresses a row that does not exist or is
/// not in the expected state.
///
/// These cover host inputs that arrive from outside the crate (stale
/// indices after a section swap, picker callbacks racing a cancel).
/// In-crate invariant violations panic instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrefError {
    /// The section index is out of bounds.
    #[error("no section at index {0}")]
    InvalidSection(usize),

    /// The row index is out of bounds for its section.
    #[error("no row at index {row} in section {section}")]
    InvalidRow {
        /// Section index.
        section: usize,
        /// Row index within the section.
        row: usize,
    },

    /// A choice completion or cancellation arrived for a row with no open
    /// picker.
    #[error("no choice picker open for '{key}'")]
    NoPendingChoice {
        /// Key of the addressed item.
        key: String,
    },
}

/// Convenience alias for results with [`PrefError`].
pub type PrefResult<T> = std::result::Result<T, PrefError>;
