//! Error types for board domain validation.

use super::TextField;
use thiserror::Error;

/// Errors returned while constructing or validating board values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// A required text field was empty.
    #[error("{0} is required")]
    Required(TextField),

    /// A text field exceeded its character limit.
    #[error("{field} is too long: {actual} characters exceeds the limit of {max}")]
    TooLong {
        /// The field that failed validation.
        field: TextField,
        /// Maximum number of characters permitted.
        max: usize,
        /// Number of characters supplied.
        actual: usize,
    },

    /// A position value was outside the 1-based ordinal range.
    #[error("invalid position {0}, expected an integer between 1 and {max}", max = u32::MAX)]
    InvalidPosition(u64),
}

/// Error returned while parsing a move direction from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown move direction: {0}")]
pub struct ParseDirectionError(pub String);
