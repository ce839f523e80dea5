//! Error types for interval parsing.

use thiserror::Error;

/// Errors produced when a PostgreSQL interval literal cannot be parsed.
///
/// Every variant carries the original input string so a decode layer can
/// report which column value was rejected.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input does not match the `<count> <unit> ... [HH:MM:SS[.ffffff]]`
    /// shape: wrong number of `:`-separated time parts, an unrecognized unit
    /// keyword, a unit-less trailing token, or an over-long fraction.
    #[error("malformed interval literal {0:?}")]
    InvalidFormat(String),

    /// A count, hour, minute, second or fraction token is not a valid integer.
    #[error("invalid number in interval literal {input:?}")]
    InvalidNumber {
        /// The original interval literal.
        input: String,
        #[source]
        cause: std::num::ParseIntError,
    },

    /// Minutes or seconds outside 0..=59.
    #[error("field out of range in interval literal {0:?}")]
    OutOfRange(String),

    /// The hour total does not fit the internal representation. Oversized
    /// intervals are rejected, never truncated.
    #[error("interval literal {0:?} overflows the hour field")]
    Overflow(String),
}
