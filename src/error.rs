//! Numeral Errors
//!
//! Only `NumberOutOfRange` is expected from untrusted input. The rest mean an
//! invariant between components was broken and must be propagated, never masked.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumeralError {
    #[error("Number exceeds maximum allowed value of +/- {max}")]
    NumberOutOfRange { value: i64, max: u64 },

    #[error("Digit group {0} is outside 0..=9999")]
    InvalidDigitGroup(u32),

    #[error("Invalid glyph size: {0} pixels")]
    InvalidSize(u32),

    #[error("Digit {0} has no stroke pattern (expected 1..=9)")]
    InvalidDigit(u8),
}

impl NumeralError {
    /// True for the one error a caller should report back to the client.
    pub fn is_client_error(&self) -> bool {
        matches!(self, NumeralError::NumberOutOfRange { .. })
    }
}
