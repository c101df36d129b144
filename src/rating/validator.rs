//! Quality rating validation shared by every save and advance gate.

use std::fmt;

use thiserror::Error;

/// Lowest accepted rating.
pub const MIN_QUALITY: i64 = 1;
/// Highest accepted rating.
pub const MAX_QUALITY: i64 = 10;

/// A rating known to lie within `MIN_QUALITY..=MAX_QUALITY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u8);

impl Quality {
    /// Build a rating from an integer, rejecting values outside the scale.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&value) {
            return Err(ValidationError::OutOfRange { value });
        }
        // Range check above keeps this lossless.
        Ok(Self(value as u8))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a raw quality string was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Nothing but whitespace was entered.
    #[error("Please enter a quality rating.")]
    EmptyInput,
    /// The text is not a base-10 integer.
    #[error("Quality must be a whole number between 1 and 10.")]
    NotAnInteger { raw: String },
    /// The integer falls outside the rating scale.
    #[error("Quality must be between 1 and 10.")]
    OutOfRange { value: i64 },
}

/// Parse the text typed into the quality field.
///
/// Surrounding whitespace is ignored. Integers too large for `i64` are still
/// integers, so they report `OutOfRange` rather than `NotAnInteger`.
pub fn validate(raw: &str) -> Result<Quality, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    match trimmed.parse::<i64>() {
        Ok(value) => Quality::new(value),
        Err(_) if is_integer_literal(trimmed) => Err(ValidationError::OutOfRange {
            value: if trimmed.starts_with('-') {
                i64::MIN
            } else {
                i64::MAX
            },
        }),
        Err(_) => Err(ValidationError::NotAnInteger {
            raw: trimmed.to_string(),
        }),
    }
}

fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
