//! Decimal literal parsing and normalization.
//!
//! Stored cell values are decimal text without exponents. A literal is
//! normalized before pattern synthesis: trailing fractional zeros are
//! stripped, redundant leading integer zeros are dropped, and negative
//! zero collapses to unsigned `0`.

use std::fmt;
use std::str::FromStr;

use super::errors::{NumericError, NumericResult};

/// A sign-aware decimal literal split into integer and fractional digit
/// runs.
///
/// Invariants after construction:
/// - the integer run is non-empty and has no leading zeros (except `"0"`)
/// - the fractional run, when present, never ends in `'0'`
/// - the value zero is never negative
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalLiteral {
    negative: bool,
    int_digits: String,
    frac_digits: String,
}

impl DecimalLiteral {
    /// Parses decimal text of the form `-?[0-9]+(\.[0-9]+)?`.
    ///
    /// Exponents, a leading `+`, a bare `.`, and empty digit runs are all
    /// rejected with [`NumericError::MalformedLiteral`].
    pub fn parse(text: &str) -> NumericResult<Self> {
        let malformed = || NumericError::MalformedLiteral(text.to_string());

        let unsigned = text.strip_prefix('-').unwrap_or(text);
        let mut negative = unsigned.len() != text.len();

        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((i, f)) => (i, f),
            None => (unsigned, ""),
        };
        if int_part.is_empty() {
            return Err(malformed());
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        // A dot must be followed by at least one digit.
        if unsigned.contains('.') && frac_part.is_empty() {
            return Err(malformed());
        }
        if !frac_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }

        let int_digits = int_part.trim_start_matches('0');
        let int_digits = if int_digits.is_empty() { "0" } else { int_digits };
        let frac_digits = frac_part.trim_end_matches('0');

        if int_digits == "0" && frac_digits.is_empty() {
            negative = false;
        }

        Ok(Self {
            negative,
            int_digits: int_digits.to_string(),
            frac_digits: frac_digits.to_string(),
        })
    }

    /// Returns true if the literal is strictly negative.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// The integer digit run (never empty).
    pub fn int_digits(&self) -> &str {
        &self.int_digits
    }

    /// The fractional digit run, or `None` for an integer literal.
    pub fn frac_digits(&self) -> Option<&str> {
        if self.frac_digits.is_empty() {
            None
        } else {
            Some(&self.frac_digits)
        }
    }

    /// Returns true if the normalized literal has no fractional part.
    pub fn is_integer(&self) -> bool {
        self.frac_digits.is_empty()
    }
}

impl FromStr for DecimalLiteral {
    type Err = NumericError;

    fn from_str(s: &str) -> NumericResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for DecimalLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "{}", self.int_digits)?;
        if !self.frac_digits.is_empty() {
            write!(f, ".{}", self.frac_digits)?;
        }
        Ok(())
    }
}

/// Checks whether `text` parses as a decimal literal.
pub fn is_decimal(text: &str) -> bool {
    DecimalLiteral::parse(text).is_ok()
}
