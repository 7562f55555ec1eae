//! ISO 4217 currency code.

use serde::Serialize;
use std::fmt;

use crate::error::RateError;

/// A currency identified by its three-letter code.
///
/// Only constructible through [`Currency::new`], which validates and upper-cases
/// the code, so two currencies are equal iff their normalized codes match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// Validates `code` and creates a Currency.
    ///
    /// # Validation
    /// Checks run in order and the first failure wins:
    /// - code is empty or whitespace-only
    /// - code is not exactly 3 characters long
    /// - code contains a non-letter character
    pub fn new(code: &str) -> Result<Self, RateError> {
        if code.trim().is_empty() {
            return Err(RateError::CurrencyCodeMissing);
        }

        let length = code.chars().count();
        if length != 3 {
            return Err(RateError::CurrencyCodeInvalidLength {
                code: code.to_string(),
                length,
            });
        }

        if !code.chars().all(char::is_alphabetic) {
            return Err(RateError::CurrencyCodeInvalidCharacters(code.to_string()));
        }

        Ok(Self(code.chars().map(uppercase_char).collect()))
    }

    /// Returns the normalized code.
    pub fn code(&self) -> &str {
        &self.0
    }
}

/// Upper-cases one character, keeping it as-is when its uppercase form is
/// longer than one character (e.g. `ß` -> `SS`), so the code stays 3 chars long.
fn uppercase_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

impl AsRef<str> for Currency {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Currency {
    type Err = RateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
