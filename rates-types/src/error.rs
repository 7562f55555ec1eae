//! Error model for the exchange rates service.
//!
//! Every fallible operation returns `Result<T, RateError>`. Each variant carries a
//! dotted machine-readable code and an [`ErrorKind`] that the HTTP boundary uses to
//! pick a status code; the core itself never branches on the kind.

use rust_decimal::Decimal;

/// Machine-readable error codes.
pub mod codes {
    pub const VALIDATION_FAILED: &str = "Validation.Failed";
    pub const VALIDATION_INVALID_CURRENCY_CODE: &str = "Validation.InvalidCurrencyCode";
    pub const VALIDATION_INVALID_DATE: &str = "Validation.InvalidDate";
    pub const VALIDATION_INVALID_RATE: &str = "Validation.InvalidRate";
    pub const VALIDATION_INVALID_AMOUNT: &str = "Validation.InvalidAmount";
    pub const VALIDATION_CURRENCY_CODE_NULL_OR_WHITESPACE: &str =
        "Validation.CurrencyCodeNullOrWhitespace";
    pub const VALIDATION_CURRENCY_CODE_INVALID_LENGTH: &str = "Validation.CurrencyCodeInvalidLength";
    pub const VALIDATION_CURRENCY_CODE_INVALID_CHARACTERS: &str =
        "Validation.CurrencyCodeInvalidCharacters";

    pub const EXCHANGE_RATE_CURRENCY_NOT_FOUND: &str = "ExchangeRate.CurrencyNotFound";
    pub const EXCHANGE_RATE_SOURCE_UNAVAILABLE: &str = "ExchangeRate.SourceUnavailable";
    pub const EXCHANGE_RATE_NO_RATES_AVAILABLE: &str = "ExchangeRate.NoRatesAvailable";
}

/// Classifies an error for status code mapping at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Failure,
    Validation,
    NotFound,
    Unavailable,
}

/// Errors produced anywhere in the rates pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RateError {
    // ─────────────────────────────────────────────────────────────────────────
    // Currency construction
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Currency code is missing.")]
    CurrencyCodeMissing,

    #[error("Currency code must be exactly 3 characters. Got '{code}' with length {length}.")]
    CurrencyCodeInvalidLength { code: String, length: usize },

    #[error("Currency code must contain only letters. Got '{0}'.")]
    CurrencyCodeInvalidCharacters(String),

    // ─────────────────────────────────────────────────────────────────────────
    // Exchange rate construction
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Exchange rate '{0}' is invalid. Rate must be non-negative.")]
    InvalidRate(Decimal),

    #[error("Amount '{0}' is invalid. Amount must be a positive integer.")]
    InvalidAmount(i32),

    #[error("'{0}' is not a valid date. Expected format: yyyy-MM-dd.")]
    InvalidDate(String),

    // ─────────────────────────────────────────────────────────────────────────
    // Request level
    // ─────────────────────────────────────────────────────────────────────────
    #[error("{0}")]
    ValidationFailed(String),

    #[error(
        "'{0}' is not a valid ISO 4217 currency code. Currency codes must be exactly 3 letters."
    )]
    InvalidCurrencyCode(String),

    #[error("Exchange rate for currency '{0}' was not found in the source data.")]
    CurrencyNotFound(String),

    // ─────────────────────────────────────────────────────────────────────────
    // Upstream
    // ─────────────────────────────────────────────────────────────────────────
    #[error("The exchange rate data source is currently unavailable. Please try again later.")]
    SourceUnavailable,

    #[error("No exchange rates are available for the specified criteria.")]
    NoRatesAvailable,
}

impl RateError {
    /// Returns the dotted machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            RateError::CurrencyCodeMissing => codes::VALIDATION_CURRENCY_CODE_NULL_OR_WHITESPACE,
            RateError::CurrencyCodeInvalidLength { .. } => {
                codes::VALIDATION_CURRENCY_CODE_INVALID_LENGTH
            }
            RateError::CurrencyCodeInvalidCharacters(_) => {
                codes::VALIDATION_CURRENCY_CODE_INVALID_CHARACTERS
            }
            RateError::InvalidRate(_) => codes::VALIDATION_INVALID_RATE,
            RateError::InvalidAmount(_) => codes::VALIDATION_INVALID_AMOUNT,
            RateError::InvalidDate(_) => codes::VALIDATION_INVALID_DATE,
            RateError::ValidationFailed(_) => codes::VALIDATION_FAILED,
            RateError::InvalidCurrencyCode(_) => codes::VALIDATION_INVALID_CURRENCY_CODE,
            RateError::CurrencyNotFound(_) => codes::EXCHANGE_RATE_CURRENCY_NOT_FOUND,
            RateError::SourceUnavailable => codes::EXCHANGE_RATE_SOURCE_UNAVAILABLE,
            RateError::NoRatesAvailable => codes::EXCHANGE_RATE_NO_RATES_AVAILABLE,
        }
    }

    /// Returns the classification used by the HTTP boundary.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RateError::CurrencyCodeMissing
            | RateError::CurrencyCodeInvalidLength { .. }
            | RateError::CurrencyCodeInvalidCharacters(_)
            | RateError::InvalidRate(_)
            | RateError::InvalidAmount(_)
            | RateError::InvalidDate(_)
            | RateError::ValidationFailed(_)
            | RateError::InvalidCurrencyCode(_) => ErrorKind::Validation,
            RateError::CurrencyNotFound(_) | RateError::NoRatesAvailable => ErrorKind::NotFound,
            RateError::SourceUnavailable => ErrorKind::Unavailable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_invalid_length_message_names_code_and_length() {
        let err = RateError::CurrencyCodeInvalidLength {
            code: "US".into(),
            length: 2,
        };
        assert_eq!(
            err.to_string(),
            "Currency code must be exactly 3 characters. Got 'US' with length 2."
        );
        assert_eq!(err.code(), "Validation.CurrencyCodeInvalidLength");
    }

    #[test]
    fn test_kinds_drive_boundary_classification() {
        assert_eq!(RateError::InvalidRate(dec!(-1)).kind(), ErrorKind::Validation);
        assert_eq!(RateError::InvalidAmount(0).kind(), ErrorKind::Validation);
        assert_eq!(
            RateError::CurrencyNotFound("USD".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(RateError::NoRatesAvailable.kind(), ErrorKind::NotFound);
        assert_eq!(RateError::SourceUnavailable.kind(), ErrorKind::Unavailable);
    }

    #[test]
    fn test_codes_are_dotted() {
        let all = [
            RateError::CurrencyCodeMissing,
            RateError::CurrencyCodeInvalidCharacters("U1D".into()),
            RateError::InvalidDate("2025-13-01".into()),
            RateError::ValidationFailed("bad".into()),
            RateError::InvalidCurrencyCode("XX".into()),
            RateError::SourceUnavailable,
        ];
        for err in all {
            let (namespace, name) = err.code().split_once('.').unwrap();
            assert!(!namespace.is_empty() && !name.is_empty(), "{}", err.code());
        }
    }
}
