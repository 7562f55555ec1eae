//! Exchange rate domain model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;

use super::currency::Currency;
use crate::error::RateError;

/// An exchange rate between a source currency and the serving currency.
///
/// `amount` units of `source` are worth `rate` units of `target` on `valid_for`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRate {
    source: Currency,
    target: Currency,
    rate: Decimal,
    amount: i32,
    valid_for: NaiveDate,
}

impl ExchangeRate {
    /// Creates a new exchange rate.
    ///
    /// # Validation
    /// - Both currency codes must pass [`Currency::new`]; its error is returned as-is
    /// - Rate cannot be negative (zero is allowed)
    /// - Amount must be at least 1
    pub fn new(
        source_code: &str,
        target_code: &str,
        rate: Decimal,
        amount: i32,
        valid_for: NaiveDate,
    ) -> Result<Self, RateError> {
        let source = Currency::new(source_code)?;
        let target = Currency::new(target_code)?;

        if rate < Decimal::ZERO {
            return Err(RateError::InvalidRate(rate));
        }

        if amount <= 0 {
            return Err(RateError::InvalidAmount(amount));
        }

        Ok(Self {
            source,
            target,
            rate,
            amount,
            valid_for,
        })
    }

    /// Returns the currency being converted from.
    pub fn source(&self) -> &Currency {
        &self.source
    }

    /// Returns the currency being converted to.
    pub fn target(&self) -> &Currency {
        &self.target
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// Returns the number of source units the rate applies to.
    pub fn amount(&self) -> i32 {
        self.amount
    }

    pub fn valid_for(&self) -> NaiveDate {
        self.valid_for
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}={}", self.source, self.target, self.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_exchange_rate_creation() {
        let rate = ExchangeRate::new("usd", "CZK", dec!(23.45), 1, day()).unwrap();
        assert_eq!(rate.source().code(), "USD");
        assert_eq!(rate.target().code(), "CZK");
        assert_eq!(rate.rate(), dec!(23.45));
        assert_eq!(rate.amount(), 1);
        assert_eq!(rate.valid_for(), day());
    }

    #[test]
    fn test_zero_rate_is_allowed() {
        assert!(ExchangeRate::new("USD", "CZK", Decimal::ZERO, 1, day()).is_ok());
    }

    #[test]
    fn test_negative_rate_fails() {
        let result = ExchangeRate::new("USD", "CZK", dec!(-0.01), 1, day());
        assert_eq!(result, Err(RateError::InvalidRate(dec!(-0.01))));
    }

    #[test]
    fn test_non_positive_amount_fails() {
        for amount in [0, -1, i32::MIN] {
            let result = ExchangeRate::new("USD", "CZK", dec!(1), amount, day());
            assert_eq!(result, Err(RateError::InvalidAmount(amount)));
        }
    }

    #[test]
    fn test_invalid_source_currency_propagates() {
        let result = ExchangeRate::new("US", "CZK", dec!(1), 1, day());
        assert!(matches!(
            result,
            Err(RateError::CurrencyCodeInvalidLength { length: 2, .. })
        ));
    }

    #[test]
    fn test_invalid_target_currency_propagates() {
        let result = ExchangeRate::new("USD", "", dec!(1), 1, day());
        assert_eq!(result, Err(RateError::CurrencyCodeMissing));
    }

    #[test]
    fn test_currency_checked_before_rate_and_amount() {
        let result = ExchangeRate::new("U5D", "CZK", dec!(-1), 0, day());
        assert!(matches!(
            result,
            Err(RateError::CurrencyCodeInvalidCharacters(_))
        ));
    }

    #[test]
    fn test_rate_checked_before_amount() {
        let result = ExchangeRate::new("USD", "CZK", dec!(-1), 0, day());
        assert!(matches!(result, Err(RateError::InvalidRate(_))));
    }

    #[test]
    fn test_display() {
        let rate = ExchangeRate::new("EUR", "CZK", dec!(24.335), 1, day()).unwrap();
        assert_eq!(rate.to_string(), "EUR/CZK=24.335");
    }
}
