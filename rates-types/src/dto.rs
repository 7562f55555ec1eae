//! Data Transfer Objects (DTOs) for API responses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ExchangeRate;
use crate::error::RateError;

/// A single exchange rate as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateResponse {
    /// Currency being converted from
    #[schema(example = "USD")]
    pub source_currency: String,
    /// Currency being converted to
    #[schema(example = "CZK")]
    pub target_currency: String,
    /// Value of `amount` source units in the target currency
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 23.45)]
    pub rate: Decimal,
    /// Number of source units the rate applies to
    #[schema(example = 1)]
    pub amount: i32,
    /// Date the rate is valid for (YYYY-MM-DD)
    #[schema(example = "2025-06-15")]
    pub valid_for: String,
}

impl From<&ExchangeRate> for ExchangeRateResponse {
    fn from(rate: &ExchangeRate) -> Self {
        Self {
            source_currency: rate.source().code().to_string(),
            target_currency: rate.target().code().to_string(),
            rate: rate.rate(),
            amount: rate.amount(),
            valid_for: rate.valid_for().format("%Y-%m-%d").to_string(),
        }
    }
}

/// Standard response envelope holding either data or error information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error_code: None,
            error_message: None,
        }
    }

    pub fn failure(error: &RateError) -> Self {
        Self {
            data: None,
            error_code: Some(error.code().to_string()),
            error_message: Some(error.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error_code.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_response_from_domain() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let rate = ExchangeRate::new("USD", "CZK", dec!(23.45), 1, date).unwrap();

        let json = serde_json::to_value(ExchangeRateResponse::from(&rate)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "sourceCurrency": "USD",
                "targetCurrency": "CZK",
                "rate": 23.45,
                "amount": 1,
                "validFor": "2025-06-15"
            })
        );
    }

    #[test]
    fn test_failure_envelope_omits_data() {
        let body = ApiResponse::<ExchangeRateResponse>::failure(&RateError::SourceUnavailable);

        assert!(!body.is_success());
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["errorCode"], "ExchangeRate.SourceUnavailable");
        assert!(json.get("data").is_none());
    }
}
