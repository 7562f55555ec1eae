//! Upstream rate source port.
//!
//! Raw records as published by the upstream source, before validation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::error::RateError;

/// A single unvalidated rate record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRate {
    /// Publication date, `YYYY-MM-DD`.
    pub valid_for: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub currency: String,
    pub amount: i32,
    pub currency_code: String,
    pub rate: Decimal,
}

/// The upstream daily rates payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRatesResponse {
    #[serde(default)]
    pub rates: Vec<RawRate>,
}

/// Port trait for the client that talks to the upstream rate source.
///
/// Implementations must report an empty payload as [`RateError::NoRatesAvailable`]
/// and any transport, timeout or decoding problem as [`RateError::SourceUnavailable`],
/// so a successful response always holds at least one record.
#[async_trait::async_trait]
pub trait UpstreamRateClient: Send + Sync {
    async fn fetch_daily_rates(
        &self,
        date: Option<NaiveDate>,
        cancel: &CancellationToken,
    ) -> Result<RawRatesResponse, RateError>;
}
