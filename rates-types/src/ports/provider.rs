//! Exchange rate provider port.
//!
//! Both the direct retrieval service and the caching decorator implement this
//! trait, so the decorator can wrap any provider (including test substitutes).

use std::sync::Arc;

use chrono::NaiveDate;
use tokio_util::sync::CancellationToken;

use crate::domain::ExchangeRate;
use crate::error::RateError;

/// An ordered, immutable collection of rates for one day.
///
/// Shared rather than copied, so cache hits hand out the stored collection itself.
pub type DailyRates = Arc<[ExchangeRate]>;

/// Port trait for exchange rate providers.
#[async_trait::async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Gets the daily rates for `date`, or the latest published rates when `None`.
    ///
    /// The order of the returned rates is the order the upstream source published them in.
    async fn get_daily_rates(
        &self,
        date: Option<NaiveDate>,
        cancel: &CancellationToken,
    ) -> Result<DailyRates, RateError>;
}

#[async_trait::async_trait]
impl<P: ExchangeRateProvider + ?Sized> ExchangeRateProvider for Arc<P> {
    async fn get_daily_rates(
        &self,
        date: Option<NaiveDate>,
        cancel: &CancellationToken,
    ) -> Result<DailyRates, RateError> {
        (**self).get_daily_rates(date, cancel).await
    }
}
