//! Exchange Rate Retrieval Service
//!
//! Fetches raw records through the upstream port and maps them to validated
//! domain rates. Contains NO infrastructure logic - pure orchestration.

use chrono::NaiveDate;

use rates_types::{
    CancellationToken, DailyRates, ExchangeRate, ExchangeRateProvider, RateError, RawRate,
    UpstreamRateClient,
};

/// Currency the upstream source quotes every rate against.
pub const DEFAULT_TARGET_CURRENCY: &str = "CZK";

/// Direct (uncached) exchange rate provider.
///
/// Generic over `C: UpstreamRateClient` - the adapter is injected at compile time.
/// Mapping is all-or-nothing: the first invalid record fails the whole call.
pub struct ExchangeRateService<C: UpstreamRateClient> {
    client: C,
    target_currency: String,
}

impl<C: UpstreamRateClient> ExchangeRateService<C> {
    /// Creates a service quoting rates against [`DEFAULT_TARGET_CURRENCY`].
    pub fn new(client: C) -> Self {
        Self::with_target_currency(client, DEFAULT_TARGET_CURRENCY)
    }

    /// Creates a service quoting rates against `target_currency`.
    pub fn with_target_currency(client: C, target_currency: impl Into<String>) -> Self {
        Self {
            client,
            target_currency: target_currency.into(),
        }
    }

    /// Returns a reference to the underlying upstream client.
    pub fn client(&self) -> &C {
        &self.client
    }

    fn map_to_domain(&self, raw: &RawRate) -> Result<ExchangeRate, RateError> {
        let valid_for = NaiveDate::parse_from_str(&raw.valid_for, "%Y-%m-%d")
            .map_err(|_| RateError::InvalidDate(raw.valid_for.clone()))?;

        ExchangeRate::new(
            &raw.currency_code,
            &self.target_currency,
            raw.rate,
            raw.amount,
            valid_for,
        )
    }
}

#[async_trait::async_trait]
impl<C: UpstreamRateClient> ExchangeRateProvider for ExchangeRateService<C> {
    #[tracing::instrument(skip(self, cancel))]
    async fn get_daily_rates(
        &self,
        date: Option<NaiveDate>,
        cancel: &CancellationToken,
    ) -> Result<DailyRates, RateError> {
        let response = self.client.fetch_daily_rates(date, cancel).await?;

        let rates = response
            .rates
            .iter()
            .map(|raw| self.map_to_domain(raw))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            count = rates.len(),
            date = %date.map_or_else(|| "latest".to_string(), |d| d.to_string()),
            "Mapped exchange rates"
        );

        Ok(rates.into())
    }
}
