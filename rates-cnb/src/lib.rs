//! # CNB Client
//!
//! A typed client for the Czech National Bank daily exchange rates API,
//! implementing the [`UpstreamRateClient`] port.
//!
//! Transient failures (connect errors, timeouts, 408/429/5xx) are retried with
//! exponential backoff and jitter, bounded by [`RetryPolicy`].

use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use chrono::NaiveDate;
use rates_types::{CancellationToken, RateError, RawRatesResponse, UpstreamRateClient};
use reqwest::{Client, StatusCode, header};

/// Default base URL of the CNB API.
pub const DEFAULT_BASE_URL: &str = "https://api.cnb.cz";

/// Default language of the published currency and country names.
pub const DEFAULT_LANGUAGE: &str = "EN";

/// Status codes worth another attempt.
const RETRY_ON_STATUS: [StatusCode; 6] = [
    StatusCode::REQUEST_TIMEOUT,
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// Error type for transport-level failures.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether another attempt could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::Http(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.is_request()
                    || e.status().is_some_and(|s| RETRY_ON_STATUS.contains(&s))
            }
            ClientError::Json(_) => false,
        }
    }
}

/// Bounded retry with exponential backoff.
///
/// Total attempts = `max_retries + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: usize,
    /// Delay before the first retry; doubles on each further retry.
    pub min_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            min_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no retries.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_delay(self.max_delay)
            .with_max_times(self.max_retries)
            .with_jitter()
    }
}

/// CNB daily rates client.
#[derive(Debug, Clone)]
pub struct CnbClient {
    base_url: String,
    language: String,
    retry: RetryPolicy,
    http: Client,
}

impl CnbClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            retry: RetryPolicy::default(),
            http: Client::new(),
        }
    }

    /// Sets the language of the published names.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Applies a per-attempt timeout to every upstream call.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ClientError> {
        self.http = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    /// Sets the retry policy for transient failures.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// URL of the daily rates resource for `date`, or the latest publication.
    pub fn daily_rates_url(&self, date: Option<NaiveDate>) -> String {
        let mut url = format!(
            "{}/cnbapi/exrates/daily?lang={}",
            self.base_url, self.language
        );
        if let Some(date) = date {
            url.push_str(&format!("&date={}", date.format("%Y-%m-%d")));
        }
        url
    }

    async fn get_daily(&self, url: &str) -> Result<RawRatesResponse, ClientError> {
        let resp = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?;
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get_daily_with_retry(&self, url: &str) -> Result<RawRatesResponse, ClientError> {
        (|| self.get_daily(url))
            .retry(self.retry.backoff())
            .when(ClientError::is_transient)
            .notify(|e: &ClientError, delay: Duration| {
                tracing::warn!(error = %e, delay_ms = delay.as_millis() as u64, "CNB request failed, retrying");
            })
            .await
    }
}

#[async_trait::async_trait]
impl UpstreamRateClient for CnbClient {
    #[tracing::instrument(skip(self, cancel))]
    async fn fetch_daily_rates(
        &self,
        date: Option<NaiveDate>,
        cancel: &CancellationToken,
    ) -> Result<RawRatesResponse, RateError> {
        let url = self.daily_rates_url(date);
        tracing::debug!(%url, "fetching daily rates from CNB");

        // Backoff sleeps run inside the select, so cancellation also cuts them short.
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::warn!("CNB request cancelled");
                return Err(RateError::SourceUnavailable);
            }
            result = self.get_daily_with_retry(&url) => result,
        };

        match result {
            Ok(response) if response.rates.is_empty() => {
                tracing::warn!(?date, "CNB returned no rates");
                Err(RateError::NoRatesAvailable)
            }
            Ok(response) => Ok(response),
            Err(e) => {
                tracing::error!(error = %e, %url, "CNB request failed");
                Err(RateError::SourceUnavailable)
            }
        }
    }
}
