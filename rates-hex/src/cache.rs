//! Caching decorator for exchange rate providers.
//!
//! Wraps any [`ExchangeRateProvider`] with a TTL cache keyed by the requested date:
//! - historical dates (strictly before today, UTC) are cached for the long TTL
//! - the latest/today entry uses the short TTL, and is also evicted as soon as a
//!   call observes that the UTC day has rolled over
//! - failures are never cached, so the next call retries the upstream
//!
//! Concurrent misses for the same key are not de-duplicated: each one calls the
//! wrapped provider and the last store wins.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::NaiveDate;

use rates_types::{CancellationToken, DailyRates, ExchangeRateProvider, RateError};

use crate::clock::{Clock, SystemClock};
use crate::store::{InMemoryRateCache, RateCache};

const CACHE_KEY_PREFIX: &str = "exchange-rates";
const LATEST_CACHE_KEY: &str = "exchange-rates-latest";

/// Builds the cache key for a requested date.
pub fn cache_key(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => format!("{}-{}", CACHE_KEY_PREFIX, date.format("%Y-%m-%d")),
        None => LATEST_CACHE_KEY.to_string(),
    }
}

/// Time-to-live policy for cached rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// TTL for the latest/today entry.
    pub latest_ttl: Duration,
    /// TTL for dates strictly before today.
    pub historical_ttl: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::from_minutes(60, 1440)
    }
}

impl CachePolicy {
    /// Builds a policy from minute counts, saturating at `u64::MAX` seconds.
    pub fn from_minutes(latest: u64, historical: u64) -> Self {
        Self {
            latest_ttl: Duration::from_secs(latest.saturating_mul(60)),
            historical_ttl: Duration::from_secs(historical.saturating_mul(60)),
        }
    }

    /// Selects the TTL for `date` given the current UTC day.
    pub fn ttl_for(&self, date: Option<NaiveDate>, today: NaiveDate) -> Duration {
        match date {
            Some(date) if date < today => self.historical_ttl,
            _ => self.latest_ttl,
        }
    }
}

/// Exchange rate provider that caches the results of another provider.
pub struct CachedRateProvider<P, S = InMemoryRateCache, C = SystemClock> {
    inner: P,
    cache: S,
    clock: C,
    policy: CachePolicy,
    /// Last UTC day on which the latest entry was known fresh.
    last_fresh_day: Mutex<NaiveDate>,
}

impl<P: ExchangeRateProvider> CachedRateProvider<P> {
    /// Wraps `inner` with a fresh in-memory cache and the system clock.
    pub fn new(inner: P, policy: CachePolicy) -> Self {
        Self::with_parts(inner, InMemoryRateCache::new(), SystemClock, policy)
    }
}

impl<P, S, C> CachedRateProvider<P, S, C>
where
    P: ExchangeRateProvider,
    S: RateCache,
    C: Clock,
{
    /// Wraps `inner` with an explicit cache store and clock.
    pub fn with_parts(inner: P, cache: S, clock: C, policy: CachePolicy) -> Self {
        let today = clock.today();
        Self {
            inner,
            cache,
            clock,
            policy,
            last_fresh_day: Mutex::new(today),
        }
    }

    /// Returns the wrapped provider.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Evicts the latest entry the first time a call observes a new UTC day.
    ///
    /// Only the compare-and-update of the tracked day runs under the lock.
    fn evict_latest_on_day_rollover(&self, today: NaiveDate) {
        {
            let mut last_fresh_day = self
                .last_fresh_day
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if today <= *last_fresh_day {
                return;
            }
            *last_fresh_day = today;
        }

        self.cache.remove(LATEST_CACHE_KEY);
        tracing::info!(%today, "New UTC day detected, evicted latest exchange rates cache");
    }
}

#[async_trait::async_trait]
impl<P, S, C> ExchangeRateProvider for CachedRateProvider<P, S, C>
where
    P: ExchangeRateProvider,
    S: RateCache,
    C: Clock,
{
    async fn get_daily_rates(
        &self,
        date: Option<NaiveDate>,
        cancel: &CancellationToken,
    ) -> Result<DailyRates, RateError> {
        let today = self.clock.today();
        self.evict_latest_on_day_rollover(today);

        let key = cache_key(date);

        if let Some(rates) = self.cache.get(&key) {
            tracing::debug!(cache_key = %key, "Cache hit for exchange rates");
            return Ok(rates);
        }

        tracing::debug!(cache_key = %key, "Cache miss for exchange rates");

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::warn!(cache_key = %key, "Exchange rate request cancelled");
                Err(RateError::SourceUnavailable)
            }
            result = self.inner.get_daily_rates(date, cancel) => result,
        };
        let rates = result?;

        let ttl = self.policy.ttl_for(date, today);
        self.cache.insert(key.clone(), rates.clone(), ttl);
        tracing::debug!(cache_key = %key, ttl_secs = ttl.as_secs(), "Cached exchange rates");

        Ok(rates)
    }
}
