//! Configuration loading from flags and environment.

use std::time::Duration;

use clap::Parser;
use rates_cnb::RetryPolicy;
use rates_hex::CachePolicy;

/// Application configuration.
#[derive(Debug, Parser)]
#[command(name = "rates-server")]
#[command(version, about = "Cached CNB exchange rates API", long_about = None)]
pub struct Config {
    /// Port the HTTP server listens on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Base URL of the CNB API
    #[arg(long, env = "CNB_BASE_URL", default_value = rates_cnb::DEFAULT_BASE_URL)]
    pub cnb_base_url: String,

    /// Language of the published currency names
    #[arg(long, env = "CNB_LANGUAGE", default_value = rates_cnb::DEFAULT_LANGUAGE)]
    pub cnb_language: String,

    /// Whole-request timeout for upstream calls, in seconds
    #[arg(long, env = "CNB_TIMEOUT_SECS", default_value_t = 10)]
    pub cnb_timeout_secs: u64,

    /// Retries after a transient upstream failure (connect error, timeout, 5xx)
    #[arg(long, env = "CNB_MAX_RETRIES", default_value_t = 3)]
    pub cnb_max_retries: usize,

    /// Target currency of every published rate
    #[arg(long, env = "TARGET_CURRENCY", default_value = rates_hex::service::DEFAULT_TARGET_CURRENCY)]
    pub target_currency: String,

    /// Cache lifetime of the latest rates, in minutes
    #[arg(long, env = "CACHE_DURATION_MINUTES", default_value_t = 60)]
    pub cache_duration_minutes: u64,

    /// Cache lifetime of rates for past dates, in minutes
    #[arg(long, env = "HISTORICAL_CACHE_DURATION_MINUTES", default_value_t = 1440)]
    pub historical_cache_duration_minutes: u64,

    /// Export traces over OTLP
    #[arg(long = "otlp", env = "OTEL_ENABLED")]
    pub otel_enabled: bool,
}

impl Config {
    pub fn cnb_timeout(&self) -> Duration {
        Duration::from_secs(self.cnb_timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default().with_max_retries(self.cnb_max_retries)
    }

    pub fn cache_policy(&self) -> CachePolicy {
        CachePolicy::from_minutes(
            self.cache_duration_minutes,
            self.historical_cache_duration_minutes,
        )
    }
}
