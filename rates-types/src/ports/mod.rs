//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod provider;
mod upstream;

pub use provider::{DailyRates, ExchangeRateProvider};
pub use upstream::{RawRate, RawRatesResponse, UpstreamRateClient};
