//! # Rates Hex
//!
//! Application service layer and HTTP adapter for the exchange rates service.
//!
//! ## Architecture
//!
//! - `service/` - Retrieval service (upstream records -> validated domain rates)
//! - `cache/` - Caching decorator with TTL policy and day-rollover eviction
//! - `store/`, `clock/` - The cache store and UTC clock the decorator is built on
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! Both providers implement `ExchangeRateProvider`, so the decorator wraps the
//! service (or any substitute) and the HTTP layer is generic over either.

pub mod cache;
pub mod clock;
pub mod inbound;
pub mod openapi;
pub mod service;
pub mod store;

#[cfg(test)]
mod service_tests;

pub use cache::{CachePolicy, CachedRateProvider};
pub use clock::{Clock, SystemClock};
pub use service::ExchangeRateService;
pub use store::{InMemoryRateCache, RateCache};
