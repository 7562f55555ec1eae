//! # Rates Types
//!
//! Domain types and port traits for the exchange rates service.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Validated domain types (Currency, ExchangeRate)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - The error model shared by every layer

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{Currency, ExchangeRate};
pub use dto::*;
pub use error::{ErrorKind, RateError};
pub use ports::{DailyRates, ExchangeRateProvider, RawRate, RawRatesResponse, UpstreamRateClient};

// Cancellation is part of every port signature.
pub use tokio_util::sync::CancellationToken;
