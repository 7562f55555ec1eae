//! Domain models for the exchange rates service.

pub mod currency;
pub mod exchange_rate;

pub use currency::Currency;
pub use exchange_rate::ExchangeRate;
