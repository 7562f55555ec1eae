//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions and body types are only used by utoipa for documentation generation

use rates_types::ExchangeRateResponse;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Success envelope for the rates list.
#[derive(Serialize, ToSchema)]
struct ExchangeRatesBody {
    data: Vec<ExchangeRateResponse>,
}

/// Success envelope for a single rate.
#[derive(Serialize, ToSchema)]
struct ExchangeRateBody {
    data: ExchangeRateResponse,
}

/// Failure envelope.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    /// Dotted machine-readable code
    #[schema(example = "ExchangeRate.SourceUnavailable")]
    error_code: String,
    /// Human-readable description
    error_message: String,
}

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Get exchange rates
///
/// Returns daily exchange rates from the configured data source. Optionally filter
/// by comma-separated currency codes and/or a specific date.
#[utoipa::path(
    get,
    path = "/api/v1/exchange-rates",
    tag = "exchange-rates",
    params(
        ("currencies" = Option<String>, Query, description = "Comma-separated ISO 4217 codes", example = "USD,EUR,GBP"),
        ("date" = Option<String>, Query, description = "Date in yyyy-MM-dd format; latest rates when omitted", example = "2025-06-15")
    ),
    responses(
        (status = 200, description = "Exchange rates", body = ExchangeRatesBody),
        (status = 400, description = "Invalid currencies or date", body = ErrorBody),
        (status = 404, description = "No rate for the requested currencies", body = ErrorBody),
        (status = 502, description = "Upstream source unavailable", body = ErrorBody)
    )
)]
async fn get_exchange_rates() {}

/// Get exchange rate by currency code
#[utoipa::path(
    get,
    path = "/api/v1/exchange-rates/{currency_code}",
    tag = "exchange-rates",
    params(
        ("currency_code" = String, Path, description = "ISO 4217 three-letter code", example = "USD"),
        ("date" = Option<String>, Query, description = "Date in yyyy-MM-dd format; latest rates when omitted")
    ),
    responses(
        (status = 200, description = "Exchange rate", body = ExchangeRateBody),
        (status = 400, description = "Invalid currency code or date", body = ErrorBody),
        (status = 404, description = "Currency not found", body = ErrorBody),
        (status = 502, description = "Upstream source unavailable", body = ErrorBody)
    )
)]
async fn get_exchange_rate() {}

/// OpenAPI documentation for the Exchange Rates API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Exchange Rates API",
        version = "1.0.0",
        description = "Daily exchange rates published by the Czech National Bank, cached and served with date and currency filtering.",
        license(name = "MIT"),
    ),
    paths(health, get_exchange_rates, get_exchange_rate),
    components(schemas(ExchangeRateResponse, ExchangeRatesBody, ExchangeRateBody, ErrorBody)),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "exchange-rates", description = "Daily exchange rates"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_rate_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/exchange-rates"));
        assert!(
            doc.paths
                .paths
                .contains_key("/api/v1/exchange-rates/{currency_code}")
        );
    }
}
