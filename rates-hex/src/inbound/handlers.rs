//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use chrono::NaiveDate;
use serde::Deserialize;

use rates_types::{
    ApiResponse, CancellationToken, DailyRates, ErrorKind, ExchangeRateProvider,
    ExchangeRateResponse, RateError,
};

/// Application state shared across handlers.
pub struct AppState<P: ExchangeRateProvider> {
    pub provider: P,
}

/// Wrapper to implement IntoResponse for RateError (orphan rule workaround).
#[derive(Debug)]
pub struct ApiError(pub RateError);

impl From<RateError> for ApiError {
    fn from(err: RateError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Unavailable => StatusCode::BAD_GATEWAY,
            ErrorKind::Failure => StatusCode::INTERNAL_SERVER_ERROR,
        };

        tracing::warn!(code = self.0.code(), status = status.as_u16(), "{}", self.0);

        let body = ApiResponse::<()>::failure(&self.0);
        (status, Json(body)).into_response()
    }
}

/// Query parameters for the rates list.
#[derive(Debug, Default, Deserialize)]
pub struct RatesQuery {
    /// Comma-separated currency codes, e.g. `USD,EUR,GBP`
    pub currencies: Option<String>,
    /// Date in `YYYY-MM-DD` format; latest rates when absent
    pub date: Option<String>,
}

/// Query parameters for a single rate.
#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

/// Parses an optional `YYYY-MM-DD` date; blank means "latest".
pub(crate) fn parse_date(date: Option<&str>) -> Result<Option<NaiveDate>, RateError> {
    match date.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| RateError::InvalidDate(raw.to_string())),
    }
}

/// Parses a comma-separated list of 3-letter codes; blank means "no filter".
pub(crate) fn parse_currency_codes(currencies: Option<&str>) -> Result<Vec<String>, RateError> {
    let Some(raw) = currencies.filter(|c| !c.trim().is_empty()) else {
        return Ok(Vec::new());
    };

    let codes: Vec<String> = raw.split(',').map(|c| c.to_string()).collect();
    if codes.iter().any(|c| !is_three_letter_code(c)) {
        return Err(RateError::ValidationFailed(
            "Currencies must be a comma-separated list of 3-letter ISO 4217 codes (e.g. USD,EUR,GBP)."
                .into(),
        ));
    }

    Ok(codes)
}

fn is_three_letter_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Runs a provider call with a token that is cancelled if the request future is dropped.
async fn fetch_rates<P: ExchangeRateProvider>(
    provider: &P,
    date: Option<NaiveDate>,
) -> Result<DailyRates, RateError> {
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();
    provider.get_daily_rates(date, &cancel).await
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Redirects the root path to the API documentation.
pub async fn docs_redirect() -> Redirect {
    Redirect::temporary("/swagger-ui")
}

/// List exchange rates, optionally filtered by currency codes and date.
#[tracing::instrument(skip(state))]
pub async fn get_exchange_rates<P: ExchangeRateProvider + 'static>(
    State(state): State<Arc<AppState<P>>>,
    Query(query): Query<RatesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let date = parse_date(query.date.as_deref())?;
    let codes = parse_currency_codes(query.currencies.as_deref())?;

    let rates = fetch_rates(&state.provider, date).await?;

    let response: Vec<ExchangeRateResponse> = rates
        .iter()
        .filter(|rate| {
            codes.is_empty()
                || codes
                    .iter()
                    .any(|code| code.eq_ignore_ascii_case(rate.source().code()))
        })
        .map(ExchangeRateResponse::from)
        .collect();

    if !codes.is_empty() && response.is_empty() {
        return Err(RateError::CurrencyNotFound(codes.join(", ")).into());
    }

    Ok(Json(ApiResponse::success(response)))
}

/// Get the exchange rate for a single currency.
#[tracing::instrument(skip(state))]
pub async fn get_exchange_rate<P: ExchangeRateProvider + 'static>(
    State(state): State<Arc<AppState<P>>>,
    Path(currency_code): Path<String>,
    Query(query): Query<DateQuery>,
) -> Result<impl IntoResponse, ApiError> {
    if !is_three_letter_code(&currency_code) {
        return Err(RateError::InvalidCurrencyCode(currency_code).into());
    }
    let date = parse_date(query.date.as_deref())?;

    let rates = fetch_rates(&state.provider, date).await?;

    let rate = rates
        .iter()
        .find(|rate| rate.source().code().eq_ignore_ascii_case(&currency_code))
        .ok_or_else(|| RateError::CurrencyNotFound(currency_code.clone()))?;

    Ok(Json(ApiResponse::success(ExchangeRateResponse::from(rate))))
}
