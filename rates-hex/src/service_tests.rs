//! ExchangeRateService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use rates_types::{
        CancellationToken, ExchangeRateProvider, RateError, RawRate, RawRatesResponse,
        UpstreamRateClient,
    };

    use crate::ExchangeRateService;

    pub fn raw(code: &str, rate: Decimal, amount: i32, valid_for: &str) -> RawRate {
        RawRate {
            valid_for: valid_for.to_string(),
            order: 1,
            country: String::new(),
            currency: String::new(),
            amount,
            currency_code: code.to_string(),
            rate,
        }
    }

    /// Upstream client returning a canned response and recording requested dates.
    pub struct MockUpstream {
        response: Result<RawRatesResponse, RateError>,
        calls: AtomicUsize,
        requested: Mutex<Vec<Option<NaiveDate>>>,
    }

    impl MockUpstream {
        pub fn returning(rates: Vec<RawRate>) -> Self {
            Self::with_response(Ok(RawRatesResponse { rates }))
        }

        pub fn failing(error: RateError) -> Self {
            Self::with_response(Err(error))
        }

        fn with_response(response: Result<RawRatesResponse, RateError>) -> Self {
            Self {
                response,
                calls: AtomicUsize::new(0),
                requested: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl UpstreamRateClient for MockUpstream {
        async fn fetch_daily_rates(
            &self,
            date: Option<NaiveDate>,
            _cancel: &CancellationToken,
        ) -> Result<RawRatesResponse, RateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requested.lock().unwrap().push(date);
            self.response.clone()
        }
    }

    fn june_15() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[tokio::test]
    async fn test_maps_raw_record_to_domain() {
        let upstream = MockUpstream::returning(vec![raw("USD", dec!(23.45), 1, "2025-06-15")]);
        let service = ExchangeRateService::new(upstream);

        let rates = service
            .get_daily_rates(None, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(rates.len(), 1);
        let rate = &rates[0];
        assert_eq!(rate.source().code(), "USD");
        assert_eq!(rate.target().code(), "CZK");
        assert_eq!(rate.rate(), dec!(23.45));
        assert_eq!(rate.amount(), 1);
        assert_eq!(rate.valid_for(), june_15());
    }

    #[tokio::test]
    async fn test_uses_configured_target_currency() {
        let upstream = MockUpstream::returning(vec![raw("usd", dec!(0.92), 1, "2025-06-15")]);
        let service = ExchangeRateService::with_target_currency(upstream, "eur");

        let rates = service
            .get_daily_rates(None, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(rates[0].source().code(), "USD");
        assert_eq!(rates[0].target().code(), "EUR");
    }

    #[tokio::test]
    async fn test_passes_requested_date_to_upstream() {
        let upstream = MockUpstream::returning(vec![raw("USD", dec!(23.45), 1, "2025-06-15")]);
        let service = ExchangeRateService::new(upstream);

        service
            .get_daily_rates(Some(june_15()), &CancellationToken::new())
            .await
            .unwrap();

        let requested = service.client().requested.lock().unwrap().clone();
        assert_eq!(requested, vec![Some(june_15())]);
    }

    #[tokio::test]
    async fn test_preserves_upstream_order() {
        let upstream = MockUpstream::returning(vec![
            raw("USD", dec!(23.45), 1, "2025-06-15"),
            raw("AUD", dec!(14.1), 1, "2025-06-15"),
            raw("JPY", dec!(15.9), 100, "2025-06-15"),
        ]);
        let service = ExchangeRateService::new(upstream);

        let rates = service
            .get_daily_rates(None, &CancellationToken::new())
            .await
            .unwrap();

        let codes: Vec<_> = rates.iter().map(|r| r.source().code()).collect();
        assert_eq!(codes, ["USD", "AUD", "JPY"]);
        assert_eq!(rates[2].amount(), 100);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_returned_unchanged() {
        let service = ExchangeRateService::new(MockUpstream::failing(RateError::NoRatesAvailable));

        let result = service
            .get_daily_rates(None, &CancellationToken::new())
            .await;

        assert_eq!(result.unwrap_err(), RateError::NoRatesAvailable);
    }

    #[tokio::test]
    async fn test_one_invalid_code_fails_whole_call() {
        let upstream = MockUpstream::returning(vec![
            raw("USD", dec!(23.45), 1, "2025-06-15"),
            raw("E1R", dec!(24.3), 1, "2025-06-15"),
            raw("GBP", dec!(29.1), 1, "2025-06-15"),
        ]);
        let service = ExchangeRateService::new(upstream);

        let result = service
            .get_daily_rates(None, &CancellationToken::new())
            .await;

        assert_eq!(
            result.unwrap_err(),
            RateError::CurrencyCodeInvalidCharacters("E1R".into())
        );
    }

    #[tokio::test]
    async fn test_first_invalid_record_wins() {
        let upstream = MockUpstream::returning(vec![
            raw("USD", dec!(-1), 1, "2025-06-15"),
            raw("EURO", dec!(24.3), 1, "2025-06-15"),
        ]);
        let service = ExchangeRateService::new(upstream);

        let result = service
            .get_daily_rates(None, &CancellationToken::new())
            .await;

        assert_eq!(result.unwrap_err(), RateError::InvalidRate(dec!(-1)));
    }

    #[tokio::test]
    async fn test_non_positive_amount_fails() {
        let upstream = MockUpstream::returning(vec![raw("HUF", dec!(6.5), 0, "2025-06-15")]);
        let service = ExchangeRateService::new(upstream);

        let result = service
            .get_daily_rates(None, &CancellationToken::new())
            .await;

        assert_eq!(result.unwrap_err(), RateError::InvalidAmount(0));
    }

    #[tokio::test]
    async fn test_malformed_valid_for_date_fails() {
        let upstream = MockUpstream::returning(vec![raw("USD", dec!(23.45), 1, "15.06.2025")]);
        let service = ExchangeRateService::new(upstream);

        let result = service
            .get_daily_rates(None, &CancellationToken::new())
            .await;

        assert_eq!(
            result.unwrap_err(),
            RateError::InvalidDate("15.06.2025".into())
        );
    }

    #[tokio::test]
    async fn test_calls_upstream_every_time() {
        let upstream = MockUpstream::returning(vec![raw("USD", dec!(23.45), 1, "2025-06-15")]);
        let service = ExchangeRateService::new(upstream);
        let cancel = CancellationToken::new();

        service.get_daily_rates(None, &cancel).await.unwrap();
        service.get_daily_rates(None, &cancel).await.unwrap();

        assert_eq!(service.client().calls(), 2);
    }
}
