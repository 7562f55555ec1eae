//! # Rates Application
//!
//! Binary that wires together all the components:
//! - Load configuration from flags and environment
//! - Build the CNB upstream client
//! - Create the retrieval service and wrap it in the rate cache
//! - Start the HTTP server

mod config;

use clap::Parser;
use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rates_cnb::CnbClient;
use rates_hex::{CachedRateProvider, ExchangeRateService, inbound::HttpServer};

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("rates-service"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = config::Config::parse();

    // Initialize OpenTelemetry tracing when enabled
    let (telemetry, otel_provider) = if config.otel_enabled {
        let (otel_tracer, otel_provider) = init_tracer()?;
        (
            Some(tracing_opentelemetry::layer().with_tracer(otel_tracer)),
            Some(otel_provider),
        )
    } else {
        (None, None)
    };

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,rates_app=debug,rates_hex=debug,rates_cnb=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    tracing::info!("Starting exchange rates server on port {}", config.port);
    tracing::info!(
        base_url = %config.cnb_base_url,
        language = %config.cnb_language,
        target = %config.target_currency,
        max_retries = config.cnb_max_retries,
        "Using CNB upstream"
    );

    // Build the upstream client
    let client = CnbClient::new(&config.cnb_base_url)
        .with_language(&config.cnb_language)
        .with_timeout(config.cnb_timeout())?
        .with_retry(config.retry_policy());

    // Create the retrieval service behind the cache
    let service = ExchangeRateService::with_target_currency(client, &config.target_currency);
    let policy = config.cache_policy();
    tracing::info!(
        latest_ttl_secs = policy.latest_ttl.as_secs(),
        historical_ttl_secs = policy.historical_ttl.as_secs(),
        "Rate cache configured"
    );
    let provider = CachedRateProvider::new(service, policy);

    // Create and run the HTTP server
    let server = HttpServer::new(provider);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    if let Some(provider) = otel_provider {
        let _ = provider.shutdown();
    }
    Ok(())
}
