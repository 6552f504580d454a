//! # Crypto Order Router
//!
//! Routes one market order to the venue with the best executable price.
//!
//! Credentials come from `router.toml` (or `ROUTER_CONFIG_FILE`) and the
//! `BINANCE_*` / `OKX_*` environment variables.

use anyhow::{Context, Result};
use clap::Parser;
use crypto_order_router::application::{PlaceMarketOrderUseCase, PlaceOrderRequest};
use crypto_order_router::config::{AppConfig, LogConfig, LogFormat};
use crypto_order_router::domain::value_objects::TradingPair;
use crypto_order_router::infrastructure::venues::build_registry;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Place a market order on the exchange offering the best price.
#[derive(Debug, Parser)]
#[command(name = "crypto-order-router", version, about)]
struct Args {
    /// Order side (buy or sell).
    #[arg(long)]
    side: String,

    /// Quantity of the base asset.
    #[arg(long)]
    quantity: Decimal,

    /// Trading pair.
    #[arg(long, default_value = "BTC/USDT")]
    pair: String,

    /// Configuration file (overrides ROUTER_CONFIG_FILE).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (overrides the configured level).
    #[arg(long)]
    log_level: Option<String>,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            let mut config = AppConfig::from_file(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            config.apply_env_overrides(|key| std::env::var(key).ok());
            config
        }
        None => AppConfig::load().context("failed to load configuration")?,
    };
    if let Some(level) = &args.log_level {
        config.log.level = level.clone();
    }
    config.validate()?;

    init_tracing(&config.log)?;

    let pair: TradingPair = args
        .pair
        .parse()
        .with_context(|| format!("invalid pair '{}'", args.pair))?;

    let span = tracing::info_span!("route_order", pair = %pair, side = %args.side);
    let registry = Arc::new(build_registry(&config, &span).await?);
    if registry.is_empty().await {
        tracing::warn!(parent: &span, "no venues configured");
    }

    let router = PlaceMarketOrderUseCase::new(registry)
        .with_routing_config(&config.routing)
        .with_span(span);
    let request = PlaceOrderRequest::new(pair.base(), pair.quote(), &args.side, args.quantity);
    let result = router.execute(&request).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{result}");
    }

    Ok(if result.is_failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn init_tracing(log: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log.level))
        .context("invalid log filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(log.include_target)
        .with_writer(std::io::stderr);

    match log.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
    Ok(())
}
