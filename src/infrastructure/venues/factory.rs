//! # Venue Factory
//!
//! Builds adapters from configuration.
//!
//! Venue identifiers must be one of
//! [`KNOWN_VENUES`](crate::config::KNOWN_VENUES), spelled exactly as
//! `AppConfig::validate` accepts them. Unknown identifiers and incomplete
//! credentials are reported as `VenueError::InvalidRequest`.

use crate::config::{AppConfig, RoutingConfig, VenueCredentials};
use crate::domain::value_objects::ParseEnumError;
use crate::infrastructure::venues::binance::{BinanceAdapter, BinanceConfig};
use crate::infrastructure::venues::error::{VenueError, VenueResult};
use crate::infrastructure::venues::okx::{OkxAdapter, OkxConfig};
use crate::infrastructure::venues::registry::VenueRegistry;
use crate::infrastructure::venues::traits::ExchangeAdapter;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::Span;

/// Supported exchange kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VenueKind {
    /// Binance spot.
    Binance,
    /// OKX spot.
    Okx,
}

impl VenueKind {
    /// Returns the canonical identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Binance => "binance",
            Self::Okx => "okx",
        }
    }
}

impl fmt::Display for VenueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VenueKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "binance" => Ok(Self::Binance),
            "okx" => Ok(Self::Okx),
            _ => Err(ParseEnumError::new("VenueKind", s)),
        }
    }
}

/// Builds one adapter.
///
/// # Errors
///
/// Returns `VenueError::InvalidRequest` if `venue` is unknown or the
/// credentials are incomplete, or the adapter's own construction error.
pub fn build_adapter(
    venue: &str,
    credentials: &VenueCredentials,
    routing: &RoutingConfig,
    span: &Span,
) -> VenueResult<Arc<dyn ExchangeAdapter>> {
    let kind = VenueKind::from_str(venue)
        .map_err(|_| VenueError::invalid_request(format!("unknown venue '{venue}'")))?;

    if credentials.api_key.is_empty() || credentials.api_secret.is_empty() {
        return Err(VenueError::invalid_request(format!(
            "{kind} requires an API key and secret"
        )));
    }

    let adapter: Arc<dyn ExchangeAdapter> = match kind {
        VenueKind::Binance => {
            let mut config =
                BinanceConfig::new(credentials.api_key.as_str(), credentials.api_secret.as_str())
                    .with_timeout_ms(routing.request_timeout_ms);
            if let Some(url) = &credentials.base_url {
                config = config.with_base_url(url.as_str());
            }
            Arc::new(BinanceAdapter::new(config)?.with_span(span.clone()))
        }
        VenueKind::Okx => {
            let passphrase = credentials
                .api_passphrase
                .as_deref()
                .filter(|p| !p.is_empty())
                .ok_or_else(|| VenueError::invalid_request("okx requires an API passphrase"))?;
            let mut config = OkxConfig::new(
                credentials.api_key.as_str(),
                credentials.api_secret.as_str(),
                passphrase,
            )
            .with_simulated(credentials.simulated)
            .with_timeout_ms(routing.request_timeout_ms)
            .with_order_status_delay_ms(routing.order_status_delay_ms);
            if let Some(url) = &credentials.base_url {
                config = config.with_base_url(url.as_str());
            }
            Arc::new(OkxAdapter::new(config)?.with_span(span.clone()))
        }
    };

    Ok(adapter)
}

/// Builds a registry holding one adapter per configured venue.
///
/// # Errors
///
/// Returns the first adapter construction error.
pub async fn build_registry(config: &AppConfig, span: &Span) -> VenueResult<VenueRegistry> {
    let registry = VenueRegistry::new();
    for (venue, credentials) in &config.venues {
        let adapter = build_adapter(venue, credentials, &config.routing, span)?;
        tracing::debug!(parent: span, venue = %adapter.venue_id(), "venue adapter registered");
        registry.register(adapter).await;
    }
    Ok(registry)
}
