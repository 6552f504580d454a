//! # Market Aggregation
//!
//! Concurrent quote collection across every registered venue.
//!
//! Each venue is queried in its own task under its own deadline. A venue
//! that fails, times out, or panics is recorded as a failure and never
//! affects its siblings. Results rejoin in ascending venue id order, so
//! selection tie-breaks are reproducible from run to run.

use crate::domain::entities::MarketSnapshot;
use crate::domain::value_objects::{TradingPair, VenueId};
use crate::infrastructure::venues::error::VenueError;
use crate::infrastructure::venues::registry::VenueRegistry;
use crate::infrastructure::venues::traits::ExchangeAdapter;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::Span;

/// Default per-venue quote deadline in milliseconds.
pub const DEFAULT_QUOTE_TIMEOUT_MS: u64 = 5000;

/// A venue that did not contribute a snapshot.
#[derive(Debug, Clone)]
pub struct VenueQuoteFailure {
    /// The venue ID.
    pub venue_id: VenueId,
    /// Why it failed.
    pub error: VenueError,
}

/// Outcome of one aggregation round.
#[derive(Debug, Clone, Default)]
pub struct AggregationReport {
    /// Snapshots from venues that answered, in ascending venue id order.
    pub snapshots: Vec<MarketSnapshot>,
    /// Venues that did not answer, in ascending venue id order.
    pub failures: Vec<VenueQuoteFailure>,
}

impl AggregationReport {
    /// Returns the number of venues queried.
    #[must_use]
    pub fn venues_queried(&self) -> usize {
        self.snapshots.len() + self.failures.len()
    }
}

/// Fans quote requests out to all registered venues.
#[derive(Debug, Clone)]
pub struct MarketAggregator {
    registry: Arc<VenueRegistry>,
    quote_timeout_ms: u64,
    span: Span,
}

impl MarketAggregator {
    /// Creates an aggregator over `registry` with the default deadline.
    #[must_use]
    pub fn new(registry: Arc<VenueRegistry>) -> Self {
        Self {
            registry,
            quote_timeout_ms: DEFAULT_QUOTE_TIMEOUT_MS,
            span: Span::none(),
        }
    }

    /// Sets the per-venue quote deadline.
    #[must_use]
    pub fn with_quote_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.quote_timeout_ms = timeout_ms;
        self
    }

    /// Attaches the span that parents this aggregator's events.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Returns the snapshots of every venue that answered.
    ///
    /// An empty list means no venue has liquidity for `pair`.
    pub async fn get_all_markets(&self, pair: &TradingPair) -> Vec<MarketSnapshot> {
        self.collect(pair).await.snapshots
    }

    /// Queries every venue and reports successes and failures.
    pub async fn collect(&self, pair: &TradingPair) -> AggregationReport {
        let venues = self.registry.get_all().await;
        let mut handles = Vec::with_capacity(venues.len());

        for venue in venues {
            let venue_id = venue.venue_id().clone();
            let deadline_ms = self.deadline_for(venue.as_ref());
            let pair = pair.clone();

            let handle = tokio::spawn(async move {
                match timeout(Duration::from_millis(deadline_ms), venue.fetch_quote(&pair)).await {
                    Ok(result) => result,
                    Err(_) => Err(VenueError::timeout_with_duration(
                        "quote request timed out",
                        deadline_ms,
                    )),
                }
            });
            handles.push((venue_id, handle));
        }

        let mut report = AggregationReport::default();
        for (venue_id, handle) in handles {
            let outcome = handle.await.unwrap_or_else(|e| {
                Err(VenueError::internal_error(format!("quote task failed: {e}")))
            });

            match outcome {
                Ok(snapshot) => {
                    tracing::debug!(parent: &self.span, venue = %venue_id, %snapshot, "quote received");
                    report.snapshots.push(snapshot);
                }
                Err(error) => {
                    if error.is_quote_unavailable() {
                        tracing::warn!(parent: &self.span, venue = %venue_id, error = %error, "no market on venue");
                    } else {
                        tracing::error!(parent: &self.span, venue = %venue_id, error = %error, "quote fetch failed");
                    }
                    report.failures.push(VenueQuoteFailure { venue_id, error });
                }
            }
        }

        tracing::info!(
            parent: &self.span,
            %pair,
            queried = report.venues_queried(),
            answered = report.snapshots.len(),
            "quotes collected"
        );
        report
    }

    fn deadline_for(&self, venue: &dyn ExchangeAdapter) -> u64 {
        match venue.timeout_ms() {
            0 => self.quote_timeout_ms,
            venue_ms => venue_ms.min(self.quote_timeout_ms),
        }
    }
}
