//! # Place Market Order Use Case
//!
//! Routes one market order to the venue with the best executable price.
//!
//! # Flow
//!
//! 1. Validate the request and build a `Pending` order
//! 2. Collect quotes from every venue
//! 3. Select the best venue for the order's side
//! 4. Place the order on that venue
//!
//! Every failure along the way, including a panic inside an adapter, ends
//! in a failed [`OrderResult`]. [`PlaceMarketOrderUseCase::execute`] never
//! returns an error.

use crate::application::dto::{OrderResult, PlaceOrderRequest};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::MarketAggregator;
use crate::config::RoutingConfig;
use crate::domain::entities::Order;
use crate::domain::services::BestExecutionSelector;
use crate::infrastructure::venues::registry::VenueRegistry;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::Span;

/// Use case for routing a market order.
#[derive(Debug, Clone)]
pub struct PlaceMarketOrderUseCase {
    registry: Arc<VenueRegistry>,
    aggregator: MarketAggregator,
    selector: BestExecutionSelector,
    span: Span,
}

impl PlaceMarketOrderUseCase {
    /// Creates a new use case over `registry` with default deadlines.
    #[must_use]
    pub fn new(registry: Arc<VenueRegistry>) -> Self {
        Self {
            aggregator: MarketAggregator::new(Arc::clone(&registry)),
            registry,
            selector: BestExecutionSelector::new(),
            span: Span::none(),
        }
    }

    /// Applies the routing deadlines.
    #[must_use]
    pub fn with_routing_config(mut self, routing: &RoutingConfig) -> Self {
        self.aggregator = self
            .aggregator
            .with_quote_timeout_ms(routing.quote_timeout_ms);
        self
    }

    /// Attaches the span that parents every event of the routing call,
    /// including those of the aggregator and the selector.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.aggregator = self.aggregator.with_span(span.clone());
        self.selector = BestExecutionSelector::with_span(span.clone());
        self.span = span;
        self
    }

    /// Routes `request` and reports the outcome.
    pub async fn execute(&self, request: &PlaceOrderRequest) -> OrderResult {
        let (pair, side, quantity) = match request.to_domain_types() {
            Ok(parts) => parts,
            Err(message) => {
                let error = ApplicationError::validation(message);
                tracing::warn!(parent: &self.span, %request, error = %error, "order request rejected");
                return OrderResult::failed(request, error);
            }
        };

        let order = Order::new(pair, side, quantity);
        tracing::info!(
            parent: &self.span,
            order_id = %order.id(),
            pair = %order.pair(),
            %side,
            %quantity,
            "routing market order"
        );

        match AssertUnwindSafe(self.route(order)).catch_unwind().await {
            Ok(Ok(placed)) => {
                let result = OrderResult::from_order(&placed);
                tracing::info!(
                    parent: &self.span,
                    venue = result.venue_id.as_deref().unwrap_or("-"),
                    order_id = result.order_id.as_deref().unwrap_or("-"),
                    status = %result.status,
                    "order routed"
                );
                result
            }
            Ok(Err(error)) => {
                tracing::error!(parent: &self.span, kind = error.kind(), error = %error, "order failed");
                OrderResult::failed(request, error)
            }
            Err(panic) => {
                let error = ApplicationError::internal(format!(
                    "routing panicked: {}",
                    panic_message(panic.as_ref())
                ));
                tracing::error!(parent: &self.span, error = %error, "order failed");
                OrderResult::failed(request, error)
            }
        }
    }

    async fn route(&self, order: Order) -> ApplicationResult<Order> {
        let snapshots = self.aggregator.get_all_markets(order.pair()).await;
        let best = self.selector.find_best_market(&snapshots, order.side())?;
        let venue_id = best.venue_id().clone();

        let adapter = self.registry.get(&venue_id).await.ok_or_else(|| {
            ApplicationError::internal(format!("no adapter registered for {venue_id}"))
        })?;

        let order = order.routed_to(venue_id.clone())?;
        adapter
            .place_order(&order)
            .await
            .map_err(|source| ApplicationError::venue(venue_id, source))
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
