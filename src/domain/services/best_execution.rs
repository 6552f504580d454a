//! # Best Execution
//!
//! Venue selection over a set of market snapshots.
//!
//! # Selection Rule
//!
//! - Buy: lowest best ask
//! - Sell: highest best bid
//!
//! Only snapshots passing [`MarketSnapshot::is_valid`] take part. When
//! several venues share the best price, the one appearing first in the
//! input wins.

use crate::domain::entities::MarketSnapshot;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{OrderSide, TradingPair};
use rust_decimal::Decimal;
use tracing::Span;

/// Selects the venue offering the best executable price.
#[derive(Debug, Clone)]
pub struct BestExecutionSelector {
    span: Span,
}

impl Default for BestExecutionSelector {
    fn default() -> Self {
        Self::with_span(Span::none())
    }
}

impl BestExecutionSelector {
    /// Creates a selector that logs nowhere.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a selector whose events are children of `span`.
    #[must_use]
    pub fn with_span(span: Span) -> Self {
        Self { span }
    }

    /// Returns the snapshot an order on `side` should be routed to.
    ///
    /// # Errors
    ///
    /// - `DomainError::NoMarketsAvailable` if `snapshots` is empty
    /// - `DomainError::NoValidPrices` if no snapshot is valid
    /// - `DomainError::InconsistentSymbols` if valid snapshots quote
    ///   different pairs
    pub fn find_best_market<'a>(
        &self,
        snapshots: &'a [MarketSnapshot],
        side: OrderSide,
    ) -> DomainResult<&'a MarketSnapshot> {
        if snapshots.is_empty() {
            return Err(DomainError::NoMarketsAvailable);
        }

        let valid: Vec<&MarketSnapshot> = snapshots.iter().filter(|s| s.is_valid()).collect();
        let Some(first) = valid.first() else {
            return Err(DomainError::NoValidPrices);
        };

        if valid.iter().any(|s| s.pair() != first.pair()) {
            return Err(DomainError::InconsistentSymbols(distinct_pairs(&valid)));
        }

        let best = valid
            .iter()
            .filter_map(|s| s.executable_price(side).map(|p| (*s, p.amount())))
            .fold(None, |best: Option<(&MarketSnapshot, Decimal)>, (s, price)| {
                match best {
                    Some((_, best_price)) if !improves(side, price, best_price) => best,
                    _ => Some((s, price)),
                }
            });

        let Some((snapshot, price)) = best else {
            return Err(DomainError::NoValidPrices);
        };

        tracing::info!(
            parent: &self.span,
            venue = %snapshot.venue_id(),
            pair = %snapshot.pair(),
            side = %side,
            price = %price,
            candidates = valid.len(),
            "selected best market"
        );
        Ok(snapshot)
    }
}

/// Strict comparison keeps the earliest venue on ties.
fn improves(side: OrderSide, candidate: Decimal, incumbent: Decimal) -> bool {
    match side {
        OrderSide::Buy => candidate < incumbent,
        OrderSide::Sell => candidate > incumbent,
    }
}

fn distinct_pairs(snapshots: &[&MarketSnapshot]) -> String {
    let mut pairs: Vec<&TradingPair> = Vec::new();
    for snapshot in snapshots {
        if !pairs.contains(&snapshot.pair()) {
            pairs.push(snapshot.pair());
        }
    }
    pairs
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Price, VenueId};

    fn snapshot(venue: &str, pair: &str, bid: Option<i64>, ask: Option<i64>) -> MarketSnapshot {
        let price = |v: Option<i64>| v.map(|v| Price::observed_now(Decimal::from(v)).unwrap());
        MarketSnapshot::new(
            VenueId::new(venue),
            pair.parse().unwrap(),
            price(bid),
            price(ask),
        )
    }

    fn two_venues() -> Vec<MarketSnapshot> {
        vec![
            snapshot("venue_a", "BTC/USDT", Some(49_990), Some(50_000)),
            snapshot("venue_b", "BTC/USDT", Some(49_995), Some(50_005)),
        ]
    }

    #[test]
    fn buy_picks_lowest_ask() {
        let markets = two_venues();
        let best = BestExecutionSelector::new()
            .find_best_market(&markets, OrderSide::Buy)
            .unwrap();
        assert_eq!(best.venue_id().as_str(), "venue_a");
    }

    #[test]
    fn sell_picks_highest_bid() {
        let markets = two_venues();
        let best = BestExecutionSelector::new()
            .find_best_market(&markets, OrderSide::Sell)
            .unwrap();
        assert_eq!(best.venue_id().as_str(), "venue_b");
    }

    #[test]
    fn empty_input_has_no_markets() {
        let result = BestExecutionSelector::new().find_best_market(&[], OrderSide::Buy);
        assert_eq!(result.unwrap_err(), DomainError::NoMarketsAvailable);
    }

    #[test]
    fn invalid_only_has_no_valid_prices() {
        let markets = vec![
            snapshot("crossed", "BTC/USDT", Some(50_010), Some(50_000)),
            snapshot("one_sided", "BTC/USDT", None, Some(50_000)),
            snapshot("zero_bid", "BTC/USDT", Some(0), Some(50_000)),
        ];
        let result = BestExecutionSelector::new().find_best_market(&markets, OrderSide::Sell);
        assert_eq!(result.unwrap_err(), DomainError::NoValidPrices);
    }

    #[test]
    fn invalid_snapshot_never_wins_on_price() {
        let markets = vec![
            snapshot("crossed", "BTC/USDT", Some(60_000), Some(40_000)),
            snapshot("venue_a", "BTC/USDT", Some(49_990), Some(50_000)),
        ];
        let selector = BestExecutionSelector::new();
        for side in [OrderSide::Buy, OrderSide::Sell] {
            let best = selector.find_best_market(&markets, side).unwrap();
            assert_eq!(best.venue_id().as_str(), "venue_a");
        }
    }

    #[test]
    fn mixed_pairs_are_inconsistent() {
        let markets = vec![
            snapshot("venue_a", "BTC/USDT", Some(49_990), Some(50_000)),
            snapshot("venue_b", "ETH/USDT", Some(2_999), Some(3_000)),
            snapshot("venue_c", "BTC/USDT", Some(49_991), Some(50_001)),
        ];
        let result = BestExecutionSelector::new().find_best_market(&markets, OrderSide::Buy);
        assert_eq!(
            result.unwrap_err(),
            DomainError::InconsistentSymbols("BTCUSDT, ETHUSDT".to_string())
        );
    }

    #[test]
    fn mixed_pairs_ignored_when_other_pair_is_invalid() {
        let markets = vec![
            snapshot("venue_a", "BTC/USDT", Some(49_990), Some(50_000)),
            snapshot("venue_b", "ETH/USDT", None, Some(3_000)),
        ];
        let best = BestExecutionSelector::new()
            .find_best_market(&markets, OrderSide::Buy)
            .unwrap();
        assert_eq!(best.venue_id().as_str(), "venue_a");
    }

    #[test]
    fn ties_go_to_first_occurrence() {
        let markets = vec![
            snapshot("first", "BTC/USDT", Some(49_990), Some(50_000)),
            snapshot("second", "BTC/USDT", Some(49_990), Some(50_000)),
            snapshot("third", "BTC/USDT", Some(49_990), Some(50_000)),
        ];
        let selector = BestExecutionSelector::new();
        for side in [OrderSide::Buy, OrderSide::Sell] {
            let best = selector.find_best_market(&markets, side).unwrap();
            assert_eq!(best.venue_id().as_str(), "first");
        }

        let reversed: Vec<_> = markets.into_iter().rev().collect();
        let best = selector.find_best_market(&reversed, OrderSide::Buy).unwrap();
        assert_eq!(best.venue_id().as_str(), "third");
    }
}
