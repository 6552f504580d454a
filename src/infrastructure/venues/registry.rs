//! # Venue Registry
//!
//! Registry of configured exchange adapters.
//!
//! Adapters are keyed by [`VenueId`] in a `BTreeMap`, so every listing
//! comes back in ascending venue order. The aggregator relies on this to
//! produce a deterministic snapshot order regardless of which venue
//! answers first.
//!
//! # Thread Safety
//!
//! The registry is thread-safe and can be shared across async tasks using
//! `Arc<VenueRegistry>`.
//!
//! # Examples
//!
//! ```ignore
//! use crypto_order_router::infrastructure::venues::registry::VenueRegistry;
//!
//! let registry = VenueRegistry::new();
//! registry.register(binance_adapter).await;
//!
//! for adapter in registry.get_all().await {
//!     // Ascending venue id order
//! }
//! ```

use crate::domain::value_objects::VenueId;
use crate::infrastructure::venues::traits::ExchangeAdapter;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Registry of exchange adapters.
#[derive(Debug, Default)]
pub struct VenueRegistry {
    adapters: RwLock<BTreeMap<VenueId, Arc<dyn ExchangeAdapter>>>,
}

impl VenueRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an adapter.
    ///
    /// An adapter already registered under the same venue id is replaced.
    pub async fn register(&self, adapter: Arc<dyn ExchangeAdapter>) {
        let venue_id = adapter.venue_id().clone();
        let mut adapters = self.adapters.write().await;
        adapters.insert(venue_id, adapter);
    }

    /// Gets an adapter by venue id.
    pub async fn get(&self, venue_id: &VenueId) -> Option<Arc<dyn ExchangeAdapter>> {
        let adapters = self.adapters.read().await;
        adapters.get(venue_id).map(Arc::clone)
    }

    /// Gets all adapters in ascending venue id order.
    pub async fn get_all(&self) -> Vec<Arc<dyn ExchangeAdapter>> {
        let adapters = self.adapters.read().await;
        adapters.values().map(Arc::clone).collect()
    }

    /// Returns the number of registered adapters.
    pub async fn len(&self) -> usize {
        self.adapters.read().await.len()
    }

    /// Returns true if no adapters are registered.
    pub async fn is_empty(&self) -> bool {
        self.adapters.read().await.is_empty()
    }

    /// Returns the registered venue ids in ascending order.
    pub async fn venue_ids(&self) -> Vec<VenueId> {
        let adapters = self.adapters.read().await;
        adapters.keys().cloned().collect()
    }
}
