use std::sync::Arc;

use async_trait::async_trait;

use crate::types::PriceSnapshot;

/// Source of price snapshots for a settlement zone.
///
/// Implementations own their transport and timeout policy. Any failure is
/// reported as an error; callers treat every error the same way.
#[async_trait]
pub trait PriceFeed: Send + Sync + 'static {
    async fn fetch_snapshot(&self, zone: &str) -> anyhow::Result<PriceSnapshot>;
}

#[async_trait]
impl<T: PriceFeed + ?Sized> PriceFeed for Arc<T> {
    async fn fetch_snapshot(&self, zone: &str) -> anyhow::Result<PriceSnapshot> {
        (**self).fetch_snapshot(zone).await
    }
}
