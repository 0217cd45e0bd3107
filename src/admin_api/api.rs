//! The admin API port consumed by discovery and the prober.

use async_trait::async_trait;

use crate::admin_api::types::{FetchResult, Target, Upstream};

/// Operations the health checker needs from the load balancer's admin plane.
///
/// Implementations must be safe to call concurrently from many tasks.
/// `set_target_weight` must be idempotent at the same value.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// List every upstream currently registered.
    async fn list_upstreams(&self) -> FetchResult<Vec<Upstream>>;

    /// List the targets of one upstream, with their current weights.
    async fn list_targets(&self, upstream_id: &str) -> FetchResult<Vec<Target>>;

    /// Set the weight of the target registered as `target_url` under `upstream_id`.
    async fn set_target_weight(
        &self,
        upstream_id: &str,
        target_url: &str,
        weight: i64,
    ) -> FetchResult<()>;
}
