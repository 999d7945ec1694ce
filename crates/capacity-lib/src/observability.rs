//! Observability for capacity estimation
//!
//! Provides:
//! - Prometheus metrics (reported capacity, per-entity readings, over-capacity reports)
//! - Structured logging of capacity decisions with tracing
//!
//! Nothing here is pushed anywhere. The embedding process gathers the
//! default Prometheus registry and installs its own tracing subscriber.

use crate::entity::ResourceEntity;
use crate::manager::{ConsensusStorageResourceManager, ResourceManager};
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge, register_int_gauge_vec,
    IntCounter, IntCounterVec, IntGauge, IntGaugeVec,
};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<CapacityMetricsInner> = OnceLock::new();

struct CapacityMetricsInner {
    available_resources: IntGauge,
    entity_available_resources: IntGaugeVec,
    entity_measurements: IntGaugeVec,
    over_capacity: IntCounter,
    queries: IntCounterVec,
}

impl CapacityMetricsInner {
    fn new() -> Self {
        Self {
            available_resources: register_int_gauge!(
                "capacity_available_resources",
                "Most recent available-resources value reported by the manager"
            )
            .expect("Failed to register available_resources"),

            entity_available_resources: register_int_gauge_vec!(
                "capacity_entity_available_resources",
                "Latest reading of each monitored resource entity",
                &["entity"]
            )
            .expect("Failed to register entity_available_resources"),

            entity_measurements: register_int_gauge_vec!(
                "capacity_entity_measurements",
                "Sample counter of each monitored resource entity",
                &["entity"]
            )
            .expect("Failed to register entity_measurements"),

            over_capacity: register_int_counter!(
                "capacity_over_capacity_total",
                "Capacity reports with a negative value"
            )
            .expect("Failed to register over_capacity"),

            queries: register_int_counter_vec!(
                "capacity_queries_total",
                "Capacity queries answered, by computing strategy",
                &["strategy"]
            )
            .expect("Failed to register queries"),
        }
    }
}

/// Capacity metrics for Prometheus exposition
///
/// Lightweight handle to the global metrics instance; clones share the same
/// underlying metrics.
#[derive(Clone)]
pub struct CapacityMetrics {
    _private: (),
}

impl Default for CapacityMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl CapacityMetrics {
    /// Create a metrics handle (registers global metrics on first call)
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(CapacityMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &CapacityMetricsInner {
        GLOBAL_METRICS.get_or_init(CapacityMetricsInner::new)
    }

    /// Query the manager once and publish the result with its entity snapshots
    pub fn record(&self, manager: &ConsensusStorageResourceManager) -> i64 {
        let available = manager.available_resources();
        self.observe_available(manager.strategy_kind(), available);

        for entity in manager.entities().as_sequence() {
            self.observe_entity(entity);
        }

        available
    }

    /// Publish a capacity value computed by `strategy`
    pub fn observe_available(&self, strategy: &str, available: i64) {
        let inner = self.inner();
        inner.available_resources.set(available);
        inner.queries.with_label_values(&[strategy]).inc();
        if available < 0 {
            inner.over_capacity.inc();
        }
    }

    /// Publish one entity's current snapshot
    pub fn observe_entity(&self, entity: &dyn ResourceEntity) {
        let inner = self.inner();
        let name = entity.resource_name();
        inner
            .entity_available_resources
            .with_label_values(&[name])
            .set(entity.available_resources());
        inner
            .entity_measurements
            .with_label_values(&[name])
            .set(i64::try_from(entity.measurements()).unwrap_or(i64::MAX));
    }
}

/// Structured logger for capacity events
#[derive(Clone)]
pub struct CapacityLogger {
    node_id: String,
}

impl CapacityLogger {
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
        }
    }

    /// Log the strategy a manager was wired with
    pub fn log_strategy_configured(&self, manager: &ConsensusStorageResourceManager) {
        let entities = manager.entities();
        info!(
            event = "capacity_strategy_configured",
            node = %self.node_id,
            strategy = manager.strategy_kind(),
            consensus = %entities.consensus.resource_name(),
            storage = %entities.storage.resource_name(),
            "Capacity estimation configured"
        );
    }

    /// Log a reported capacity value
    pub fn log_capacity(&self, strategy: &str, available: i64) {
        if available < 0 {
            warn!(
                event = "capacity_reported",
                node = %self.node_id,
                strategy = %strategy,
                available = available,
                over_capacity = true,
                "Monitored subsystems over capacity"
            );
        } else {
            info!(
                event = "capacity_reported",
                node = %self.node_id,
                strategy = %strategy,
                available = available,
                over_capacity = false,
                "Capacity reported"
            );
        }
    }

    /// Log that the primary load passed every configured tier
    pub fn log_saturated(&self, entity: &dyn ResourceEntity) {
        warn!(
            event = "capacity_saturated",
            node = %self.node_id,
            entity = %entity.resource_name(),
            load = entity.available_resources(),
            measurements = entity.measurements(),
            "Load exceeds every configured tier, no capacity left"
        );
    }
}
