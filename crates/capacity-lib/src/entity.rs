//! Resource entities
//!
//! A resource entity is a read-only view onto one monitored subsystem's
//! load or capacity. The subsystem owns and updates it; strategies and
//! managers only ever read snapshots through [`ResourceEntity`].

use std::fmt;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

/// Well-known entity names
pub mod names {
    pub const CONSENSUS_ENGINE: &str = "consensus_engine";
    pub const STORAGE: &str = "storage";
}

/// Point-in-time reading of a monitored subsystem
///
/// Implementations must return an untorn value from each accessor while the
/// owning subsystem updates the entity concurrently. No consistency is
/// promised between two accessors or across repeated calls.
pub trait ResourceEntity: Send + Sync {
    /// Latest reading. Strategies decide whether this is a load level or a
    /// consumption amount; negative values mean the subsystem is over-committed.
    fn available_resources(&self) -> i64;

    /// Number of times the reading has been sampled since creation
    fn measurements(&self) -> u64;

    /// Stable identifier, used for logging and metrics attribution
    fn resource_name(&self) -> &str;
}

/// Atomic resource entity embedded by a monitored subsystem
///
/// The subsystem calls [`record`](Self::record) or [`adjust`](Self::adjust)
/// as its load changes and shares the entity with managers through an `Arc`.
pub struct MonitoredResource {
    name: String,
    available: AtomicI64,
    measurements: AtomicU64,
}

impl MonitoredResource {
    /// Create an entity with a zero reading and no measurements
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_initial(name, 0)
    }

    /// Create an entity starting from a known reading
    ///
    /// The initial value is not counted as a measurement.
    pub fn with_initial(name: impl Into<String>, available: i64) -> Self {
        Self {
            name: name.into(),
            available: AtomicI64::new(available),
            measurements: AtomicU64::new(0),
        }
    }

    /// Store a new reading
    pub fn record(&self, available: i64) {
        self.available.store(available, Ordering::Release);
        self.measurements.fetch_add(1, Ordering::AcqRel);
    }

    /// Move the reading by `delta` and return the new value
    ///
    /// Saturates at the i64 bounds instead of wrapping.
    pub fn adjust(&self, delta: i64) -> i64 {
        let previous = self
            .available
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some(current.saturating_add(delta))
            })
            .unwrap_or_else(|current| current);
        self.measurements.fetch_add(1, Ordering::AcqRel);
        previous.saturating_add(delta)
    }
}

impl ResourceEntity for MonitoredResource {
    fn available_resources(&self) -> i64 {
        self.available.load(Ordering::Acquire)
    }

    fn measurements(&self) -> u64 {
        self.measurements.load(Ordering::Acquire)
    }

    fn resource_name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for MonitoredResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonitoredResource")
            .field("name", &self.name)
            .field("available", &self.available_resources())
            .field("measurements", &self.measurements())
            .finish()
    }
}
