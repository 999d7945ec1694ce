//! Resource computing strategies
//!
//! A strategy is a pure function from an ordered sequence of entity readings
//! to one capacity scalar. The sequence order is fixed by the manager
//! (primary subsystem first); each strategy decides which positions it uses.

mod interval_mapping;
mod subtract_from_max;

pub use interval_mapping::{IntervalMappingStrategy, SATURATED};
pub use subtract_from_max::SubtractFromMaxStrategy;

use crate::entity::ResourceEntity;
use std::fmt::Debug;

/// Trait for capacity model implementations
pub trait ResourceComputingStrategy: Send + Sync + Debug {
    /// Compute the capacity currently available for new work
    ///
    /// Units are strategy-defined but consistent within one deployment.
    /// Negative results mean the monitored subsystems are over capacity.
    fn compute(&self, entities: &[&dyn ResourceEntity]) -> i64;

    /// Short identifier used in logs and metric labels
    fn kind(&self) -> &'static str;
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::entity::ResourceEntity;

    /// Fixed-reading entity for strategy tests
    pub struct MockEntity {
        pub available: i64,
        pub measurements: u64,
    }

    impl MockEntity {
        pub fn new(available: i64) -> Self {
            Self {
                available,
                measurements: 0,
            }
        }
    }

    impl ResourceEntity for MockEntity {
        fn available_resources(&self) -> i64 {
            self.available
        }

        fn measurements(&self) -> u64 {
            self.measurements
        }

        fn resource_name(&self) -> &str {
            "MOCK"
        }
    }
}
