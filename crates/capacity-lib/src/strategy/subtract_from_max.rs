//! Subtract-from-max strategy
//!
//! Linear capacity model: a shared ceiling consumed by every monitored
//! subsystem together.

use super::ResourceComputingStrategy;
use crate::entity::ResourceEntity;
use tracing::debug;

/// Reports `max` minus the sum of every entity's reading
///
/// The result is never clamped to zero. A negative value tells the caller
/// the subsystems are over the ceiling and load should be shed.
#[derive(Debug, Clone, Copy)]
pub struct SubtractFromMaxStrategy {
    max: u64,
}

impl SubtractFromMaxStrategy {
    /// Create a strategy with the given capacity ceiling
    pub fn new(max: u64) -> Self {
        debug!(max, "Configured subtract-from-max strategy");
        Self { max }
    }

    /// Configured capacity ceiling
    pub fn max(&self) -> u64 {
        self.max
    }
}

impl ResourceComputingStrategy for SubtractFromMaxStrategy {
    fn compute(&self, entities: &[&dyn ResourceEntity]) -> i64 {
        let consumed: i128 = entities
            .iter()
            .map(|entity| i128::from(entity.available_resources()))
            .sum();
        let headroom = i128::from(self.max) - consumed;

        // Only reachable with a ceiling or sum outside the i64 range
        headroom.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }

    fn kind(&self) -> &'static str {
        "subtract_from_max"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::test_support::MockEntity;

    #[test]
    fn test_subtracts_all_entities() {
        let strategy = SubtractFromMaxStrategy::new(1000);
        let consensus = MockEntity::new(110);
        let storage = MockEntity::new(50);

        assert_eq!(strategy.compute(&[&consensus, &storage]), 840);
    }

    #[test]
    fn test_order_does_not_matter() {
        let strategy = SubtractFromMaxStrategy::new(1000);
        let a = MockEntity::new(110);
        let b = MockEntity::new(50);
        let c = MockEntity::new(-20);

        assert_eq!(strategy.compute(&[&a, &b, &c]), 860);
        assert_eq!(strategy.compute(&[&c, &a, &b]), 860);
    }

    #[test]
    fn test_over_capacity_is_negative() {
        let strategy = SubtractFromMaxStrategy::new(100);
        let consensus = MockEntity::new(90);
        let storage = MockEntity::new(60);

        assert_eq!(strategy.compute(&[&consensus, &storage]), -50);
    }

    #[test]
    fn test_zero_ceiling() {
        let strategy = SubtractFromMaxStrategy::new(0);
        let idle = MockEntity::new(0);

        assert_eq!(strategy.compute(&[&idle, &idle]), 0);
        assert_eq!(strategy.compute(&[]), 0);
    }

    #[test]
    fn test_no_entities_returns_ceiling() {
        let strategy = SubtractFromMaxStrategy::new(1000);
        assert_eq!(strategy.compute(&[]), 1000);
    }

    #[test]
    fn test_extreme_values_saturate() {
        let strategy = SubtractFromMaxStrategy::new(u64::MAX);
        assert_eq!(strategy.compute(&[]), i64::MAX);

        let strategy = SubtractFromMaxStrategy::new(0);
        let huge = MockEntity::new(i64::MAX);
        assert_eq!(strategy.compute(&[&huge, &huge]), i64::MIN);
    }
}
