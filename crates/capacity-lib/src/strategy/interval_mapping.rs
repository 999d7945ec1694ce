//! Interval mapping strategy
//!
//! Step-function capacity model. As the primary subsystem's load crosses
//! configured thresholds, the reported capacity drops tier by tier.

use super::ResourceComputingStrategy;
use crate::entity::ResourceEntity;
use crate::error::{CapacityError, Result};
use tracing::{debug, warn};

/// Capacity reported once the load exceeds every configured threshold
pub const SATURATED: i64 = 0;

/// Maps the primary entity's load onto a sorted threshold table
///
/// Only the first entity in the sequence is read. The value returned is the
/// one paired with the smallest threshold at or above the current load.
#[derive(Debug, Clone)]
pub struct IntervalMappingStrategy {
    /// (threshold, value) pairs, thresholds strictly increasing
    tiers: Vec<(u64, u64)>,
}

impl IntervalMappingStrategy {
    /// Build a strategy from (threshold, value) pairs in any order
    ///
    /// # Errors
    /// * `EmptyMapping` if no tiers are given
    /// * `DuplicateThreshold` if two tiers share a threshold
    /// * `ValueOutOfRange` if a value cannot be returned as an `i64`
    pub fn new(mut mapping: Vec<(u64, u64)>) -> Result<Self> {
        if mapping.is_empty() {
            warn!("Rejected interval mapping with no tiers");
            return Err(CapacityError::EmptyMapping);
        }

        mapping.sort_unstable_by_key(|&(threshold, _)| threshold);

        if let Some(pair) = mapping.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            let threshold = pair[0].0;
            warn!(threshold, "Rejected interval mapping with duplicate threshold");
            return Err(CapacityError::DuplicateThreshold { threshold });
        }

        if let Some(&(threshold, value)) = mapping.iter().find(|&&(_, v)| i64::try_from(v).is_err())
        {
            warn!(threshold, value, "Rejected interval mapping value out of range");
            return Err(CapacityError::ValueOutOfRange { threshold, value });
        }

        debug!(
            tiers = mapping.len(),
            max_threshold = mapping[mapping.len() - 1].0,
            "Configured interval mapping strategy"
        );

        Ok(Self { tiers: mapping })
    }

    /// Sorted (threshold, value) table
    pub fn tiers(&self) -> &[(u64, u64)] {
        &self.tiers
    }

    /// Capacity for a given load level
    ///
    /// Lower-bound search: a load equal to a threshold selects that tier.
    pub fn value_for(&self, load: i64) -> i64 {
        // Negative load sits below every threshold
        let load = u64::try_from(load).unwrap_or(0);
        let index = self.tiers.partition_point(|&(threshold, _)| threshold < load);

        match self.tiers.get(index) {
            // Values were range-checked at construction
            Some(&(_, value)) => value as i64,
            None => SATURATED,
        }
    }
}

impl ResourceComputingStrategy for IntervalMappingStrategy {
    fn compute(&self, entities: &[&dyn ResourceEntity]) -> i64 {
        match entities.first() {
            Some(primary) => self.value_for(primary.available_resources()),
            None => SATURATED,
        }
    }

    fn kind(&self) -> &'static str {
        "interval_mapping"
    }
}
