//! Resource managers
//!
//! A manager fixes which entities feed a strategy, and in which order, so
//! callers only ever ask for one number.

use crate::entity::ResourceEntity;
use crate::error::{CapacityError, Result};
use crate::strategy::ResourceComputingStrategy;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Trait for capacity queries made by admission control
pub trait ResourceManager: Send + Sync {
    /// Capacity currently available for new work
    fn available_resources(&self) -> i64;
}

/// Consensus engine and storage entities, in strategy order
///
/// The consensus engine is always the primary entity. Interval mapping
/// therefore tracks consensus load, while subtract-from-max sums both.
#[derive(Clone)]
pub struct ConsensusStorageEntities {
    pub consensus: Arc<dyn ResourceEntity>,
    pub storage: Arc<dyn ResourceEntity>,
}

impl ConsensusStorageEntities {
    /// Entities as the ordered sequence handed to strategies
    pub fn as_sequence(&self) -> [&dyn ResourceEntity; 2] {
        [self.consensus.as_ref(), self.storage.as_ref()]
    }
}

impl fmt::Debug for ConsensusStorageEntities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsensusStorageEntities")
            .field("consensus", &self.consensus.resource_name())
            .field("storage", &self.storage.resource_name())
            .finish()
    }
}

/// Manager wiring a consensus engine monitor and a storage monitor
pub struct ConsensusStorageResourceManager {
    entities: ConsensusStorageEntities,
    strategy: Box<dyn ResourceComputingStrategy>,
}

impl ConsensusStorageResourceManager {
    /// Create a manager from both entities and the strategy it owns
    pub fn new(
        consensus: Arc<dyn ResourceEntity>,
        storage: Arc<dyn ResourceEntity>,
        strategy: Box<dyn ResourceComputingStrategy>,
    ) -> Self {
        debug!(
            consensus = %consensus.resource_name(),
            storage = %storage.resource_name(),
            strategy = strategy.kind(),
            "Created consensus/storage resource manager"
        );

        Self {
            entities: ConsensusStorageEntities { consensus, storage },
            strategy,
        }
    }

    /// Start building a manager whose wiring is checked at build time
    pub fn builder() -> ConsensusStorageResourceManagerBuilder {
        ConsensusStorageResourceManagerBuilder::new()
    }

    /// Entities this manager reads
    pub fn entities(&self) -> &ConsensusStorageEntities {
        &self.entities
    }

    /// Identifier of the plugged-in strategy
    pub fn strategy_kind(&self) -> &'static str {
        self.strategy.kind()
    }
}

impl ResourceManager for ConsensusStorageResourceManager {
    fn available_resources(&self) -> i64 {
        self.strategy.compute(&self.entities.as_sequence())
    }
}

impl fmt::Debug for ConsensusStorageResourceManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsensusStorageResourceManager")
            .field("entities", &self.entities)
            .field("strategy", &self.strategy)
            .finish()
    }
}

/// Builder for [`ConsensusStorageResourceManager`]
#[derive(Default)]
pub struct ConsensusStorageResourceManagerBuilder {
    consensus: Option<Arc<dyn ResourceEntity>>,
    storage: Option<Arc<dyn ResourceEntity>>,
    strategy: Option<Box<dyn ResourceComputingStrategy>>,
}

impl ConsensusStorageResourceManagerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the consensus engine monitor (primary entity)
    pub fn consensus(mut self, entity: Arc<dyn ResourceEntity>) -> Self {
        self.consensus = Some(entity);
        self
    }

    /// Set the storage monitor (secondary entity)
    pub fn storage(mut self, entity: Arc<dyn ResourceEntity>) -> Self {
        self.storage = Some(entity);
        self
    }

    /// Set the computing strategy
    pub fn strategy(mut self, strategy: Box<dyn ResourceComputingStrategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Build the manager
    ///
    /// # Errors
    /// * `MissingEntity` if either entity was not set
    /// * `MissingStrategy` if no strategy was set
    pub fn build(self) -> Result<ConsensusStorageResourceManager> {
        let consensus = self
            .consensus
            .ok_or(CapacityError::MissingEntity { role: "consensus" })?;
        let storage = self
            .storage
            .ok_or(CapacityError::MissingEntity { role: "storage" })?;
        let strategy = self.strategy.ok_or(CapacityError::MissingStrategy)?;

        Ok(ConsensusStorageResourceManager::new(
            consensus, storage, strategy,
        ))
    }
}
