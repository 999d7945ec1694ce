//! Capacity estimation for consensus admission control
//!
//! This crate reduces the live state of monitored subsystems into a single
//! "available resources" value that an admission-control or batching layer
//! consults before accepting new client requests:
//! - Resource entities exposing point-in-time subsystem readings
//! - Pluggable computing strategies (interval mapping, subtract-from-max)
//! - A consensus/storage resource manager wiring both together
//! - Configuration, metrics and structured logging around them
//!
//! The library only reports a number. Enforcing admission is the caller's job.

pub mod config;
pub mod entity;
pub mod error;
pub mod manager;
pub mod observability;
pub mod strategy;

pub use config::{CapacitySettings, StrategyConfig, TierConfig};
pub use entity::{MonitoredResource, ResourceEntity};
pub use error::{CapacityError, Result};
pub use manager::{
    ConsensusStorageEntities, ConsensusStorageResourceManager,
    ConsensusStorageResourceManagerBuilder, ResourceManager,
};
pub use observability::{CapacityLogger, CapacityMetrics};
pub use strategy::{IntervalMappingStrategy, ResourceComputingStrategy, SubtractFromMaxStrategy};
