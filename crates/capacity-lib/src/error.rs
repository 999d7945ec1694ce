//! Error types for capacity estimation
//!
//! Every error is a construction-time configuration error. Once a strategy
//! or manager exists, its queries are total and never fail.

use thiserror::Error;

/// Errors raised while building strategies, managers or settings
#[derive(Debug, Error)]
pub enum CapacityError {
    /// Interval mapping table has no tiers
    #[error("interval mapping table must contain at least one tier")]
    EmptyMapping,

    /// Two tiers share the same threshold
    #[error("interval mapping table has duplicate threshold {threshold}")]
    DuplicateThreshold { threshold: u64 },

    /// Mapped value cannot be reported as a signed 64-bit capacity
    #[error("tier value {value} at threshold {threshold} exceeds i64::MAX")]
    ValueOutOfRange { threshold: u64, value: u64 },

    /// Manager was built without one of its entities
    #[error("resource manager is missing its {role} entity")]
    MissingEntity { role: &'static str },

    /// Manager was built without a computing strategy
    #[error("resource manager is missing its computing strategy")]
    MissingStrategy,

    /// Settings could not be loaded or deserialized
    #[error("invalid capacity configuration: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, CapacityError>;
