//! Capacity configuration
//!
//! Selects the computing strategy and its parameters. Settings are layered
//! from an optional file and `CAPACITY_*` environment variables, with `__`
//! separating nested keys (`CAPACITY_STRATEGY__KIND=subtract_from_max`).

use crate::error::Result;
use crate::strategy::{IntervalMappingStrategy, ResourceComputingStrategy, SubtractFromMaxStrategy};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Reference tier table used when no strategy is configured
const DEFAULT_TIERS: &[(u64, u64)] = &[(200, 100), (600, 10), (1000, 5)];

/// One threshold/value row of an interval mapping table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TierConfig {
    pub threshold: u64,
    pub value: u64,
}

/// Strategy selection
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyConfig {
    /// Step function over the consensus engine's load
    IntervalMapping { tiers: Vec<TierConfig> },
    /// Shared ceiling minus the load of every entity
    SubtractFromMax { max: u64 },
}

impl Default for StrategyConfig {
    fn default() -> Self {
        StrategyConfig::IntervalMapping {
            tiers: DEFAULT_TIERS
                .iter()
                .map(|&(threshold, value)| TierConfig { threshold, value })
                .collect(),
        }
    }
}

impl StrategyConfig {
    /// Instantiate the configured strategy, validating its parameters
    pub fn build(&self) -> Result<Box<dyn ResourceComputingStrategy>> {
        match self {
            StrategyConfig::IntervalMapping { tiers } => {
                let mapping = tiers.iter().map(|t| (t.threshold, t.value)).collect();
                Ok(Box::new(IntervalMappingStrategy::new(mapping)?))
            }
            StrategyConfig::SubtractFromMax { max } => {
                Ok(Box::new(SubtractFromMaxStrategy::new(*max)))
            }
        }
    }

    /// Name of the selected strategy
    pub fn kind(&self) -> &'static str {
        match self {
            StrategyConfig::IntervalMapping { .. } => "interval_mapping",
            StrategyConfig::SubtractFromMax { .. } => "subtract_from_max",
        }
    }
}

/// Capacity estimation settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CapacitySettings {
    #[serde(default)]
    pub strategy: StrategyConfig,
}

impl CapacitySettings {
    /// Load settings from an optional file and the environment
    ///
    /// Environment variables override the file. A malformed configuration
    /// is an error; only a missing strategy falls back to the default.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Self = builder
            .add_source(env)
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| {
                warn!(error = %e, "Failed to load capacity configuration");
                e
            })?;

        info!(strategy = settings.strategy.kind(), "Capacity configuration loaded");
        Ok(settings)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("CAPACITY")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
