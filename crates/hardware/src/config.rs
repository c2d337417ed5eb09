//! Configuration system for the multiplier simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! a simulation run. It provides:
//! 1. **Defaults:** Baseline pipeline depth, cycle budget, and stream delays.
//! 2. **Structures:** Hierarchical config for general, multiplier, and stream settings.
//! 3. **Enums:** The multiplier timing variant.
//!
//! Configuration is supplied as JSON (`Config::from_json` / `Config::load`) or built with
//! `Config::default()` and overridden field by field, as the CLI does.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::error::{ConfigError, Result};
use crate::common::ITERATIONS;

/// Default configuration constants for the simulator.
mod defaults {
    use crate::common::constants;

    /// Default pipeline depth for the pipelined variant.
    pub const STAGES: usize = constants::DEFAULT_STAGES;

    /// Default cycle budget for a run.
    pub const MAX_CYCLES: u64 = constants::DEFAULT_MAX_CYCLES;

    /// Default producer/consumer delay (no delay).
    pub const DELAY: u32 = 0;
}

/// Timing variant of the multiplier.
///
/// All variants compute the same truncated product; they differ only in how many
/// cycles an operation takes and how many may be in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Variant {
    /// Functional-level reference: the product is available one cycle after acceptance.
    #[serde(alias = "functional", alias = "FL")]
    Functional,
    /// Blocking multi-cycle unit: one operation in flight, 32 busy cycles each.
    #[default]
    #[serde(alias = "blocking")]
    Blocking,
    /// Pipelined unit: a new operation may enter every cycle.
    #[serde(alias = "pipelined")]
    Pipelined,
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Functional => "functional",
            Self::Blocking => "blocking",
            Self::Pipelined => "pipelined",
        };
        f.write_str(name)
    }
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use imul_core::config::{Config, Variant};
///
/// let config = Config::default();
/// assert_eq!(config.multiplier.variant, Variant::Blocking);
/// assert_eq!(config.multiplier.stages, 4);
///
/// let json = r#"{
///     "multiplier": { "variant": "Pipelined", "stages": 8 },
///     "stream": { "sink_initial_delay": 3, "sink_interval_delay": 3 }
/// }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.multiplier.variant, Variant::Pipelined);
/// assert_eq!(config.stream.sink_interval_delay, 3);
/// assert_eq!(config.stream.src_interval_delay, 0);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Multiplier variant and pipeline shape
    #[serde(default)]
    pub multiplier: MultiplierConfig,
    /// Producer and consumer delay schedule
    #[serde(default)]
    pub stream: StreamConfig,
}

impl Config {
    /// Parses and validates a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Checks that the configuration describes a buildable multiplier.
    ///
    /// The stage count is validated for every variant so that switching variants
    /// on the command line never produces a latent invalid configuration.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.multiplier.validate()?;
        if self.general.max_cycles == 0 {
            return Err(ConfigError::ZeroCycleLimit);
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Emit a per-cycle line trace at `trace` level
    #[serde(default)]
    pub trace: bool,

    /// Cycles to run before declaring the simulation hung
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl GeneralConfig {
    /// Returns the default cycle budget.
    const fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace: false,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

/// Multiplier variant selection and pipeline shape.
#[derive(Debug, Clone, Deserialize)]
pub struct MultiplierConfig {
    /// Timing variant to instantiate
    #[serde(default)]
    pub variant: Variant,

    /// Number of pipeline stages (pipelined variant only); must divide 32
    #[serde(default = "MultiplierConfig::default_stages")]
    pub stages: usize,
}

impl MultiplierConfig {
    /// Returns the default pipeline depth.
    const fn default_stages() -> usize {
        defaults::STAGES
    }

    /// Shift-and-add iterations performed by each pipeline stage.
    ///
    /// `None` when the stage count is zero or does not divide 32.
    pub fn iterations_per_stage(&self) -> Option<u32> {
        iterations_for(self.stages).ok()
    }

    /// Checks that the stage count splits the iterations evenly.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        iterations_for(self.stages).map(|_| ())
    }
}

/// Iterations each of `stages` pipeline stages performs.
///
/// # Errors
///
/// [`ConfigError::ZeroStages`] for an empty pipeline and
/// [`ConfigError::StagesNotDivisor`] when the stages would run unequal shares.
pub fn iterations_for(stages: usize) -> std::result::Result<u32, ConfigError> {
    if stages == 0 {
        return Err(ConfigError::ZeroStages);
    }
    if ITERATIONS as usize % stages != 0 {
        return Err(ConfigError::StagesNotDivisor { stages });
    }
    Ok(ITERATIONS / stages as u32)
}

impl Default for MultiplierConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            stages: defaults::STAGES,
        }
    }
}

/// Producer and consumer delays, in cycles.
///
/// The initial delay holds off the first transfer; the interval delay is inserted
/// after every transfer. Zero means the side is always valid/ready.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamConfig {
    /// Cycles before the source first asserts valid
    #[serde(default = "StreamConfig::default_delay")]
    pub src_initial_delay: u32,

    /// Cycles the source waits after each transfer
    #[serde(default = "StreamConfig::default_delay")]
    pub src_interval_delay: u32,

    /// Cycles before the sink first asserts ready
    #[serde(default = "StreamConfig::default_delay")]
    pub sink_initial_delay: u32,

    /// Cycles the sink waits after each transfer
    #[serde(default = "StreamConfig::default_delay")]
    pub sink_interval_delay: u32,
}

impl StreamConfig {
    /// Returns the default delay (none).
    const fn default_delay() -> u32 {
        defaults::DELAY
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            src_initial_delay: defaults::DELAY,
            src_interval_delay: defaults::DELAY,
            sink_initial_delay: defaults::DELAY,
            sink_interval_delay: defaults::DELAY,
        }
    }
}
