//! Simulation and configuration error types.
//!
//! The multiplier itself has no runtime failure modes: every 32-bit operand pair is valid
//! and truncation is defined behavior. Errors only arise in the environment around it:
//! 1. **Checking:** A stream sink observed a product it did not expect.
//! 2. **Liveness:** A run did not drain within its cycle budget.
//! 3. **Configuration:** Invalid parameters, or a config file that cannot be read or parsed.

use std::io;

/// Errors that can occur while building or running a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// The sink received a product that differs from the expected one.
    #[error("output {index} mismatch at cycle {cycle}: expected {expected:#010x}, got {actual:#010x}")]
    OutputMismatch {
        /// Position of the product in the output stream.
        index: usize,
        /// Product the sink expected.
        expected: u32,
        /// Product the sink actually received.
        actual: u32,
        /// Cycle on which the transfer happened.
        cycle: u64,
    },

    /// The sink received a product after every expected product had been consumed.
    #[error("unexpected output {actual:#010x} at cycle {cycle}")]
    UnexpectedOutput {
        /// Product the sink received.
        actual: u32,
        /// Cycle on which the transfer happened.
        cycle: u64,
    },

    /// The simulation did not finish within its cycle budget.
    #[error(
        "cycle limit of {limit} exceeded ({pending_inputs} inputs not sent, {pending_outputs} outputs not received)"
    )]
    CycleLimitExceeded {
        /// The configured cycle budget.
        limit: u64,
        /// Messages still queued in the source.
        pending_inputs: usize,
        /// Products the sink is still waiting for.
        pending_outputs: usize,
    },

    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// The configuration file could not be read.
    #[error("config I/O error: {0}")]
    ConfigIo(#[from] io::Error),

    /// The configuration file is not valid JSON for [`Config`](crate::config::Config).
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Reasons a [`Config`](crate::config::Config) is rejected by `validate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The pipelined variant needs at least one stage.
    #[error("pipeline must have at least one stage")]
    ZeroStages,

    /// Every stage must run the same number of iterations.
    #[error("{stages} stages do not evenly divide 32 iterations")]
    StagesNotDivisor {
        /// The rejected stage count.
        stages: usize,
    },

    /// A zero cycle budget can never complete a transfer.
    #[error("max_cycles must be greater than zero")]
    ZeroCycleLimit,
}

/// Result alias used across the simulator.
pub type Result<T> = std::result::Result<T, SimError>;
