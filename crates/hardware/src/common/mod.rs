//! Common types and constants used throughout the multiplier model.
//!
//! This module provides the building blocks shared by every component:
//! 1. **Constants:** Operand width, iteration count, and simulation defaults.
//! 2. **Error Handling:** Simulation and configuration error types.

/// Datapath and simulation constants.
pub mod constants;

/// Error types and the crate-wide `Result` alias.
pub mod error;

pub use constants::{ITERATIONS, WORD_BITS, WORD_MASK};
pub use error::{ConfigError, Result, SimError};
