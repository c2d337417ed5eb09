//! Multiplier core: datapath, control, and stream interface.
//!
//! 1. **Units:** Operand codec, shift-and-add engine, and the functional reference.
//! 2. **Handshake:** Valid/ready channel signals and endpoint delay scheduling.
//! 3. **Multiplier:** Functional, blocking, and pipelined control around the datapath.

/// Valid/ready channel signals and delay scheduling.
pub mod handshake;

/// Multiplier variants and the shared stream contract.
pub mod multiplier;

/// Datapath units.
pub mod units;

pub use multiplier::{Multiplier, StreamUnit};
