//! Global Datapath Constants.
//!
//! This module defines constants shared by the arithmetic core and the control paths. It includes:
//! 1. **Width Constants:** Operand and product widths, and the mask that truncates to them.
//! 2. **Algorithm Constants:** The number of shift-and-add iterations per multiplication.
//! 3. **Simulation Constants:** Default pipeline depth and cycle budget.

/// Width in bits of an operand and of the truncated product.
pub const WORD_BITS: u32 = 32;

/// Mask selecting the low `WORD_BITS` bits of the 64-bit accumulator.
pub const WORD_MASK: u64 = 0xFFFF_FFFF;

/// Number of shift-and-add iterations needed to consume every multiplier bit.
pub const ITERATIONS: u32 = WORD_BITS;

/// Bit position of the multiplier field inside a 64-bit request message.
pub const MULTIPLIER_SHIFT: u32 = 32;

/// Default number of stages in the pipelined variant (8 iterations per stage).
pub const DEFAULT_STAGES: usize = 4;

/// Default cycle budget for a simulation run before it is declared hung.
pub const DEFAULT_MAX_CYCLES: u64 = 100_000;
