//! Datapath units.
//!
//! This module contains the stateless and stateful pieces the control paths are built from:
//! the operand codec, the shift-and-add engine, and the functional reference.

/// Request/response message packing.
pub mod codec;

/// Functional reference multiplier (golden model).
pub mod reference;

/// Iterative shift-and-add engine.
pub mod shift_add;
