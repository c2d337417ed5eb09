//! Cycle-accurate 32-bit integer multiplier model.
//!
//! This crate models a truncating 32×32→32 unsigned multiplier as a hardware datapath block
//! behind a valid/ready streaming interface:
//! 1. **Core:** Shift-and-add datapath, blocking FSM and pipelined control, operand codec.
//! 2. **Handshake:** Channel signals and configurable producer/consumer delays.
//! 3. **Simulation:** Stream source/sink, the explicit clocked context, and statistics.
//! 4. **Configuration:** Variant selection, pipeline depth, delays, cycle budget.

/// Common constants and error types.
pub mod common;
/// Simulator configuration (defaults, variant enum, hierarchical config structures).
pub mod config;
/// Multiplier core (datapath units, handshake, variants).
pub mod core;
/// Stream endpoints and the simulation context.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or parse from JSON.
pub use crate::config::Config;
/// A multiplier variant wired to its stream channels.
pub use crate::core::Multiplier;
/// Top-level simulator; construct with `Simulator::new` or `Simulator::from_operands`.
pub use crate::sim::Simulator;
