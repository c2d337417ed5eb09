//! # Unit Components
//!
//! Organizes the unit tests for the multiplier datapath, the control variants, the
//! stream handshake, configuration, statistics and the simulation context.



/// Stream-level tests through the full source → multiplier → sink context.
pub mod sim;

/// Statistics counters and report rendering.
pub mod stats;
