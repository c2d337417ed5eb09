//! Simulation environment.
//!
//! Provides the stream endpoints that drive the multiplier and the explicit
//! simulation context that clocks everything together.

/// Stream sink (consumer and checker).
pub mod sink;

/// Top-level simulation context.
pub mod simulator;

/// Stream source (producer).
pub mod source;

pub use simulator::Simulator;
pub use sink::StreamSink;
pub use source::StreamSource;
