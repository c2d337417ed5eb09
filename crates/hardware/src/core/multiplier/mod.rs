//! Multiplier variants and their common stream contract.
//!
//! This module defines how a variant plugs into the stream handshake:
//! 1. **`StreamUnit`:** The per-variant contract (readiness, output, cycle update).
//! 2. **`UnitDispatch`:** Enum dispatch over the variants, chosen at construction.
//! 3. **`Multiplier`:** The variant plus its channel wiring, which identifies the
//!    transfers of each cycle before applying the state update.

/// Blocking multi-cycle variant.
pub mod blocking;

/// Functional-level variant.
pub mod functional;

/// Pipelined variant.
pub mod pipelined;

use crate::common::ConfigError;
use crate::config::{MultiplierConfig, Variant};
use crate::core::handshake::{Channel, Transfer};
use crate::core::units::codec::{self, Request};

use self::blocking::BlockingMultiplier;
use self::functional::FunctionalMultiplier;
use self::pipelined::PipelinedMultiplier;

/// Contract every multiplier variant implements.
///
/// Evaluation order within a cycle is fixed: the combinational outputs (`in_ready`,
/// `poll_output`) are read from the current state, the environment decides which
/// transfers fire, and `advance_one_cycle` applies the resulting update.
pub trait StreamUnit {
    /// Input readiness for this cycle.
    ///
    /// `out_ready` is the consumer's readiness; a variant whose input may only advance
    /// when its output drains (the pipeline) depends on it.
    fn in_ready(&self, out_ready: bool) -> bool;

    /// The product offered on the output channel this cycle, if any.
    fn poll_output(&self) -> Option<u32>;

    /// Applies one clock edge.
    ///
    /// # Arguments
    ///
    /// * `accepted` - The request transferred in this cycle, if the input fired.
    /// * `emitted`  - Whether the offered product transferred out this cycle.
    fn advance_one_cycle(&mut self, accepted: Option<Request>, emitted: bool);

    /// Returns to the power-on state, discarding in-flight work.
    fn reset(&mut self);

    /// Number of requests admitted but not yet emitted.
    fn in_flight(&self) -> usize;

    /// Fixed-width one-line state summary.
    fn line_trace(&self) -> String;
}

/// Type-erased multiplier variant.
#[derive(Clone, Debug)]
pub enum UnitDispatch {
    /// Functional-level variant.
    Functional(FunctionalMultiplier),
    /// Blocking variant.
    Blocking(BlockingMultiplier),
    /// Pipelined variant.
    Pipelined(PipelinedMultiplier),
}

impl UnitDispatch {
    /// Builds the variant selected by `config`.
    ///
    /// # Errors
    ///
    /// Rejects a stage count that does not split the iterations evenly, whichever
    /// variant is selected, matching `Config::validate`.
    pub fn new(config: &MultiplierConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(match config.variant {
            Variant::Functional => Self::Functional(FunctionalMultiplier::new()),
            Variant::Blocking => Self::Blocking(BlockingMultiplier::new()),
            Variant::Pipelined => Self::Pipelined(PipelinedMultiplier::new(config.stages)?),
        })
    }

    /// Which variant this is.
    pub const fn variant(&self) -> Variant {
        match self {
            Self::Functional(_) => Variant::Functional,
            Self::Blocking(_) => Variant::Blocking,
            Self::Pipelined(_) => Variant::Pipelined,
        }
    }

    fn unit(&self) -> &dyn StreamUnit {
        match self {
            Self::Functional(u) => u,
            Self::Blocking(u) => u,
            Self::Pipelined(u) => u,
        }
    }

    fn unit_mut(&mut self) -> &mut dyn StreamUnit {
        match self {
            Self::Functional(u) => u,
            Self::Blocking(u) => u,
            Self::Pipelined(u) => u,
        }
    }
}

impl StreamUnit for UnitDispatch {
    fn in_ready(&self, out_ready: bool) -> bool {
        self.unit().in_ready(out_ready)
    }

    fn poll_output(&self) -> Option<u32> {
        self.unit().poll_output()
    }

    fn advance_one_cycle(&mut self, accepted: Option<Request>, emitted: bool) {
        self.unit_mut().advance_one_cycle(accepted, emitted);
    }

    fn reset(&mut self) {
        self.unit_mut().reset();
    }

    fn in_flight(&self) -> usize {
        self.unit().in_flight()
    }

    fn line_trace(&self) -> String {
        self.unit().line_trace()
    }
}

/// A multiplier variant wired to its request and response channels.
///
/// The producer presents its message with [`offer_input`](Self::offer_input) and the
/// consumer its readiness with [`set_output_ready`](Self::set_output_ready); both are
/// wires for the current cycle only and are cleared by
/// [`advance_one_cycle`](Self::advance_one_cycle).
///
/// # Examples
///
/// ```
/// use imul_core::config::{MultiplierConfig, Variant};
/// use imul_core::core::multiplier::Multiplier;
/// use imul_core::core::units::codec::encode_request;
///
/// let config = MultiplierConfig { variant: Variant::Pipelined, stages: 4 };
/// let mut mul = Multiplier::new(&config).unwrap();
/// mul.offer_input(Some(encode_request(3, 3)));
/// mul.set_output_ready(true);
/// assert!(mul.advance_one_cycle().accepted.is_some());
///
/// let mut product = None;
/// while product.is_none() {
///     mul.set_output_ready(true);
///     product = mul.advance_one_cycle().emitted;
/// }
/// assert_eq!(product, Some(9));
/// ```
#[derive(Clone, Debug)]
pub struct Multiplier {
    unit: UnitDispatch,
    input: Option<u64>,
    output_ready: bool,
}

impl Multiplier {
    /// Builds the variant selected by `config` with idle channels.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`UnitDispatch::new`] for an invalid stage count.
    pub fn new(config: &MultiplierConfig) -> Result<Self, ConfigError> {
        UnitDispatch::new(config).map(Self::from_unit)
    }

    /// Wraps an already-constructed variant.
    pub const fn from_unit(unit: UnitDispatch) -> Self {
        Self {
            unit,
            input: None,
            output_ready: false,
        }
    }

    /// Which variant this is.
    pub const fn variant(&self) -> Variant {
        self.unit.variant()
    }

    /// The underlying variant, for inspection.
    pub const fn unit(&self) -> &UnitDispatch {
        &self.unit
    }

    /// Drives the request channel for this cycle: `Some` asserts valid with that message.
    pub fn offer_input(&mut self, msg: Option<u64>) {
        self.input = msg;
    }

    /// Drives the consumer's ready signal for this cycle.
    pub fn set_output_ready(&mut self, ready: bool) {
        self.output_ready = ready;
    }

    /// Input readiness given the consumer's current readiness.
    pub fn in_ready(&self) -> bool {
        self.unit.in_ready(self.output_ready)
    }

    /// Product currently offered on the output channel.
    pub fn poll_output(&self) -> Option<u32> {
        self.unit.poll_output().map(codec::encode)
    }

    /// Current request channel signals.
    pub fn input_channel(&self) -> Channel<u64> {
        Channel::new(self.input, self.in_ready())
    }

    /// Current response channel signals.
    pub fn output_channel(&self) -> Channel<u32> {
        Channel::new(self.poll_output(), self.output_ready)
    }

    /// Identifies this cycle's transfers, applies the clock edge, and clears the wires.
    pub fn advance_one_cycle(&mut self) -> Transfer {
        let accepted = self.input_channel().transferred().map(codec::decode);
        let emitted = self.output_channel().transferred();

        self.unit.advance_one_cycle(accepted, emitted.is_some());
        self.input = None;
        self.output_ready = false;

        Transfer { accepted, emitted }
    }

    /// Returns the variant and both channels to their power-on state.
    pub fn reset(&mut self) {
        self.unit.reset();
        self.input = None;
        self.output_ready = false;
    }

    /// Number of requests admitted but not yet emitted.
    pub fn in_flight(&self) -> usize {
        self.unit.in_flight()
    }

    /// One-line state summary.
    pub fn line_trace(&self) -> String {
        self.unit.line_trace()
    }
}
