//! Blocking multi-cycle multiplier.
//!
//! A three-state controller sequences a single shift-and-add engine:
//!
//! ```text
//!            in fires                engine done
//!   IDLE ───────────────► BUSY ────────────────► DONE
//!    ▲                    │  ▲                    │
//!    │                    └──┘ one step/cycle     │
//!    └────────────────────────────────────────────┘
//!                        out fires
//! ```
//!
//! Input readiness is asserted only in `IDLE`, so at most one request is ever in
//! flight. A stalled consumer keeps the unit in `DONE` with the product held stable,
//! which in turn keeps the input refused: that is how backpressure reaches the producer.

use tracing::debug;

use crate::core::multiplier::StreamUnit;
use crate::core::units::codec::Request;
use crate::core::units::shift_add::ShiftAddEngine;

/// Controller state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum State {
    /// Waiting for a request.
    #[default]
    Idle,
    /// Running shift-and-add iterations.
    Busy,
    /// Holding the product until the consumer takes it.
    Done,
}

impl State {
    /// Next-state function.
    ///
    /// * `in_fire`     - A request transferred this cycle.
    /// * `engine_done` - The engine finished its last iteration this cycle.
    /// * `out_fire`    - The product transferred this cycle.
    pub const fn next(self, in_fire: bool, engine_done: bool, out_fire: bool) -> Self {
        match self {
            Self::Idle if in_fire => Self::Busy,
            Self::Busy if engine_done => Self::Done,
            Self::Done if out_fire => Self::Idle,
            s => s,
        }
    }
}

/// Blocking multiplier: FSM plus one datapath.
#[derive(Clone, Debug, Default)]
pub struct BlockingMultiplier {
    state: State,
    engine: ShiftAddEngine,
}

impl BlockingMultiplier {
    /// Creates a multiplier in `IDLE`.
    pub const fn new() -> Self {
        Self {
            state: State::Idle,
            engine: ShiftAddEngine::new(),
        }
    }

    /// Current controller state.
    pub const fn state(&self) -> State {
        self.state
    }

    /// The datapath, for inspection.
    pub const fn engine(&self) -> &ShiftAddEngine {
        &self.engine
    }
}

impl StreamUnit for BlockingMultiplier {
    fn in_ready(&self, _out_ready: bool) -> bool {
        self.state == State::Idle
    }

    fn poll_output(&self) -> Option<u32> {
        match self.state {
            State::Done => self.engine.result(),
            State::Idle | State::Busy => None,
        }
    }

    fn advance_one_cycle(&mut self, accepted: Option<Request>, emitted: bool) {
        debug_assert!(
            accepted.is_none() || self.state == State::Idle,
            "request accepted while {:?}",
            self.state
        );
        debug_assert!(
            !emitted || self.state == State::Done,
            "product emitted while {:?}",
            self.state
        );

        match self.state {
            State::Idle => {
                if let Some(req) = accepted {
                    self.engine.start(req.multiplicand, req.multiplier);
                }
            }
            State::Busy => self.engine.step(),
            State::Done => {}
        }

        let next = self
            .state
            .next(accepted.is_some(), self.engine.is_done(), emitted);
        if next != self.state {
            debug!(
                from = ?self.state,
                to = ?next,
                iterations = self.engine.iterations(),
                "blocking multiplier transition"
            );
        }
        self.state = next;
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn in_flight(&self) -> usize {
        usize::from(self.state != State::Idle)
    }

    fn line_trace(&self) -> String {
        match self.state {
            State::Idle => "I   ".to_string(),
            State::Busy => format!("B{:>2} ", self.engine.iterations()),
            State::Done => "D   ".to_string(),
        }
    }
}
