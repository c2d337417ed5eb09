//! Pipelined multiplier.
//!
//! The 32 shift-and-add iterations are split evenly over `S` stages. Each stage is a
//! latch holding at most one [`Slot`]; on every cycle that the pipeline advances, each
//! slot runs its stage's share of iterations and moves one stage forward, and stage 0
//! admits a new request if the input transfer fires. The last stage drives the output
//! channel, so a request accepted on cycle `t` is offered as a product on cycle `t + S`.
//!
//! Hazards are purely structural. If the last stage is occupied and its product is not
//! taken, the whole pipeline holds for the cycle and input readiness drops. Slots never
//! overtake one another, so products leave in admission order.

use tracing::{debug, trace};

use crate::common::ConfigError;
use crate::config::iterations_for;
use crate::core::multiplier::StreamUnit;
use crate::core::units::codec::Request;
use crate::core::units::shift_add::ShiftAddEngine;

/// One in-flight request and its partial datapath state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    /// Admission order, starting at zero after reset.
    pub seq: u64,
    /// Operands and accumulator for this request.
    pub engine: ShiftAddEngine,
}

/// Stage latches plus admission bookkeeping.
#[derive(Clone, Debug)]
pub struct PipelinedMultiplier {
    stages: Vec<Option<Slot>>,
    per_stage: u32,
    next_seq: u64,
}

impl PipelinedMultiplier {
    /// Creates an empty pipeline of `stages` stages.
    ///
    /// # Errors
    ///
    /// Fails unless `stages` is non-zero and divides 32, so every stage runs the same
    /// share of iterations and the last stage always holds a finished product.
    pub fn new(stages: usize) -> Result<Self, ConfigError> {
        let per_stage = iterations_for(stages)?;
        Ok(Self {
            stages: vec![None; stages],
            per_stage,
            next_seq: 0,
        })
    }

    /// Number of stages (and fill latency in cycles).
    pub fn depth(&self) -> usize {
        self.stages.len()
    }

    /// Iterations each stage performs.
    pub const fn iterations_per_stage(&self) -> u32 {
        self.per_stage
    }

    /// Contents of stage `index`, if any.
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.stages.get(index).and_then(Option::as_ref)
    }

    fn last(&self) -> Option<&Slot> {
        self.stages.last().and_then(Option::as_ref)
    }

    /// True when the pipeline must hold its contents this cycle: the last stage is
    /// occupied and its product does not leave.
    fn stalled(&self, out_ready: bool) -> bool {
        self.last().is_some() && !(out_ready && self.poll_output().is_some())
    }

    fn admit(&mut self, req: Request) -> Slot {
        let seq = self.next_seq;
        self.next_seq += 1;
        let mut engine = ShiftAddEngine::started(req.multiplicand, req.multiplier);
        engine.step_n(self.per_stage);
        debug!(
            seq,
            a = req.multiplicand,
            b = req.multiplier,
            "pipelined multiplier admitted request"
        );
        Slot { seq, engine }
    }
}

impl StreamUnit for PipelinedMultiplier {
    fn in_ready(&self, out_ready: bool) -> bool {
        !self.stalled(out_ready)
    }

    fn poll_output(&self) -> Option<u32> {
        self.last().and_then(|slot| slot.engine.result())
    }

    fn advance_one_cycle(&mut self, accepted: Option<Request>, emitted: bool) {
        debug_assert!(
            !emitted || self.last().is_some(),
            "product emitted from empty last stage"
        );

        if self.stalled(emitted) {
            debug_assert!(accepted.is_none(), "request accepted while stalled");
            trace!(in_flight = self.in_flight(), "pipelined multiplier stalled");
            return;
        }

        if let Some(slot) = self.last().filter(|_| emitted) {
            debug!(seq = slot.seq, "pipelined multiplier completed request");
        }

        // Shift from the back so each latch is read before it is overwritten.
        let per_stage = self.per_stage;
        for i in (1..self.stages.len()).rev() {
            self.stages[i] = self.stages[i - 1].take().map(|mut slot| {
                slot.engine.step_n(per_stage);
                slot
            });
        }
        let entry = accepted.map(|req| self.admit(req));
        self.stages[0] = entry;
    }

    fn reset(&mut self) {
        self.stages.iter_mut().for_each(|s| *s = None);
        self.next_seq = 0;
    }

    fn in_flight(&self) -> usize {
        self.stages.iter().filter(|s| s.is_some()).count()
    }

    fn line_trace(&self) -> String {
        self.stages
            .iter()
            .map(|s| s.map_or_else(|| "  ".to_string(), |slot| format!("{:>2}", slot.seq % 100)))
            .collect::<Vec<_>>()
            .join("|")
    }
}
