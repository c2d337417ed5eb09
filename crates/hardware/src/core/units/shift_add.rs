//! Iterative shift-and-add multiplier datapath.
//!
//! The engine holds three 64-bit registers: an accumulator, the multiplicand (shifted
//! left once per iteration) and the multiplier (shifted right once per iteration).
//! An iteration adds the current multiplicand into the accumulator when the low bit of
//! the multiplier is set. After 32 iterations every multiplier bit has been consumed
//! and the low word of the accumulator is the product modulo 2^32.
//!
//! Control (when to start, how many iterations per cycle) lives outside the engine so
//! the blocking FSM and the pipeline stages can share it.

use crate::common::{ITERATIONS, WORD_MASK};

/// Progress of the engine through one multiplication.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// No operation loaded.
    #[default]
    Idle,
    /// Operands loaded, iterations remaining.
    Running,
    /// All iterations performed; the result is valid.
    Done,
}

/// Shift-and-add multiplier registers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShiftAddEngine {
    acc: u64,
    a: u64,
    b: u64,
    count: u32,
    phase: Phase,
}

impl ShiftAddEngine {
    /// Creates an idle engine.
    pub const fn new() -> Self {
        Self {
            acc: 0,
            a: 0,
            b: 0,
            count: 0,
            phase: Phase::Idle,
        }
    }

    /// Creates an engine already loaded with `a` and `b`.
    pub const fn started(a: u32, b: u32) -> Self {
        Self {
            acc: 0,
            a: a as u64,
            b: b as u64,
            count: 0,
            phase: Phase::Running,
        }
    }

    /// Loads the operands and clears the accumulator and iteration counter.
    ///
    /// Only valid when the engine is not running.
    pub fn start(&mut self, a: u32, b: u32) {
        debug_assert!(
            self.phase != Phase::Running,
            "shift-add engine restarted mid-operation"
        );
        *self = Self::started(a, b);
    }

    /// Performs one shift-and-add iteration.
    ///
    /// Stepping an engine that is not running is a contract violation; release
    /// builds leave the registers untouched.
    pub fn step(&mut self) {
        debug_assert!(
            self.phase == Phase::Running,
            "shift-add engine stepped while {:?}",
            self.phase
        );
        if self.phase != Phase::Running {
            return;
        }

        if self.b & 1 == 1 {
            self.acc = self.acc.wrapping_add(self.a);
        }
        self.a <<= 1;
        self.b >>= 1;
        self.count += 1;

        if self.count == ITERATIONS {
            self.phase = Phase::Done;
        }
    }

    /// Performs up to `n` iterations, stopping early once the engine is done.
    pub fn step_n(&mut self, n: u32) {
        for _ in 0..n {
            if self.phase != Phase::Running {
                break;
            }
            self.step();
        }
    }

    /// Returns true once all 32 iterations have been performed.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Current phase.
    #[inline]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Iterations performed since the last `start`.
    #[inline]
    pub const fn iterations(&self) -> u32 {
        self.count
    }

    /// Partial accumulator value, truncated to the product width.
    #[inline]
    pub const fn partial(&self) -> u32 {
        (self.acc & WORD_MASK) as u32
    }

    /// The truncated product, available only once the engine is done.
    #[inline]
    pub fn result(&self) -> Option<u32> {
        self.is_done().then(|| self.partial())
    }
}
