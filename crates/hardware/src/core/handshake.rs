//! Valid/ready streaming handshake.
//!
//! This module defines the flow-control contract shared by every multiplier variant and
//! by the stream endpoints that drive it. It provides:
//! 1. **Channel:** The per-cycle wire bundle (`valid`, `ready`, `msg`) of one direction.
//! 2. **Transfer:** The transfers that fired on a given cycle.
//! 3. **Delay Scheduling:** Per-transfer producer/consumer delays, fixed or irregular.
//!
//! A transfer fires on a cycle iff `valid && ready`. When it does not fire, the sender
//! keeps the same message on the channel for the next cycle.

use std::fmt;

use crate::core::units::codec::Request;

/// Signals of one directional stream channel for the current cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Channel<T> {
    /// The sender has a message this cycle.
    pub valid: bool,
    /// The receiver can accept a message this cycle.
    pub ready: bool,
    /// Message payload; meaningful only while `valid`.
    pub msg: T,
}

impl<T: Copy + Default> Channel<T> {
    /// Builds the channel from the sender's offer and the receiver's readiness.
    pub fn new(offer: Option<T>, ready: bool) -> Self {
        Self {
            valid: offer.is_some(),
            ready,
            msg: offer.unwrap_or_default(),
        }
    }

    /// True when a transfer happens this cycle.
    #[inline]
    pub const fn fires(&self) -> bool {
        self.valid && self.ready
    }

    /// The transferred message, if the channel fires.
    #[inline]
    pub fn transferred(&self) -> Option<T> {
        self.fires().then_some(self.msg)
    }
}

impl<T: fmt::LowerHex> Channel<T> {
    /// Renders the channel as a fixed-width trace column.
    ///
    /// The message in hex when the transfer fires, `#` when the sender is stalled by the
    /// receiver, `.` when neither side is asserted, blank when the receiver waits idle.
    pub fn line_trace(&self, width: usize) -> String {
        match (self.valid, self.ready) {
            (true, true) => format!("{:0width$x}", self.msg),
            (true, false) => format!("{:<width$}", "#"),
            (false, true) => " ".repeat(width),
            (false, false) => format!("{:<width$}", "."),
        }
    }
}

/// Transfers identified on one cycle boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Transfer {
    /// Request admitted by the multiplier.
    pub accepted: Option<Request>,
    /// Product handed to the consumer.
    pub emitted: Option<u32>,
}

impl Transfer {
    /// True when neither channel fired.
    pub const fn is_idle(&self) -> bool {
        self.accepted.is_none() && self.emitted.is_none()
    }
}

/// Per-transfer delay applied by a stream endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DelaySchedule {
    /// `initial` cycles before the first transfer, `interval` cycles after each one.
    Fixed {
        /// Delay before the first transfer.
        initial: u32,
        /// Delay inserted after every transfer.
        interval: u32,
    },
    /// Irregular delays: transfer `i` waits `pattern[i % len]` cycles.
    Pattern(Vec<u32>),
}

impl DelaySchedule {
    /// A schedule with no delay at all.
    pub const fn none() -> Self {
        Self::Fixed {
            initial: 0,
            interval: 0,
        }
    }

    /// The same delay before the first and between all later transfers.
    pub const fn constant(delay: u32) -> Self {
        Self::Fixed {
            initial: delay,
            interval: delay,
        }
    }

    /// Delay before transfer number `index`.
    pub fn delay_before(&self, index: usize) -> u32 {
        match self {
            Self::Fixed { initial, .. } if index == 0 => *initial,
            Self::Fixed { interval, .. } => *interval,
            Self::Pattern(pattern) if pattern.is_empty() => 0,
            Self::Pattern(pattern) => pattern[index % pattern.len()],
        }
    }
}

impl Default for DelaySchedule {
    fn default() -> Self {
        Self::none()
    }
}

/// Countdown that gates an endpoint's `valid` or `ready` signal.
#[derive(Clone, Debug, Default)]
pub struct DelayCounter {
    schedule: DelaySchedule,
    transfers: usize,
    remaining: u32,
}

impl DelayCounter {
    /// Creates a counter at the start of `schedule`.
    pub fn new(schedule: DelaySchedule) -> Self {
        let remaining = schedule.delay_before(0);
        Self {
            schedule,
            transfers: 0,
            remaining,
        }
    }

    /// True when the endpoint may offer (or accept) a transfer this cycle.
    #[inline]
    pub const fn is_open(&self) -> bool {
        self.remaining == 0
    }

    /// Advances one cycle; `fired` reports whether the gated transfer happened.
    pub fn tick(&mut self, fired: bool) {
        if fired {
            self.transfers += 1;
            self.remaining = self.schedule.delay_before(self.transfers);
        } else {
            self.remaining = self.remaining.saturating_sub(1);
        }
    }

    /// Rewinds to the start of the schedule.
    pub fn reset(&mut self) {
        self.transfers = 0;
        self.remaining = self.schedule.delay_before(0);
    }

    /// Cycles left before the gate opens.
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }
}
