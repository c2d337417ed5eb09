//! Stream source: the producer side of the request channel.

use crate::core::handshake::{DelayCounter, DelaySchedule};

/// Sends a fixed list of 64-bit request messages, one per transfer.
///
/// The current message stays on the channel until it transfers; the delay schedule
/// decides on which cycles `valid` may be asserted at all.
#[derive(Clone, Debug)]
pub struct StreamSource {
    msgs: Vec<u64>,
    idx: usize,
    gate: DelayCounter,
}

impl StreamSource {
    /// Creates a source that will send `msgs` in order.
    pub fn new(msgs: Vec<u64>, schedule: DelaySchedule) -> Self {
        Self {
            msgs,
            idx: 0,
            gate: DelayCounter::new(schedule),
        }
    }

    /// The message offered this cycle (`valid` + payload).
    pub fn offer(&self) -> Option<u64> {
        if self.gate.is_open() {
            self.msgs.get(self.idx).copied()
        } else {
            None
        }
    }

    /// Advances one cycle; `fired` reports whether the offered message transferred.
    pub fn tick(&mut self, fired: bool) {
        debug_assert!(!fired || self.offer().is_some(), "source fired without offer");
        if fired {
            self.idx += 1;
        }
        self.gate.tick(fired);
    }

    /// True once every message has transferred.
    pub fn done(&self) -> bool {
        self.idx >= self.msgs.len()
    }

    /// Messages not yet transferred.
    pub fn pending(&self) -> usize {
        self.msgs.len().saturating_sub(self.idx)
    }

    /// Rewinds to the first message and the start of the schedule.
    pub fn reset(&mut self) {
        self.idx = 0;
        self.gate.reset();
    }
}
