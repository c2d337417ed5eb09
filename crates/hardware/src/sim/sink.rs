//! Stream sink: the consumer side of the response channel.

use tracing::warn;

use crate::common::error::{Result, SimError};
use crate::core::handshake::{DelayCounter, DelaySchedule};

/// Receives products and checks them, in order, against an expected list.
#[derive(Clone, Debug)]
pub struct StreamSink {
    expected: Vec<u32>,
    received: Vec<u32>,
    gate: DelayCounter,
}

impl StreamSink {
    /// Creates a sink expecting exactly `expected`, in order.
    pub fn new(expected: Vec<u32>, schedule: DelaySchedule) -> Self {
        let received = Vec::with_capacity(expected.len());
        Self {
            expected,
            received,
            gate: DelayCounter::new(schedule),
        }
    }

    /// The sink's `ready` signal this cycle.
    pub const fn ready(&self) -> bool {
        self.gate.is_open()
    }

    /// Advances one cycle, checking the product if one transferred.
    ///
    /// The product is recorded even when it does not match, so the received stream
    /// can be inspected after an error.
    pub fn tick(&mut self, msg: Option<u32>, cycle: u64) -> Result<()> {
        debug_assert!(msg.is_none() || self.ready(), "sink received while not ready");
        self.gate.tick(msg.is_some());

        let Some(actual) = msg else {
            return Ok(());
        };
        let index = self.received.len();
        self.received.push(actual);

        match self.expected.get(index) {
            Some(&expected) if expected == actual => Ok(()),
            Some(&expected) => {
                warn!(index, expected, actual, cycle, "sink output mismatch");
                Err(SimError::OutputMismatch {
                    index,
                    expected,
                    actual,
                    cycle,
                })
            }
            None => {
                warn!(actual, cycle, "sink received unexpected output");
                Err(SimError::UnexpectedOutput { actual, cycle })
            }
        }
    }

    /// True once every expected product has been received.
    pub fn done(&self) -> bool {
        self.received.len() >= self.expected.len()
    }

    /// Products still expected.
    pub fn pending(&self) -> usize {
        self.expected.len().saturating_sub(self.received.len())
    }

    /// Every product received so far, in arrival order.
    pub fn received(&self) -> &[u32] {
        &self.received
    }

    /// Forgets received products and rewinds the schedule.
    pub fn reset(&mut self) {
        self.received.clear();
        self.gate.reset();
    }
}
