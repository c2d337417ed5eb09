//! Functional-level multiplier.
//!
//! Computes the product with the reference model as soon as a request is accepted and
//! holds it in a one-entry output buffer. It has the same stream interface as the timed
//! variants, so it doubles as a known-good device when checking the stream harness.

use tracing::debug;

use crate::core::multiplier::StreamUnit;
use crate::core::units::codec::Request;
use crate::core::units::reference;

/// One-entry buffered functional multiplier.
#[derive(Clone, Debug, Default)]
pub struct FunctionalMultiplier {
    buffer: Option<u32>,
}

impl FunctionalMultiplier {
    /// Creates an empty multiplier.
    pub const fn new() -> Self {
        Self { buffer: None }
    }
}

impl StreamUnit for FunctionalMultiplier {
    fn in_ready(&self, out_ready: bool) -> bool {
        // The buffered product leaving this cycle frees the entry for the next one.
        self.buffer.is_none() || out_ready
    }

    fn poll_output(&self) -> Option<u32> {
        self.buffer
    }

    fn advance_one_cycle(&mut self, accepted: Option<Request>, emitted: bool) {
        debug_assert!(!emitted || self.buffer.is_some(), "emitted from empty buffer");
        if emitted {
            self.buffer = None;
        }
        if let Some(req) = accepted {
            let product = reference::multiply(req.multiplicand, req.multiplier);
            debug!(
                a = req.multiplicand,
                b = req.multiplier,
                product,
                "functional multiplier accepted request"
            );
            self.buffer = Some(product);
        }
    }

    fn reset(&mut self) {
        self.buffer = None;
    }

    fn in_flight(&self) -> usize {
        usize::from(self.buffer.is_some())
    }

    fn line_trace(&self) -> String {
        self.buffer
            .map_or_else(|| "        ".to_string(), |p| format!("{p:08x}"))
    }
}
