//! Simulator: the explicit context holding the clock and every component.
//!
//! One call to [`Simulator::tick`] is one clock cycle, evaluated in three phases:
//! 1. **Combinational:** Read the source's offer, the sink's readiness, and the
//!    multiplier's readiness and output from current state.
//! 2. **Transfers:** A channel fires where both sides assert.
//! 3. **Update:** Source, multiplier and sink advance together from the same fired set.
//!
//! No component reads another's state directly; all coupling goes through the channels.

use tracing::{debug, trace};

use crate::common::error::{Result, SimError};
use crate::config::Config;
use crate::core::handshake::{Channel, DelaySchedule, Transfer};
use crate::core::multiplier::Multiplier;
use crate::core::units::codec;
use crate::core::units::reference;
use crate::sim::sink::StreamSink;
use crate::sim::source::StreamSource;
use crate::stats::SimStats;

/// Top-level simulator: source → multiplier → sink, plus clock and statistics.
#[derive(Clone, Debug)]
pub struct Simulator {
    /// Current cycle (number of ticks since construction or reset).
    pub cycle: u64,
    /// Request producer.
    pub src: StreamSource,
    /// Device under test.
    pub dut: Multiplier,
    /// Product consumer and checker.
    pub sink: StreamSink,
    /// Counters collected while ticking.
    pub stats: SimStats,
    max_cycles: u64,
    trace: bool,
}

impl Simulator {
    /// Builds a simulator whose endpoint delays come from `config.stream`.
    pub fn new(config: &Config, inputs: Vec<u64>, expected: Vec<u32>) -> Result<Self> {
        let stream = &config.stream;
        let src = DelaySchedule::Fixed {
            initial: stream.src_initial_delay,
            interval: stream.src_interval_delay,
        };
        let sink = DelaySchedule::Fixed {
            initial: stream.sink_initial_delay,
            interval: stream.sink_interval_delay,
        };
        Self::with_schedules(config, inputs, expected, src, sink)
    }

    /// Builds a simulator with explicit (possibly irregular) endpoint delays.
    pub fn with_schedules(
        config: &Config,
        inputs: Vec<u64>,
        expected: Vec<u32>,
        src_schedule: DelaySchedule,
        sink_schedule: DelaySchedule,
    ) -> Result<Self> {
        config.validate()?;
        debug!(
            variant = %config.multiplier.variant,
            stages = config.multiplier.stages,
            inputs = inputs.len(),
            "building simulator"
        );
        Ok(Self {
            cycle: 0,
            src: StreamSource::new(inputs, src_schedule),
            dut: Multiplier::new(&config.multiplier)?,
            sink: StreamSink::new(expected, sink_schedule),
            stats: SimStats::default(),
            max_cycles: config.general.max_cycles,
            trace: config.general.trace,
        })
    }

    /// Builds a simulator for operand pairs, expecting the reference products.
    pub fn from_operands(config: &Config, operands: &[(u32, u32)]) -> Result<Self> {
        let inputs = operands
            .iter()
            .map(|&(a, b)| codec::encode_request(a.into(), b.into()))
            .collect();
        let expected = operands
            .iter()
            .map(|&(a, b)| reference::multiply(a, b))
            .collect();
        Self::new(config, inputs, expected)
    }

    /// Returns every component to its initial state and rewinds both endpoints.
    pub fn reset(&mut self) {
        self.cycle = 0;
        self.src.reset();
        self.dut.reset();
        self.sink.reset();
        self.stats = SimStats::default();
    }

    /// Advances the whole system by one clock cycle.
    ///
    /// A checking failure in the sink is returned after the cycle has been applied,
    /// so the simulator state reflects the offending transfer.
    pub fn tick(&mut self) -> Result<Transfer> {
        // Combinational evaluation.
        let offer = self.src.offer();
        let sink_ready = self.sink.ready();
        self.dut.offer_input(offer);
        self.dut.set_output_ready(sink_ready);

        let input = self.dut.input_channel();
        let output = self.dut.output_channel();
        let in_flight = self.dut.in_flight();
        if self.trace {
            trace!(cycle = self.cycle, "{}", self.render_trace(&input, &output));
        }

        // Transfers and state update.
        let transfer = self.dut.advance_one_cycle();
        self.src.tick(transfer.accepted.is_some());
        let checked = self.sink.tick(transfer.emitted, self.cycle);

        self.record(&input, &output, in_flight, &transfer);
        self.cycle += 1;

        checked.map(|()| transfer)
    }

    /// True once the source has sent everything and the sink has received everything.
    pub fn done(&self) -> bool {
        self.src.done() && self.sink.done()
    }

    /// Ticks until [`done`](Self::done), failing on a checking error or when the cycle
    /// budget runs out.
    pub fn run(&mut self) -> Result<&SimStats> {
        while !self.done() {
            if self.cycle >= self.max_cycles {
                return Err(SimError::CycleLimitExceeded {
                    limit: self.max_cycles,
                    pending_inputs: self.src.pending(),
                    pending_outputs: self.sink.pending(),
                });
            }
            let _ = self.tick()?;
        }
        debug!(
            cycles = self.cycle,
            products = self.stats.products_emitted,
            "simulation finished"
        );
        Ok(&self.stats)
    }

    /// Ticks `cycles` times regardless of completion.
    pub fn run_for(&mut self, cycles: u64) -> Result<()> {
        for _ in 0..cycles {
            let _ = self.tick()?;
        }
        Ok(())
    }

    /// One-line view of the current cycle's channels and multiplier state.
    pub fn line_trace(&self) -> String {
        let mut dut = self.dut.clone();
        dut.offer_input(self.src.offer());
        dut.set_output_ready(self.sink.ready());
        self.render_trace(&dut.input_channel(), &dut.output_channel())
    }

    fn render_trace(&self, input: &Channel<u64>, output: &Channel<u32>) -> String {
        format!(
            "{:>4}: {} > {} > {}",
            self.cycle,
            input.line_trace(16),
            self.dut.line_trace(),
            output.line_trace(8)
        )
    }

    fn record(
        &mut self,
        input: &Channel<u64>,
        output: &Channel<u32>,
        in_flight: usize,
        transfer: &Transfer,
    ) {
        let stats = &mut self.stats;
        stats.cycles += 1;
        if transfer.accepted.is_some() {
            stats.requests_accepted += 1;
        }
        if transfer.emitted.is_some() {
            stats.products_emitted += 1;
            let _ = stats.first_output_cycle.get_or_insert(self.cycle);
            stats.last_output_cycle = Some(self.cycle);
        }
        if input.valid && !input.ready {
            stats.input_stall_cycles += 1;
        }
        if output.valid && !output.ready {
            stats.output_stall_cycles += 1;
        }
        if in_flight > 0 {
            stats.busy_cycles += 1;
        }
        stats.peak_in_flight = stats.peak_in_flight.max(in_flight);
    }
}
