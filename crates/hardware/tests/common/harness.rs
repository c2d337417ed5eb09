use imul_core::Simulator;
use imul_core::config::{Config, Variant};
use imul_core::core::handshake::DelaySchedule;
use imul_core::core::units::{codec, reference};
use imul_core::stats::SimStats;
use tracing_subscriber::EnvFilter;

/// Cycles from acceptance to the product being offered by the blocking variant:
/// one cycle to load the engine plus one per iteration.
pub const BLOCKING_LATENCY: u64 = 33;

/// Ten operand pairs in `[0, 100]`, fixed so failures are reproducible.
pub const RANDOM_PAIRS: [(u64, u64); 10] = [
    (37, 81),
    (0, 54),
    (99, 99),
    (12, 7),
    (100, 1),
    (64, 33),
    (5, 0),
    (71, 88),
    (23, 45),
    (90, 16),
];

/// Makes an input message, truncating both operands to 32 bits.
pub fn mk_imsg(a: u64, b: u64) -> u64 {
    codec::encode_request(a, b)
}

/// Makes an output message, truncating to 32 bits.
pub fn mk_omsg(a: u64) -> u32 {
    a as u32
}

/// Installs a test-writer subscriber once per process; `RUST_LOG` selects the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builder for a source → multiplier → sink simulation.
pub struct TestHarness {
    config: Config,
    src: DelaySchedule,
    sink: DelaySchedule,
    inputs: Vec<u64>,
    expected: Vec<u32>,
}

impl TestHarness {
    pub fn new(variant: Variant) -> Self {
        init_tracing();
        let mut config = Config::default();
        config.multiplier.variant = variant;
        config.general.trace = true;
        Self {
            config,
            src: DelaySchedule::none(),
            sink: DelaySchedule::none(),
            inputs: Vec::new(),
            expected: Vec::new(),
        }
    }

    pub fn stages(mut self, stages: usize) -> Self {
        self.config.multiplier.stages = stages;
        self
    }

    pub fn max_cycles(mut self, max_cycles: u64) -> Self {
        self.config.general.max_cycles = max_cycles;
        self
    }

    /// Same delay before the first and after every product (the classic sink delay).
    pub fn sink_delay(mut self, delay: u32) -> Self {
        self.sink = DelaySchedule::constant(delay);
        self
    }

    pub fn src_schedule(mut self, schedule: DelaySchedule) -> Self {
        self.src = schedule;
        self
    }

    pub fn sink_schedule(mut self, schedule: DelaySchedule) -> Self {
        self.sink = schedule;
        self
    }

    /// Queues operand pairs and expects their reference products.
    pub fn pairs(mut self, pairs: &[(u64, u64)]) -> Self {
        for &(a, b) in pairs {
            self.inputs.push(mk_imsg(a, b));
            self.expected
                .push(reference::multiply(a as u32, b as u32));
        }
        self
    }

    /// Replaces the expected products.
    pub fn expect(mut self, expected: &[u32]) -> Self {
        self.expected = expected.to_vec();
        self
    }

    pub fn build(self) -> Simulator {
        Simulator::with_schedules(&self.config, self.inputs, self.expected, self.src, self.sink)
            .expect("valid test configuration")
    }

    /// Builds and runs to completion, panicking on any checking error.
    pub fn run_sim(self) -> (Simulator, SimStats) {
        let mut sim = self.build();
        let stats = match sim.run() {
            Ok(stats) => stats.clone(),
            Err(e) => panic!("simulation failed: {e}"),
        };
        (sim, stats)
    }
}
