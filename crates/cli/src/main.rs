//! Command-line driver for the cycle-accurate multiplier model.
//!
//! This binary streams a list of multiplications through one multiplier variant. It performs:
//! 1. **Input selection:** Operand pairs from the command line, or seeded random operands.
//! 2. **Configuration:** Optional JSON config, overridden by command-line flags.
//! 3. **Reporting:** Statistics as a text report or JSON, and an optional per-cycle trace.

use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

use imul_core::config::{Config, Variant};
use imul_core::core::handshake::DelaySchedule;
use imul_core::core::units::{codec, reference};
use imul_core::Simulator;
use imul_core::common::Result;

#[derive(Parser, Debug)]
#[command(
    name = "imul-sim",
    author,
    version,
    about = "Cycle-accurate 32-bit shift-and-add multiplier",
    long_about = "Stream multiplications through a functional, blocking or pipelined multiplier and report cycle statistics.\n\nExamples:\n  imul-sim run 2:2 3:3\n  imul-sim run --variant pipelined --stages 8 --random 100 --sink-delay 3\n  imul-sim run --config imul.json --trace 0x80000001:2"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a stream of multiplications and print statistics.
    Run(RunArgs),
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// Operand pairs as `A:B` (decimal or 0x-prefixed hex; truncated to 32 bits).
    #[arg(value_parser = parse_pair)]
    pairs: Vec<(u32, u32)>,

    /// JSON configuration file; flags below override its values.
    #[arg(short, long)]
    config: Option<String>,

    /// Multiplier variant.
    #[arg(long, value_enum)]
    variant: Option<VariantArg>,

    /// Pipeline stages for the pipelined variant (must divide 32).
    #[arg(long)]
    stages: Option<usize>,

    /// Append N random operand pairs.
    #[arg(long, default_value_t = 0)]
    random: usize,

    /// Largest random operand.
    #[arg(long, default_value_t = 100)]
    max_operand: u32,

    /// Seed for random operands.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Source delay before the first and after every request, in cycles.
    #[arg(long)]
    src_delay: Option<u32>,

    /// Sink delay before the first and after every product, in cycles.
    #[arg(long)]
    sink_delay: Option<u32>,

    /// Irregular source delays, cycled per request (e.g. `0,3,1`).
    #[arg(long, value_delimiter = ',')]
    src_pattern: Vec<u32>,

    /// Irregular sink delays, cycled per product (e.g. `2,0,5`).
    #[arg(long, value_delimiter = ',')]
    sink_pattern: Vec<u32>,

    /// Cycle budget before the run is declared hung.
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Log a per-cycle line trace.
    #[arg(long)]
    trace: bool,

    /// Print statistics as JSON.
    #[arg(long)]
    json: bool,

    /// Statistics sections to print (summary, stream, occupancy); all if omitted.
    #[arg(long, value_delimiter = ',')]
    stats: Vec<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VariantArg {
    Functional,
    Blocking,
    Pipelined,
}

impl From<VariantArg> for Variant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::Functional => Self::Functional,
            VariantArg::Blocking => Self::Blocking,
            VariantArg::Pipelined => Self::Pipelined,
        }
    }
}

fn parse_word(s: &str) -> std::result::Result<u32, String> {
    let s = s.trim();
    let parsed = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .map_or_else(|| s.parse::<u64>(), |hex| u64::from_str_radix(hex, 16));
    parsed
        .map(|v| v as u32)
        .map_err(|e| format!("invalid operand `{s}`: {e}"))
}

fn parse_pair(s: &str) -> std::result::Result<(u32, u32), String> {
    let (a, b) = s
        .split_once(':')
        .ok_or_else(|| format!("expected `A:B`, got `{s}`"))?;
    Ok((parse_word(a)?, parse_word(b)?))
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            init_tracing(args.trace);
            if let Err(e) = cmd_run(&args) {
                eprintln!("[!] {e}");
                process::exit(1);
            }
        }
    }
}

/// Installs the stderr subscriber; `--trace` forces `trace` level, otherwise `RUST_LOG` applies.
fn init_tracing(trace: bool) {
    let filter = if trace {
        EnvFilter::new("trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the effective configuration: file (or defaults) first, then flags.
fn build_config(args: &RunArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(v) = args.variant {
        config.multiplier.variant = v.into();
    }
    if let Some(s) = args.stages {
        config.multiplier.stages = s;
    }
    if let Some(d) = args.src_delay {
        config.stream.src_initial_delay = d;
        config.stream.src_interval_delay = d;
    }
    if let Some(d) = args.sink_delay {
        config.stream.sink_initial_delay = d;
        config.stream.sink_interval_delay = d;
    }
    if let Some(m) = args.max_cycles {
        config.general.max_cycles = m;
    }
    config.general.trace |= args.trace;
    config.validate()?;
    Ok(config)
}

fn schedule(pattern: &[u32], initial: u32, interval: u32) -> DelaySchedule {
    if pattern.is_empty() {
        DelaySchedule::Fixed { initial, interval }
    } else {
        DelaySchedule::Pattern(pattern.to_vec())
    }
}

fn cmd_run(args: &RunArgs) -> Result<()> {
    let config = build_config(args)?;

    let mut pairs = args.pairs.clone();
    let mut rng = StdRng::seed_from_u64(args.seed);
    pairs.extend((0..args.random).map(|_| {
        (
            rng.gen_range(0..=args.max_operand),
            rng.gen_range(0..=args.max_operand),
        )
    }));
    if pairs.is_empty() {
        eprintln!("Error: no operands; pass `A:B` pairs or --random N");
        eprintln!("  imul-sim run 2:2 3:3");
        eprintln!("  imul-sim run --random 10");
        process::exit(2);
    }

    let inputs = pairs
        .iter()
        .map(|&(a, b)| codec::encode_request(a.into(), b.into()))
        .collect();
    let expected = pairs
        .iter()
        .map(|&(a, b)| reference::multiply(a, b))
        .collect();

    let stream = &config.stream;
    let mut sim = Simulator::with_schedules(
        &config,
        inputs,
        expected,
        schedule(
            &args.src_pattern,
            stream.src_initial_delay,
            stream.src_interval_delay,
        ),
        schedule(
            &args.sink_pattern,
            stream.sink_initial_delay,
            stream.sink_interval_delay,
        ),
    )?;

    if !args.json {
        println!(
            "[*] {} multiplier, {} stage(s), {} request(s)",
            config.multiplier.variant,
            config.multiplier.stages,
            pairs.len()
        );
    }

    let stats = sim.run()?.clone();

    if args.json {
        match serde_json::to_string_pretty(&stats) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("[!] failed to serialize statistics: {e}");
                process::exit(1);
            }
        }
    } else {
        for (&(a, b), p) in pairs.iter().zip(sim.sink.received()) {
            println!("  {a:#010x} * {b:#010x} = {p:#010x}");
        }
        stats.print_sections(&args.stats);
    }
    Ok(())
}
