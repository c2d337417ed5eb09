//! Statistics Tests.
//!
//! Checks the counters collected during a real run and the report/JSON renderings.

use imul_core::config::Variant;
use imul_core::stats::{STATS_SECTIONS, SimStats};

use crate::common::harness::TestHarness;

#[test]
fn blocking_run_counters() {
    let (_, stats) = TestHarness::new(Variant::Blocking).pairs(&[(7, 6)]).run_sim();
    assert_eq!(stats.cycles, 34);
    assert_eq!(stats.requests_accepted, 1);
    assert_eq!(stats.products_emitted, 1);
    // In flight from the cycle after acceptance through the emit cycle.
    assert_eq!(stats.busy_cycles, 33);
    assert_eq!(stats.output_stall_cycles, 0);
    assert_eq!(stats.steady_state_throughput(), None);
    assert!((stats.throughput() - 1.0 / 34.0).abs() < 1e-12);
}

#[test]
fn output_stalls_count_refused_products() {
    let (_, stats) = TestHarness::new(Variant::Functional)
        .pairs(&[(1, 1)])
        .sink_schedule(imul_core::core::handshake::DelaySchedule::Fixed {
            initial: 4,
            interval: 0,
        })
        .run_sim();
    // Product ready on cycle 1, taken on cycle 4.
    assert_eq!(stats.output_stall_cycles, 3);
    assert_eq!(stats.first_output_cycle, Some(4));
}

#[test]
fn display_contains_every_section() {
    let text = SimStats::default().to_string();
    assert!(text.contains("MULTIPLIER SIMULATION STATISTICS"));
    assert!(text.contains("STREAM STALLS"));
    assert!(text.contains("OCCUPANCY"));
    assert_eq!(STATS_SECTIONS, ["summary", "stream", "occupancy"]);
}

#[test]
fn optional_lines_appear_only_with_outputs() {
    let empty = SimStats::default().to_string();
    assert!(!empty.contains("sim_first_output"));

    let (_, stats) = TestHarness::new(Variant::Pipelined)
        .pairs(&[(1, 2), (3, 4)])
        .run_sim();
    let text = stats.to_string();
    assert!(text.contains("sim_first_output         cycle 4"));
    assert!(text.contains("sim_steady_throughput    1.0000 /cycle"));
}

#[test]
fn serializes_to_json() {
    let (_, stats) = TestHarness::new(Variant::Pipelined)
        .stages(2)
        .pairs(&[(1, 2), (3, 4), (5, 6)])
        .run_sim();
    let value = serde_json::to_value(&stats).expect("serializes");
    assert_eq!(value["cycles"], 5);
    assert_eq!(value["products_emitted"], 3);
    assert_eq!(value["first_output_cycle"], 2);
    assert_eq!(value["peak_in_flight"], 2);
}
