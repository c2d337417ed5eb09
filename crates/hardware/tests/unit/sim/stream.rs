//! End-to-End Stream Tests.
//!
//! Runs every multiplier variant between a delayed source and a checking sink. The
//! sink must receive exactly the reference products, in order, regardless of variant,
//! pipeline depth or how irregularly either endpoint applies backpressure.

use imul_core::config::Variant;
use imul_core::core::handshake::DelaySchedule;
use imul_core::core::units::reference;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use crate::common::harness::{BLOCKING_LATENCY, RANDOM_PAIRS, TestHarness};

const BASIC: &[(u64, u64)] = &[(2, 2), (3, 3), (0, 5), (7, 0), (1, 1), (9, 9)];

const OVERFLOW: &[(u64, u64)] = &[
    (0x8000_0001, 2),
    (0xc000_0002, 4),
    (0xFFFF_FFFF, 0xFFFF_FFFF),
    (0x1_0000_0002, 3),
    (0x0001_0000, 0x0001_0000),
];

// ══════════════════════════════════════════════════════════
// Case matrix: message sets × delays × variants
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::basic(BASIC, 0, 0)]
#[case::overflow(OVERFLOW, 0, 0)]
#[case::random(&RANDOM_PAIRS, 0, 0)]
#[case::sink_delay1(&RANDOM_PAIRS, 0, 1)]
#[case::sink_delay3(&RANDOM_PAIRS, 0, 3)]
#[case::src_delay2(&RANDOM_PAIRS, 2, 0)]
#[case::both_delays(BASIC, 3, 5)]
fn stream_delivers_reference_products(
    #[case] pairs: &[(u64, u64)],
    #[case] src_delay: u32,
    #[case] sink_delay: u32,
    #[values(Variant::Functional, Variant::Blocking, Variant::Pipelined)] variant: Variant,
) {
    let (sim, stats) = TestHarness::new(variant)
        .pairs(pairs)
        .src_schedule(DelaySchedule::constant(src_delay))
        .sink_delay(sink_delay)
        .run_sim();

    let expected: Vec<u32> = pairs
        .iter()
        .map(|&(a, b)| reference::multiply(a as u32, b as u32))
        .collect();
    assert_eq!(sim.sink.received(), expected.as_slice());
    assert_eq!(stats.requests_accepted, pairs.len() as u64);
    assert_eq!(stats.products_emitted, pairs.len() as u64);
    assert_eq!(sim.dut.in_flight(), 0);
}

#[rstest]
fn pipeline_depths_all_produce_correct_results(#[values(1, 2, 4, 8, 16, 32)] stages: usize) {
    let (sim, _) = TestHarness::new(Variant::Pipelined)
        .stages(stages)
        .pairs(&RANDOM_PAIRS)
        .sink_delay(1)
        .run_sim();
    assert_eq!(sim.sink.received().len(), RANDOM_PAIRS.len());
}

// ══════════════════════════════════════════════════════════
// Cycle counts
// ══════════════════════════════════════════════════════════

#[test]
fn blocking_serializes_requests() {
    let (_, stats) = TestHarness::new(Variant::Blocking)
        .pairs(&[(2, 2), (3, 3)])
        .run_sim();
    // Each request occupies the unit for the accept cycle plus 32 iterations plus the
    // emit cycle; the second is accepted right after the first leaves.
    assert_eq!(stats.first_output_cycle, Some(BLOCKING_LATENCY));
    assert_eq!(stats.last_output_cycle, Some(2 * BLOCKING_LATENCY + 1));
    assert_eq!(stats.cycles, 2 * (BLOCKING_LATENCY + 1));
    assert_eq!(stats.input_stall_cycles, BLOCKING_LATENCY);
    assert_eq!(stats.peak_in_flight, 1);
}

#[rstest]
#[case(1)]
#[case(4)]
#[case(16)]
fn pipelined_fills_once_then_streams(#[case] stages: usize) {
    let n = 40;
    let pairs: Vec<(u64, u64)> = (0..n).map(|k| (k, k + 1)).collect();
    let (_, stats) = TestHarness::new(Variant::Pipelined)
        .stages(stages)
        .pairs(&pairs)
        .run_sim();
    assert_eq!(stats.fill_latency(), Some(stages as u64));
    assert_eq!(stats.cycles, n + stages as u64);
    assert_eq!(stats.steady_state_throughput(), Some(1.0));
    assert_eq!(stats.input_stall_cycles, 0);
    assert_eq!(stats.peak_in_flight, stages);
}

#[test]
fn functional_answers_next_cycle() {
    let (_, stats) = TestHarness::new(Variant::Functional)
        .pairs(BASIC)
        .run_sim();
    assert_eq!(stats.first_output_cycle, Some(1));
    assert_eq!(stats.cycles, BASIC.len() as u64 + 1);
}

#[test]
fn pipelined_beats_blocking_on_long_streams() {
    let pairs: Vec<(u64, u64)> = (0..50).map(|k| (k * 3, k + 7)).collect();
    let (_, blocking) = TestHarness::new(Variant::Blocking).pairs(&pairs).run_sim();
    let (_, pipelined) = TestHarness::new(Variant::Pipelined).pairs(&pairs).run_sim();
    assert!(pipelined.cycles * 10 < blocking.cycles);
}

// ══════════════════════════════════════════════════════════
// Backpressure
// ══════════════════════════════════════════════════════════

#[test]
fn late_sink_stalls_full_pipeline() {
    let mut sim = TestHarness::new(Variant::Pipelined)
        .stages(4)
        .pairs(&RANDOM_PAIRS[..8])
        .sink_schedule(DelaySchedule::Fixed {
            initial: 10,
            interval: 0,
        })
        .build();

    sim.run_for(10).expect("no output before the sink opens");
    assert_eq!(sim.dut.in_flight(), 4);
    assert_eq!(sim.src.pending(), 4);
    assert!(sim.sink.received().is_empty());

    let stats = sim.run().expect("completes").clone();
    assert_eq!(stats.first_output_cycle, Some(10));
    assert_eq!(stats.last_output_cycle, Some(17));
    assert_eq!(stats.cycles, 18);
    assert_eq!(stats.output_stall_cycles, 6);
    assert_eq!(stats.input_stall_cycles, 6);
}

#[test]
fn blocking_never_holds_more_than_one_request() {
    let (_, stats) = TestHarness::new(Variant::Blocking)
        .pairs(&RANDOM_PAIRS)
        .sink_schedule(DelaySchedule::Pattern(vec![0, 7, 2]))
        .run_sim();
    assert_eq!(stats.peak_in_flight, 1);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn irregular_backpressure_preserves_order(
        pairs in prop::collection::vec((any::<u32>(), any::<u32>()), 1..24),
        src_pattern in prop::collection::vec(0u32..6, 1..5),
        sink_pattern in prop::collection::vec(0u32..6, 1..5),
        stages in prop::sample::select(vec![1usize, 2, 4, 8, 16, 32]),
        variant in prop::sample::select(vec![Variant::Functional, Variant::Blocking, Variant::Pipelined]),
    ) {
        let wide: Vec<(u64, u64)> = pairs.iter().map(|&(a, b)| (a.into(), b.into())).collect();
        let (sim, stats) = TestHarness::new(variant)
            .stages(stages)
            .pairs(&wide)
            .src_schedule(DelaySchedule::Pattern(src_pattern))
            .sink_schedule(DelaySchedule::Pattern(sink_pattern))
            .run_sim();

        let expected: Vec<u32> = pairs.iter().map(|&(a, b)| a.wrapping_mul(b)).collect();
        prop_assert_eq!(sim.sink.received(), expected.as_slice());
        prop_assert_eq!(stats.products_emitted, pairs.len() as u64);
    }
}
