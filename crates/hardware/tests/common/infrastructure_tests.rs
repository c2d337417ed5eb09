use super::harness::{RANDOM_PAIRS, TestHarness, mk_imsg, mk_omsg};
use imul_core::config::Variant;
use imul_core::core::units::codec::decode;

// ─── Message helpers ───────────────────────────────────────────────────────

#[test]
fn mk_imsg_places_multiplicand_low() {
    let req = decode(mk_imsg(0x8000_0001, 2));
    assert_eq!(req.multiplicand, 0x8000_0001);
    assert_eq!(req.multiplier, 2);
}

#[test]
fn mk_imsg_truncates_wide_operands() {
    assert_eq!(mk_imsg(0x1_0000_0005, 0x2_0000_0003), mk_imsg(5, 3));
}

#[test]
fn mk_omsg_truncates() {
    assert_eq!(mk_omsg(0x1_0000_0002), 2);
}

#[test]
fn random_pairs_stay_in_range() {
    assert!(RANDOM_PAIRS.iter().all(|&(a, b)| a <= 100 && b <= 100));
}

// ─── Harness ───────────────────────────────────────────────────────────────

#[test]
fn harness_with_no_messages_is_done_immediately() {
    let (sim, stats) = TestHarness::new(Variant::Blocking).run_sim();
    assert!(sim.done());
    assert_eq!(stats.cycles, 0);
}

#[test]
fn harness_expect_overrides_reference() {
    let mut sim = TestHarness::new(Variant::Functional)
        .pairs(&[(2, 2)])
        .expect(&[5])
        .build();
    assert!(sim.run().is_err());
}
