use super::*;

#[test]
fn significant_ties_round_up() {
    assert_eq!(round_significant(1.125, 3), 1.13);
    assert_eq!(round_significant(2.625, 3), 2.63);
    assert_eq!(round_significant(10.25, 3), 10.3);
    assert_eq!(round_significant(-1.125, 3), -1.13);
}

#[test]
fn significant_non_ties_follow_exact_value() {
    // 1.005 is stored just below the tie.
    assert_eq!(round_significant(1.005, 3), 1.0);
    assert_eq!(round_significant(12.345, 3), 12.3);
    assert_eq!(round_significant(45.678, 3), 45.7);
    assert_eq!(round_significant(9.996, 3), 10.0);
    assert_eq!(round_significant(0.0012345, 3), 0.00123);
    assert_eq!(round_significant(123_456.0, 3), 123_000.0);
    assert_eq!(round_significant(0.0, 3), 0.0);
}

#[test]
fn fixed_ties_round_up() {
    assert_eq!(round_fixed(12.5, 0), 13.0);
    assert_eq!(round_fixed(0.03125, 4), 0.0313);
    assert_eq!(round_fixed(33.333_333_3, 4), 33.3333);
    assert_eq!(round_fixed(66.666_666_6, 4), 66.6667);
    assert_eq!(round_fixed(-0.03125, 4), -0.0313);
    assert_eq!(round_fixed(100.0, 4), 100.0);
}
