use libvqm::{delay_to_id, moslqo_to_r, r_to_moslqo, RatingBand};

// ============================================================================
// MOS LQO <-> R-factor
// ============================================================================

#[test]
fn test_r_to_mos_clamps_outside_scale() {
    for r in [-0.001, -1.0, -50.0, -1e9] {
        assert_eq!(r_to_moslqo(r), 1.0);
    }
    for r in [100.001, 120.0, 1e9] {
        assert_eq!(r_to_moslqo(r), 4.5);
    }
}

#[test]
fn test_r_to_mos_known_points() {
    assert_eq!(r_to_moslqo(0.0), 1.0);
    assert!((r_to_moslqo(50.0) - 2.575).abs() < 1e-12);
    assert!((r_to_moslqo(93.2) - 4.409285824).abs() < 1e-9);
    assert!((r_to_moslqo(100.0) - 4.5).abs() < 1e-12);
}

#[test]
fn test_mos_round_trip_is_close() {
    for mos in [1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.4] {
        let back = r_to_moslqo(moslqo_to_r(mos));
        assert!(
            (back - mos).abs() < 0.01,
            "mos {} came back as {}",
            mos,
            back
        );
    }
}

#[test]
fn test_mos_to_r_increases_with_mos() {
    let mut previous = moslqo_to_r(1.05);
    let mut mos = 1.1;
    while mos < 4.5 {
        let r = moslqo_to_r(mos);
        assert!(r > previous, "R not increasing at mos {}", mos);
        previous = r;
        mos += 0.05;
    }
}

#[test]
fn test_mos_to_r_scale_ends() {
    assert!((moslqo_to_r(4.5) - 100.0).abs() < 0.01);
    assert!((moslqo_to_r(1.0) - 6.518).abs() < 0.001);
}

#[test]
fn test_mos_to_r_outside_domain_is_finite() {
    // discriminant goes negative and is clamped, not rejected
    for mos in [0.0, 0.5, 5.0, 10.0] {
        assert!(moslqo_to_r(mos).is_finite());
    }
}

// ============================================================================
// Delay impairment
// ============================================================================

#[test]
fn test_no_impairment_below_100ms() {
    for ta in [0.0, 1.0, 50.0, 99.0, 99.999] {
        assert_eq!(delay_to_id(ta), 0.0);
    }
}

#[test]
fn test_delay_impairment_non_decreasing() {
    let mut previous = delay_to_id(100.0);
    for ta in (100..=2000).step_by(5) {
        let id = delay_to_id(ta as f64);
        assert!(id >= previous - 1e-12, "Id dropped at {} ms", ta);
        previous = id;
    }
}

#[test]
fn test_delay_impairment_known_points() {
    assert!((delay_to_id(200.0) - 3.044414).abs() < 1e-5);
    assert!((delay_to_id(400.0) - 24.070089).abs() < 1e-5);
    assert!((delay_to_id(800.0) - 40.832483).abs() < 1e-5);
}

// ============================================================================
// Rating bands
// ============================================================================

#[test]
fn test_band_limits() {
    assert_eq!(RatingBand::from_r(93.2), RatingBand::VerySatisfied);
    assert_eq!(RatingBand::from_r(90.0), RatingBand::VerySatisfied);
    assert_eq!(RatingBand::from_r(89.99), RatingBand::Satisfied);
    assert_eq!(RatingBand::from_r(70.0), RatingBand::SomeUsersDissatisfied);
    assert_eq!(RatingBand::from_r(65.0), RatingBand::ManyUsersDissatisfied);
    assert_eq!(RatingBand::from_r(50.0), RatingBand::NearlyAllUsersDissatisfied);
    assert_eq!(RatingBand::from_r(10.0), RatingBand::NotRecommended);
}

#[test]
fn test_band_from_mos_goes_through_r() {
    assert_eq!(RatingBand::from_mos(4.4), RatingBand::VerySatisfied);
    assert_eq!(RatingBand::from_mos(4.0), RatingBand::SomeUsersDissatisfied);
    assert_eq!(RatingBand::from_mos(3.0), RatingBand::NearlyAllUsersDissatisfied);
    assert_eq!(RatingBand::from_mos(2.0), RatingBand::NotRecommended);
    assert!(RatingBand::Satisfied > RatingBand::ManyUsersDissatisfied);
}
