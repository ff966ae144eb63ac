use proptest::prelude::*;
use rstest::rstest;
use tempo_core::{SpeedBounds, clamp, is_valid, round_speed, speeds_equal, validation_error};

const DEFAULTS: SpeedBounds = SpeedBounds {
    min: 0.01,
    max: 10.0,
};

#[rstest]
#[case(0.01, true)]
#[case(10.0, true)]
#[case(1.0, true)]
#[case(0.0, false)]
#[case(0.009, false)]
#[case(10.01, false)]
#[case(-1.0, false)]
#[case(f32::NAN, false)]
#[case(f32::INFINITY, false)]
fn bounds_are_inclusive(#[case] v: f32, #[case] ok: bool) {
    assert_eq!(is_valid(v, DEFAULTS), ok, "is_valid({v})");
}

#[rstest]
#[case(1.0, 1.0009, true)]
#[case(1.0, 1.002, false)]
#[case(0.5, 0.5, true)]
#[case(10.0, 9.99, false)]
fn tolerance_is_absolute(#[case] a: f32, #[case] b: f32, #[case] eq: bool) {
    assert_eq!(speeds_equal(a, b), eq);
    assert_eq!(speeds_equal(b, a), eq);
}

#[test]
fn zero_is_rejected_with_min_message() {
    assert_eq!(
        validation_error(0.0, DEFAULTS),
        "Speed multiplier must be at least 0.01!"
    );
}

#[test]
fn custom_bounds_render_in_messages() {
    let b = SpeedBounds::new(0.25, 4.0);
    assert_eq!(
        b.validation_error(5.0),
        "Speed multiplier must not exceed 4.0!"
    );
    assert_eq!(
        b.validation_error(0.1),
        "Speed multiplier must be at least 0.25!"
    );
}

fn bounds_strategy() -> impl Strategy<Value = SpeedBounds> {
    (0.01f32..50.0, 0.01f32..50.0).prop_map(|(min, span)| SpeedBounds::new(min, min + span))
}

proptest! {
    #[test]
    fn inside_default_bounds_is_valid(v in 0.01f32..=10.0f32) {
        prop_assert!(is_valid(v, DEFAULTS));
    }

    #[test]
    fn below_or_above_is_invalid(low in -100.0f32..0.01f32, high in 10.001f32..1000.0f32) {
        prop_assert!(!is_valid(low, DEFAULTS));
        prop_assert!(!is_valid(high, DEFAULTS));
    }

    #[test]
    fn clamp_is_idempotent_and_valid(x in -1000.0f32..1000.0, b in bounds_strategy()) {
        let once = clamp(x, b);
        prop_assert_eq!(clamp(once, b), once);
        prop_assert!(is_valid(once, b));
    }

    #[test]
    fn rounding_stays_close_with_two_decimals(x in 0.0f32..20.0) {
        let r = round_speed(x);
        // half a hundredth, plus f32 representation slack
        prop_assert!((r - x).abs() <= 0.005 + 1e-4, "x={} r={}", x, r);
        let scaled = r * 100.0;
        prop_assert!((scaled - scaled.round()).abs() < 1e-3, "r={} has more than 2 decimals", r);
        prop_assert_eq!(round_speed(r), r);
    }

    #[test]
    fn equality_is_reflexive(a in -1000.0f32..1000.0) {
        prop_assert!(speeds_equal(a, a));
    }
}
