//! Behavioural tests for the public `expand` entry point.

use es_core::{Tolerances, nearly_equal};
use es_params::{ParseError, expand};
use proptest::prelude::*;

fn tol() -> Tolerances {
    Tolerances {
        abs: 1e-9,
        rel: 1e-9,
    }
}

#[test]
fn single_value() {
    assert_eq!(expand("1.5").unwrap().as_slice(), &[1.5]);
}

#[test]
fn explicit_list_keeps_order_and_duplicates() {
    assert_eq!(expand("1.0,2.0,3.0").unwrap().as_slice(), &[1.0, 2.0, 3.0]);
    assert_eq!(expand("3, 1, 3").unwrap().as_slice(), &[3.0, 1.0, 3.0]);
}

#[test]
fn uniform_range() {
    assert_eq!(
        expand("5.0,20.0:5").unwrap().as_slice(),
        &[5.0, 8.75, 12.5, 16.25, 20.0]
    );
}

#[test]
fn descending_range() {
    assert_eq!(expand("1,0:3").unwrap().as_slice(), &[1.0, 0.5, 0.0]);
}

#[test]
fn surrounding_whitespace_is_trimmed() {
    assert_eq!(expand("  \t 2.0 \n").unwrap().as_slice(), &[2.0]);
    assert_eq!(expand(" 0 , 1 : 2 ").unwrap().as_slice(), &[0.0, 1.0]);
}

#[test]
fn bad_token_is_named_with_its_spec() {
    let err = expand("1.0, x2 ,3.0").unwrap_err();
    assert_eq!(
        err,
        ParseError::InvalidNumber {
            token: "x2".into(),
            spec: "1.0, x2 ,3.0".into(),
        }
    );
}

#[test]
fn empty_inputs_are_rejected() {
    assert_eq!(expand("   ").unwrap_err(), ParseError::Empty);
    assert!(matches!(
        expand("1.0,,2.0").unwrap_err(),
        ParseError::InvalidNumber { token, .. } if token.is_empty()
    ));
}

#[test]
fn far_apart_endpoints_stay_finite() {
    let points = expand("-1e308,1e308:3").unwrap();
    assert_eq!(points.as_slice(), &[-1e308, 0.0, 1e308]);

    let points = expand("-1.7e308,1.7e308:7,3.0").unwrap();
    assert_eq!(points[0], -1.7e308);
    assert_eq!(points[6], 1.7e308);
    assert!(points.iter().all(|v| v.is_finite()));
}

#[test]
fn oversized_point_count_is_a_parse_error() {
    for spec in ["0,1:18446744073709551615", "0,1:10000001"] {
        assert!(
            matches!(expand(spec).unwrap_err(), ParseError::InvalidLength { .. }),
            "{spec} should be rejected"
        );
    }
    assert_eq!(expand("0,1:10000000").unwrap().len(), es_params::MAX_POINTS);
}

proptest! {
    #[test]
    fn uniform_range_hits_endpoints_and_is_monotonic(
        a in -1e3_f64..1e3,
        b in -1e3_f64..1e3,
        n in 2_usize..200,
    ) {
        let points = expand(&format!("{a},{b}:{n}")).unwrap();
        prop_assert_eq!(points.len(), n);
        prop_assert!(nearly_equal(points[0], a, tol()));
        prop_assert!(nearly_equal(points[n - 1], b, tol()));

        let direction = (b - a).signum();
        for pair in points.windows(2) {
            let step = (pair[1] - pair[0]) * direction;
            prop_assert!(step >= 0.0 || nearly_equal(pair[0], pair[1], tol()));
        }
    }

    #[test]
    fn power_range_keeps_endpoints_but_not_spacing(
        a in -1e3_f64..1e3,
        width in 1.0_f64..1e3,
        n in 3_usize..100,
        exp in prop_oneof![0.2_f64..0.8, 1.5_f64..4.0],
    ) {
        let b = a + width;
        let points = expand(&format!("{a},{b}:{n},{exp}")).unwrap();
        prop_assert_eq!(points.len(), n);
        prop_assert!(nearly_equal(points[0], a, tol()));
        prop_assert!(nearly_equal(points[n - 1], b, tol()));

        let first_step = points[1] - points[0];
        let last_step = points[n - 1] - points[n - 2];
        let loose = Tolerances { abs: 1e-9, rel: 1e-6 };
        prop_assert!(!nearly_equal(first_step, last_step, loose));
        if exp > 1.0 {
            prop_assert!(first_step < last_step);
        } else {
            prop_assert!(first_step > last_step);
        }
    }
}
