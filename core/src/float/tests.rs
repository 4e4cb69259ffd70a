use proptest::prelude::*;
use seahash::SeaHasher;
use std::hash::{Hash, Hasher};

use super::*;

fn hash_of(x: &impl Hash) -> u64 {
    let mut h = SeaHasher::new();
    x.hash(&mut h);
    h.finish()
}

fn float(s: &str, prec: u32) -> Float {
    Float::from_str_radix(s, 10, prec).unwrap()
}

#[test]
fn test_float_defaults_to_zero() {
    let x = Float::with_prec(128);
    assert!(x.is_zero());
    assert_eq!(128, x.precision());
    assert_eq!("0", x.to_string());
}

#[test]
fn test_float_precision_rounds_up_to_limbs() {
    assert!(Float::with_prec(53).precision() >= 53);
    assert!(Float::with_prec(1).precision() >= 1);
}

#[test]
#[should_panic(expected = "precision 0 is outside the supported range")]
fn test_float_zero_precision_panics() {
    let _ = Float::with_prec(0);
}

#[test]
fn test_float_set_precision_truncates() {
    let third = Float::from_i64(1, 256) / Float::from_i64(3, 256);
    let mut x = third.clone();
    x.set_precision(64);
    assert_eq!(64, x.precision());
    assert!(!x.is_zero());
    assert_ne!(third, x);
    assert!(third.is_equal(&x, 50));
    // The shared copy keeps its precision and value.
    assert_eq!(256, third.precision());
    assert!(!third.shares_storage_with(&x));
}

#[test]
fn test_float_result_precision_is_max_of_operands() {
    let a = Float::from_i64(3, 64);
    let b = Float::from_i64(7, 192);
    assert_eq!(192, (&a + &b).precision());
    assert_eq!(192, (&b * &a).precision());
    assert_eq!(64, a.sqrt().unwrap().precision());
}

#[test]
fn test_float_arithmetic() {
    let a = float("1.5", 64);
    let b = float("0.25", 64);
    assert_eq!(float("1.75", 64), &a + &b);
    assert_eq!(float("1.25", 64), &a - &b);
    assert_eq!(float("0.375", 64), &a * &b);
    assert_eq!(float("6", 64), &a / &b);
    assert_eq!(float("-1.5", 64), -&a);
    assert_eq!(float("3.375", 64), a.pow(3));
    assert_eq!(float("6", 64), a.scale_pow2(2));
    assert_eq!(float("0.375", 64), a.scale_pow2(-2));
    assert_eq!(float("1.5", 64), float("-1.5", 64).abs());
    assert_eq!(float("1.5", 64), float("2.25", 64).sqrt().unwrap());
    assert!(a > 1);
    assert!(b < 1);

    assert_eq!(Err(NumError::DivisionByZero), a.checked_div(&Float::with_prec(64)));
    assert_eq!(Err(NumError::NegativeSquareRoot), float("-4", 64).sqrt());
}

#[test]
#[should_panic(expected = "division by zero")]
fn test_float_div_operator_panics() {
    let _ = Float::from_i64(1, 64) / Float::with_prec(64);
}

#[test]
fn test_float_rounding_to_integers() {
    let x = float("-2.5", 64);
    assert_eq!(float("-3", 64), x.floor());
    assert_eq!(float("-2", 64), x.ceil());
    assert_eq!(float("-2", 64), x.trunc());
    assert_eq!(Integer::from(-2), x.to_integer());
    assert!(!x.is_integer());
    assert!(x.floor().is_integer());
}

#[test]
fn test_float_is_equal_within_bits() {
    let one = Float::from_i64(1, 128);
    let nearly = &one + Float::from_i64(1, 128).scale_pow2(-40);
    assert!(one.is_equal(&nearly, 30));
    assert!(!one.is_equal(&nearly, 50));
    assert!(Float::with_prec(64).is_equal(&Float::with_prec(128), 10));
    assert!(!Float::with_prec(64).is_equal(&one, 10));
}

#[test]
fn test_float_equal_values_across_precisions() {
    let a = float("3.14159", 64);
    let mut b = a.clone();
    b.set_precision(128);
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));

    let c = Float::from_f64(0.75, 64).unwrap();
    let d = Float::from_f64(0.75, 512).unwrap();
    assert_eq!(c, d);
    assert_eq!(hash_of(&c), hash_of(&d));
    assert_eq!(Rational::new(3, 4).unwrap(), d.to_rational());
}

#[test]
fn test_float_fits() {
    assert!(Float::from_i64(127, 64).fits_i8());
    assert!(!Float::from_i64(128, 64).fits_i8());
    assert!(Float::from_i64(255, 64).fits_u8());
    assert!(!Float::from_i64(-1, 64).fits_u64());
    assert!(Float::from_i64(i64::MIN, 64).fits_i64());
    assert!(!float("2.5", 64).fits_i32());
    assert!(!(Float::from_u64(u64::MAX, 64) + 1i32).fits_u64());
}

#[test]
fn test_float_parse_and_format() {
    assert_eq!(float("1250", 64), float("1.25e3", 64));
    assert_eq!("1250", float("1.25e3", 64).to_string());
    assert_eq!("-0.125", float("-1.25e-1", 64).to_string_radix(10, 3));
    assert_eq!("1.5e30", float("1.5e30", 128).to_string_radix(10, 2));
    assert_eq!("ff.8", Float::from_f64(255.5, 64).unwrap().to_string_radix(16, 0));
    assert_eq!("FF.8", Float::from_f64(255.5, 64).unwrap().to_string_radix(-16, 0));
    assert_eq!(
        Float::from_f64(255.5, 64).unwrap(),
        Float::from_str_radix("FF.8", -16, 64).unwrap(),
    );
    assert_eq!(Float::from_i64(256, 64), Float::from_str_radix("1@2", 16, 64).unwrap());

    for bad in &["", "1.2.3", "abc", "--1"] {
        assert!(Float::from_str_radix(bad, 10, 64).is_err(), "{:?} should not parse", bad);
    }

    let mut x = Float::from_i64(7, 128);
    assert!(x.assign_str("1.x", 10).is_err());
    assert_eq!(Float::from_i64(7, 128), x);
    x.assign_str("0.5", 10).unwrap();
    assert_eq!(float("0.5", 64), x);
    assert_eq!(128, x.precision());
}

#[test]
fn test_float_non_finite_rejected() {
    assert_eq!(Err(NumError::NonFiniteValue), Float::from_f64(f64::NAN, 64));
    assert_eq!(Err(NumError::NonFiniteValue), Float::from_f64(f64::NEG_INFINITY, 64));
}

#[test]
fn test_float_round_trip_covers_every_limb() {
    // Both values fill one limb more than `precision()` reports.
    let third = Float::from_i64(1, 64) / Float::from_i64(3, 64);
    let power = Float::from_integer(&Integer::from(3).pow(200), 64);
    for x in &[third, power] {
        for &radix in &[10, 62] {
            let s = x.to_string_radix(radix, 0);
            assert_eq!(*x, Float::from_str_radix(&s, radix, 64).unwrap(), "{}", s);
        }
    }
}

#[test]
fn test_float_parse_is_exact_before_truncating() {
    // 0.1 has no finite binary expansion, so both must truncate the same way.
    let tenth = Float::from_i64(1, 128) / Float::from_i64(10, 128);
    assert_eq!(tenth, float("0.1", 128));
    assert_eq!(tenth, float("1e-1", 128));
    assert_eq!(-tenth, float("-10e-2", 128));
    assert_eq!(float(".5", 64), float("5.", 64) / Float::from(10));
    for bad in &["1e", "1e+", ".", "1.5e2.5", "1 e5"] {
        assert!(Float::from_str_radix(bad, 10, 64).is_err(), "{:?}", bad);
    }
}

fn round_trip_radix() -> impl Strategy<Value = i32> {
    prop::sample::select(vec![2, 3, 8, 10, 16, 62, -36])
}

proptest! {
    #[test]
    fn test_float_quotient_round_trip(
        a: i64,
        b in 1..i64::MAX,
        prec in prop::sample::select(vec![64, 100, 128, 300]),
        radix in round_trip_radix()
    ) {
        let x = Float::from_i64(a, prec) / Float::from_i64(b, prec);
        let s = x.to_string_radix(radix, 0);
        assert_eq!(x, Float::from_str_radix(&s, radix, prec).unwrap(), "{}", s);
    }

    #[test]
    fn test_float_multi_limb_integer_round_trip(
        base in 2_u32..1000,
        exp in 0_u32..400,
        negative: bool,
        radix in round_trip_radix()
    ) {
        let mut n = Integer::from(base).pow(exp);
        if negative {
            n.negate();
        }
        let x = Float::from_integer(&n, 64);
        let s = x.to_string_radix(radix, 0);
        assert_eq!(x, Float::from_str_radix(&s, radix, 64).unwrap(), "{}", s);
    }

    #[test]
    fn test_float_round_trip(v: f64, radix in prop::sample::select(vec![2, 8, 16, 32])) {
        prop_assume!(v.is_finite());
        let x = Float::from_f64(v, 64).unwrap();
        let s = x.to_string_radix(radix, 0);
        assert_eq!(x, Float::from_str_radix(&s, radix, 64).unwrap(), "{}", s);
    }

    #[test]
    fn test_float_f64_exact(v: f64) {
        prop_assume!(v.is_finite());
        let x = Float::from_f64(v, 64).unwrap();
        assert_eq!(v, x.to_f64());
        assert_eq!(Rational::try_from(v).unwrap(), x.to_rational());
    }

    #[test]
    fn test_float_hash_ignores_precision(v: f64, extra in 1_u32..8) {
        prop_assume!(v.is_finite());
        let a = Float::from_f64(v, 64).unwrap();
        let b = Float::from_f64(v, 64 * (1 + extra)).unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_float_cow_independence(a: i32, b: i32) {
        let original = Float::from_i64(i64::from(a), 64);
        let mut copy = original.clone();
        copy += Float::from_i64(i64::from(b), 64);
        assert_eq!(Float::from_i64(i64::from(a), 64), original);
        assert_eq!(Float::from_i64(i64::from(a) + i64::from(b), 64), copy);
    }
}
