use proptest::prelude::*;

use fundflow_types::{normalize, normalize_native, Address, SortOrder, TypesError};

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-12 * a.abs().max(b.abs()).max(f64::MIN_POSITIVE)
}

proptest! {
    /// normalize(s, e) agrees with plain float division wherever the integer
    /// is exactly representable.
    #[test]
    fn normalize_matches_float_division(raw in 0u64..(1u64 << 53), e in 0u32..30) {
        let expected = raw as f64 / 10f64.powi(e as i32);
        let got = normalize(&raw.to_string(), e).unwrap();
        prop_assert!(approx_eq(got, expected), "raw={} e={} got={} expected={}", raw, e, got, expected);
    }

    /// Values wider than u64 still normalize within rounding tolerance.
    #[test]
    fn normalize_wide_integers(raw in any::<u128>(), e in 0u32..40) {
        let expected = raw as f64 / 10f64.powi(e as i32);
        let got = normalize(&raw.to_string(), e).unwrap();
        prop_assert!(approx_eq(got, expected), "raw={} e={} got={} expected={}", raw, e, got, expected);
    }

    /// Zero is zero regardless of exponent, including with leading zeros.
    #[test]
    fn normalize_zero(e in 0u32..80, zeros in 1usize..10) {
        prop_assert_eq!(normalize(&"0".repeat(zeros), e).unwrap(), 0.0);
    }

    /// Negation commutes with normalization.
    #[test]
    fn normalize_sign_symmetry(raw in 1u64..u64::MAX) {
        let pos = normalize_native(&raw.to_string()).unwrap();
        let neg = normalize_native(&format!("-{raw}")).unwrap();
        prop_assert_eq!(pos, -neg);
    }

    /// Anything with a non-digit body is rejected as malformed.
    #[test]
    fn normalize_rejects_non_integers(s in "[0-9]{0,5}[a-zA-Z._ ][0-9a-z]{0,5}") {
        prop_assert_eq!(normalize(&s, 18), Err(TypesError::MalformedAmount(s.clone())));
    }

    /// Address equality ignores case for every well-formed address.
    #[test]
    fn address_case_insensitive(hex in "[0-9a-f]{40}") {
        let lower = Address::parse(&format!("0x{hex}")).unwrap();
        let upper = Address::parse(&format!("0x{}", hex.to_uppercase())).unwrap();
        prop_assert_eq!(&lower, &upper);
        prop_assert!(lower.matches(upper.as_str()));
    }

    /// Only "asc" (any case) selects ascending order.
    #[test]
    fn sort_order_degrades_to_desc(s in "[a-z]{0,6}") {
        let expected = if s == "asc" { SortOrder::Asc } else { SortOrder::Desc };
        prop_assert_eq!(SortOrder::parse_lenient(&s), expected);
    }
}
