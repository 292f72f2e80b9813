use proptest::prelude::*;

use ics_types::Dec;

proptest! {
    /// Display output parses back to the same value.
    #[test]
    fn dec_display_parse_roundtrip(raw in 0u128..u128::MAX) {
        let d = Dec::from_raw(raw);
        let parsed: Dec = d.to_string().parse().unwrap();
        prop_assert_eq!(parsed, d);
    }

    /// Multiplying by one is the identity.
    #[test]
    fn dec_mul_one_identity(raw in 0u128..u128::MAX) {
        let d = Dec::from_raw(raw);
        prop_assert_eq!(d.checked_mul(Dec::ONE), Some(d));
        prop_assert_eq!(d.checked_div(Dec::ONE), Some(d));
    }

    /// Integer multiplication matches plain u128 arithmetic.
    #[test]
    fn dec_mul_matches_integers(a in 0u64..1_000_000_000, b in 0u64..1_000_000_000) {
        let product = Dec::from_int(a).checked_mul(Dec::from_int(b)).unwrap();
        prop_assert_eq!(product.floor_int(), a as u128 * b as u128);
        prop_assert_eq!(product.raw() % Dec::ONE.raw(), 0);
    }

    /// Truncating division never overshoots: (a / b) * b <= a.
    #[test]
    fn dec_div_truncates(a in 0u64..u64::MAX, b in 1u64..u64::MAX) {
        let (da, db) = (Dec::from_int(a), Dec::from_int(b));
        let q = da.checked_div(db).unwrap();
        let back = q.checked_mul(db).unwrap();
        prop_assert!(back <= da, "{} * {} = {} > {}", q, db, back, da);
    }

    /// A ratio of parts of a whole never exceeds one.
    #[test]
    fn dec_ratio_at_most_one(part in 0u128..1_000_000_000_000, extra in 0u128..1_000_000_000_000) {
        let whole = part + extra;
        prop_assume!(whole > 0);
        let r = Dec::from_ratio(part, whole).unwrap();
        prop_assert!(r <= Dec::ONE);
    }

    /// round_int is floor_int or floor_int + 1.
    #[test]
    fn dec_round_within_one_of_floor(raw in 0u128..u128::MAX / 2) {
        let d = Dec::from_raw(raw);
        let diff = d.round_int() - d.floor_int();
        prop_assert!(diff <= 1);
    }
}
