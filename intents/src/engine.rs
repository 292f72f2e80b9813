//! The weighting engine: normalize, ordinalize and merge delegation intents.
//!
//! All operations are pure. Each takes the intent by value and hands back a
//! new one; on error nothing partial escapes. Arithmetic is the truncating
//! fixed-point arithmetic of [`Dec`], so a normalized vector sums to one
//! minus at most one raw unit per entry.

use ics_types::intent::ensure_unique;
use ics_types::{Dec, DelegationIntent, IntentError, ValidatorAddress, ValidatorWeight};
use std::collections::HashMap;

/// Rescale weights so they sum to one.
///
/// An empty intent is already normalized and comes back unchanged. A
/// non-empty intent whose weights are all zero has no proportions to keep
/// and fails with [`IntentError::DegenerateWeights`].
pub fn normalize(mut intent: DelegationIntent) -> Result<DelegationIntent, IntentError> {
    if intent.is_empty() {
        return Ok(intent);
    }
    let sum = intent.total_weight()?;
    if sum.is_zero() {
        return Err(IntentError::DegenerateWeights);
    }
    if sum == Dec::ONE {
        return Ok(intent);
    }
    for weight in intent.weights_mut() {
        *weight = weight.try_div(sum)?;
    }
    Ok(intent)
}

/// Turn fractional weights into absolute amounts of `total`.
///
/// The input is assumed normalized; nothing checks it. An unnormalized
/// vector yields amounts proportional to its weights rather than summing to
/// `total`.
pub fn ordinalize(
    mut intent: DelegationIntent,
    total: Dec,
) -> Result<DelegationIntent, IntentError> {
    for weight in intent.weights_mut() {
        *weight = weight.checked_mul(total).ok_or(IntentError::Overflow)?;
    }
    Ok(intent)
}

/// Blend absolute-amount `updates` into a normalized `base` ("add ordinal").
///
/// `base` is first scaled to amounts of `total`. Each update amount is then
/// added to its validator's amount, or appended as a new entry when the
/// validator is not yet in `base`. The combined vector is renormalized, so
/// untouched validators keep their relative shape while the new amounts add
/// mass on top.
///
/// Fails with [`IntentError::DuplicateValidator`] if `updates` names a
/// validator twice, and with [`IntentError::DegenerateWeights`] if the
/// combined amount is zero (which includes an empty base with no updates).
pub fn merge(
    base: DelegationIntent,
    total: Dec,
    updates: &[ValidatorWeight],
) -> Result<DelegationIntent, IntentError> {
    ensure_unique(updates)?;

    let (delegator, mut entries) = ordinalize(base, total)?.into_parts();
    let index: HashMap<ValidatorAddress, usize> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| (e.validator.clone(), i))
        .collect();

    let mut added = 0usize;
    for update in updates {
        match index.get(&update.validator) {
            Some(&i) => {
                let amount = &mut entries[i].weight;
                *amount = amount
                    .checked_add(update.weight)
                    .ok_or(IntentError::Overflow)?;
            }
            None => {
                entries.push(update.clone());
                added += 1;
            }
        }
    }

    tracing::trace!(
        delegator = %delegator,
        existing = index.len(),
        updated = updates.len() - added,
        added,
        "merging intent updates"
    );

    let combined = DelegationIntent::with_entries(delegator, entries)?;
    if combined.is_empty() {
        return Err(IntentError::DegenerateWeights);
    }
    normalize(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ics_types::DelegatorAddress;

    fn delegator() -> DelegatorAddress {
        DelegatorAddress::new("quick1delegator")
    }

    fn val(n: u8) -> ValidatorAddress {
        ValidatorAddress::new(format!("cosmosvaloper1val{n}"))
    }

    fn intent(weights: &[(u8, Dec)]) -> DelegationIntent {
        DelegationIntent::with_entries(
            delegator(),
            weights
                .iter()
                .map(|(n, w)| ValidatorWeight::new(val(*n), *w))
                .collect(),
        )
        .unwrap()
    }

    fn ratio(n: u128, d: u128) -> Dec {
        Dec::from_ratio(n, d).unwrap()
    }

    fn weight(intent: &DelegationIntent, n: u8) -> Dec {
        intent.lookup(&val(n)).unwrap().weight
    }

    fn thirds() -> DelegationIntent {
        let third = ratio(1, 3);
        intent(&[(1, third), (2, third), (3, third)])
    }

    #[test]
    fn normalize_empty_is_noop() {
        let normalized = normalize(DelegationIntent::new(delegator())).unwrap();
        assert!(normalized.is_empty());
        assert_eq!(normalized.delegator(), &delegator());
    }

    #[test]
    fn normalize_single_entry_is_one() {
        let normalized = normalize(intent(&[(1, Dec::from_int(1000))])).unwrap();
        assert_eq!(normalized.len(), 1);
        assert_eq!(weight(&normalized, 1), Dec::ONE);
    }

    #[test]
    fn normalize_equal_entries_are_thirds() {
        let k = Dec::from_int(1000);
        let normalized = normalize(intent(&[(1, k), (2, k), (3, k)])).unwrap();
        assert_eq!(normalized.len(), 3);
        for n in 1..=3 {
            assert_eq!(weight(&normalized, n), Dec::ONE.checked_div(Dec::from_int(3)).unwrap());
        }
    }

    #[test]
    fn normalize_unequal_entries() {
        let normalized =
            normalize(intent(&[(1, ratio(5, 50)), (2, ratio(10, 50)), (3, ratio(35, 50))]))
                .unwrap();
        assert_eq!(weight(&normalized, 1), Dec::percent(10));
        assert_eq!(weight(&normalized, 2), Dec::percent(20));
        assert_eq!(weight(&normalized, 3), Dec::percent(70));
    }

    #[test]
    fn normalize_keeps_entry_order() {
        let normalized = normalize(intent(&[
            (3, Dec::from_int(1)),
            (1, Dec::from_int(1)),
            (2, Dec::from_int(2)),
        ]))
        .unwrap();
        let ids: Vec<_> = normalized.entries().iter().map(|e| e.validator.clone()).collect();
        assert_eq!(ids, [val(3), val(1), val(2)]);
        assert_eq!(weight(&normalized, 2), Dec::percent(50));
    }

    #[test]
    fn normalize_all_zero_is_degenerate() {
        let err = normalize(intent(&[(1, Dec::ZERO), (2, Dec::ZERO)])).unwrap_err();
        assert_eq!(err, IntentError::DegenerateWeights);
    }

    #[test]
    fn normalize_zero_entry_stays_zero() {
        let normalized = normalize(intent(&[(1, Dec::ZERO), (2, Dec::from_int(4))])).unwrap();
        assert_eq!(weight(&normalized, 1), Dec::ZERO);
        assert_eq!(weight(&normalized, 2), Dec::ONE);
    }

    #[test]
    fn ordinalize_empty_is_noop() {
        let empty = DelegationIntent::new(delegator());
        let ordinalized = ordinalize(empty, Dec::from_int(10_000)).unwrap();
        assert!(ordinalized.is_empty());
    }

    #[test]
    fn ordinalize_equal_thirds() {
        let ordinalized = ordinalize(thirds(), Dec::from_int(3000)).unwrap();
        assert_eq!(ordinalized.len(), 3);
        for n in 1..=3 {
            assert_eq!(weight(&ordinalized, n).round_int(), 1000);
        }
    }

    #[test]
    fn ordinalize_unequal_weights() {
        let base = intent(&[(1, ratio(5, 50)), (2, ratio(10, 50)), (3, ratio(35, 50))]);
        let ordinalized = ordinalize(base, Dec::from_int(3000)).unwrap();
        assert_eq!(weight(&ordinalized, 1).round_int(), 300);
        assert_eq!(weight(&ordinalized, 2).round_int(), 600);
        assert_eq!(weight(&ordinalized, 3).round_int(), 2100);
    }

    #[test]
    fn ordinalize_unnormalized_input_is_proportional() {
        let ordinalized = ordinalize(
            intent(&[(1, Dec::from_int(2)), (2, Dec::from_int(3))]),
            Dec::from_int(10),
        )
        .unwrap();
        assert_eq!(weight(&ordinalized, 1), Dec::from_int(20));
        assert_eq!(weight(&ordinalized, 2), Dec::from_int(30));
    }

    #[test]
    fn ordinalize_overflow_is_error() {
        let err = ordinalize(intent(&[(1, Dec::from_int(u64::MAX))]), Dec::from_int(u64::MAX))
            .unwrap_err();
        assert_eq!(err, IntentError::Overflow);
    }

    #[test]
    fn merge_overlapping_updates() {
        let updates = [
            ValidatorWeight::new(val(1), Dec::from_int(1000)),
            ValidatorWeight::new(val(2), Dec::from_int(2000)),
        ];
        let merged = merge(thirds(), Dec::from_int(6000), &updates).unwrap();

        assert_eq!(merged.len(), 3);
        assert_eq!(weight(&merged, 1), ratio(3, 9));
        assert_eq!(weight(&merged, 2), ratio(4, 9));
        assert_eq!(weight(&merged, 3), ratio(2, 9));
    }

    #[test]
    fn merge_with_new_validator() {
        let updates = [
            ValidatorWeight::new(val(4), Dec::from_int(1000)),
            ValidatorWeight::new(val(3), Dec::from_int(2000)),
        ];
        let merged = merge(thirds(), Dec::from_int(6000), &updates).unwrap();

        assert_eq!(merged.len(), 4);
        assert_eq!(weight(&merged, 1), ratio(2, 9));
        assert_eq!(weight(&merged, 2), ratio(2, 9));
        assert_eq!(weight(&merged, 3), ratio(4, 9));
        assert_eq!(weight(&merged, 4), ratio(1, 9));
        // New validators are appended after the existing ones.
        assert_eq!(merged.entries()[3].validator, val(4));
    }

    #[test]
    fn merge_into_empty_base_normalizes_updates() {
        let updates = [
            ValidatorWeight::new(val(1), Dec::from_int(300)),
            ValidatorWeight::new(val(2), Dec::from_int(100)),
        ];
        let empty = DelegationIntent::new(delegator());
        let merged = merge(empty, Dec::from_int(5000), &updates).unwrap();
        assert_eq!(weight(&merged, 1), Dec::percent(75));
        assert_eq!(weight(&merged, 2), Dec::percent(25));
        assert_eq!(merged.delegator(), &delegator());
    }

    #[test]
    fn merge_with_no_updates_keeps_shape() {
        let base = intent(&[(1, Dec::percent(40)), (2, Dec::percent(60))]);
        let merged = merge(base.clone(), Dec::from_int(1000), &[]).unwrap();
        assert_eq!(merged, base);
    }

    #[test]
    fn merge_zero_total_weighs_only_updates() {
        let updates = [ValidatorWeight::new(val(2), Dec::from_int(50))];
        let merged = merge(thirds(), Dec::ZERO, &updates).unwrap();
        assert_eq!(merged.len(), 3);
        assert_eq!(weight(&merged, 1), Dec::ZERO);
        assert_eq!(weight(&merged, 2), Dec::ONE);
    }

    #[test]
    fn merge_empty_everything_is_degenerate() {
        let err = merge(DelegationIntent::new(delegator()), Dec::from_int(6000), &[]).unwrap_err();
        assert_eq!(err, IntentError::DegenerateWeights);
    }

    #[test]
    fn merge_all_zero_is_degenerate() {
        let updates = [ValidatorWeight::new(val(1), Dec::ZERO)];
        let empty = DelegationIntent::new(delegator());
        let err = merge(empty, Dec::from_int(6000), &updates).unwrap_err();
        assert_eq!(err, IntentError::DegenerateWeights);
    }

    #[test]
    fn merge_rejects_duplicate_updates() {
        let updates = [
            ValidatorWeight::new(val(1), Dec::from_int(1)),
            ValidatorWeight::new(val(1), Dec::from_int(2)),
        ];
        let err = merge(thirds(), Dec::from_int(6000), &updates).unwrap_err();
        assert_eq!(err, IntentError::DuplicateValidator(val(1).to_string()));
    }

    #[test]
    fn merge_is_not_commutative() {
        let a = intent(&[(1, Dec::ONE)]);
        let b = intent(&[(2, Dec::ONE)]);
        let total = Dec::from_int(100);

        let ab = merge(a.clone(), total, b.entries()).unwrap();
        let ba = merge(b, total, a.entries()).unwrap();
        assert_eq!(weight(&ab, 1), ratio(100, 101));
        assert_eq!(weight(&ba, 2), ratio(100, 101));
        assert_ne!(weight(&ab, 1), weight(&ba, 1));
    }
}
