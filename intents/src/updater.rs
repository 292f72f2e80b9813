//! Intent update handler: load a delegator's intent, run the engine, persist.
//!
//! This is the thin layer a transaction processor or rebalancing job calls.
//! It owns no locking: per-delegator read-modify-write ordering is left to
//! whoever drives it (a transaction pipeline processes one message at a time).

use crate::engine;
use crate::error::UpdateError;
use ics_store::IntentStore;
use ics_types::{
    Dec, DelegationIntent, DelegatorAddress, IntentError, ValidatorAddress, ValidatorWeight,
};
use ics_utils::IntentConfig;

/// A whole-token amount to delegate to one validator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Allocation {
    pub validator: ValidatorAddress,
    pub amount: u128,
}

/// Per-validator amounts derived from an intent and a total stake.
///
/// `remainder` is the part of the total lost to flooring each amount to a
/// whole token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Allocations {
    pub entries: Vec<Allocation>,
    pub remainder: Dec,
}

impl Allocations {
    pub fn total_allocated(&self) -> u128 {
        self.entries.iter().map(|a| a.amount).sum()
    }
}

pub struct IntentUpdater<S> {
    store: S,
    config: IntentConfig,
}

impl<S: IntentStore> IntentUpdater<S> {
    pub fn new(store: S, config: IntentConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &IntentConfig {
        &self.config
    }

    /// The stored intent for `delegator`.
    pub fn intent(&self, delegator: &DelegatorAddress) -> Result<DelegationIntent, UpdateError> {
        self.store
            .get_intent(delegator)?
            .ok_or_else(|| UpdateError::NoIntent(delegator.to_string()))
    }

    /// Merge absolute-amount `updates` into the delegator's stored intent.
    ///
    /// `total` is the delegator's current stake on the remote chain; the
    /// stored fractions are scaled by it before the updates are added. A
    /// delegator with no stored intent starts from an empty one.
    pub fn apply_updates(
        &self,
        delegator: &DelegatorAddress,
        total: Dec,
        updates: &[ValidatorWeight],
    ) -> Result<DelegationIntent, UpdateError> {
        check_addresses(delegator, updates)?;

        let base = self
            .store
            .get_intent(delegator)?
            .unwrap_or_else(|| DelegationIntent::new(delegator.clone()));
        let previous = base.len();

        let merged = engine::merge(base, total, updates)?;
        self.check_size(&merged)?;
        self.store.put_intent(&merged)?;

        tracing::info!(
            delegator = %delegator,
            previous,
            entries = merged.len(),
            updates = updates.len(),
            %total,
            "delegation intent merged"
        );
        Ok(merged)
    }

    /// Replace the delegator's intent with a freshly submitted vector.
    ///
    /// Weights may be in any unit; they are normalized before storing.
    pub fn replace_intent(
        &self,
        delegator: &DelegatorAddress,
        weights: Vec<ValidatorWeight>,
    ) -> Result<DelegationIntent, UpdateError> {
        check_addresses(delegator, &weights)?;

        let intent = DelegationIntent::with_entries(delegator.clone(), weights)?;
        self.check_size(&intent)?;
        let normalized = engine::normalize(intent)?;
        self.store.put_intent(&normalized)?;

        tracing::info!(
            delegator = %delegator,
            entries = normalized.len(),
            "delegation intent replaced"
        );
        Ok(normalized)
    }

    /// Whole-token amounts per validator for a total stake of `total`.
    pub fn allocations(
        &self,
        delegator: &DelegatorAddress,
        total: Dec,
    ) -> Result<Allocations, UpdateError> {
        let amounts = engine::ordinalize(self.intent(delegator)?, total)?;
        let entries: Vec<Allocation> = amounts
            .entries()
            .iter()
            .map(|e| Allocation {
                validator: e.validator.clone(),
                amount: e.weight.floor_int(),
            })
            .collect();

        let allocated = entries
            .iter()
            .try_fold(0u128, |acc, a| acc.checked_add(a.amount))
            .and_then(Dec::checked_from_int)
            .ok_or(IntentError::Overflow)?;
        let remainder = total.saturating_sub(allocated);

        tracing::debug!(
            delegator = %delegator,
            validators = entries.len(),
            %total,
            %remainder,
            "computed allocations"
        );
        Ok(Allocations { entries, remainder })
    }

    fn check_size(&self, intent: &DelegationIntent) -> Result<(), UpdateError> {
        let max = self.config.max_validators_per_intent;
        if intent.len() > max {
            tracing::warn!(
                delegator = %intent.delegator(),
                count = intent.len(),
                max,
                "intent rejected: too many validators"
            );
            return Err(UpdateError::TooManyEntries {
                count: intent.len(),
                max,
            });
        }
        Ok(())
    }
}

fn check_addresses(
    delegator: &DelegatorAddress,
    weights: &[ValidatorWeight],
) -> Result<(), UpdateError> {
    if !delegator.is_valid() {
        return Err(UpdateError::InvalidAddress(delegator.to_string()));
    }
    if let Some(bad) = weights.iter().find(|w| !w.validator.is_valid()) {
        return Err(UpdateError::InvalidAddress(bad.validator.to_string()));
    }
    Ok(())
}
