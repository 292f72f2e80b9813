//! Delegation intents: a delegator's weight vector across remote validators.
//!
//! The same vector shape carries two meanings depending on where it is in the
//! pipeline. A *normalized* intent holds fractions summing to one; an
//! *ordinalized* intent holds absolute amounts in the unit of some total.

use crate::address::{DelegatorAddress, ValidatorAddress};
use crate::dec::Dec;
use crate::error::IntentError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One allocation entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorWeight {
    pub validator: ValidatorAddress,
    pub weight: Dec,
}

impl ValidatorWeight {
    pub fn new(validator: impl Into<ValidatorAddress>, weight: Dec) -> Self {
        Self {
            validator: validator.into(),
            weight,
        }
    }
}

/// A delegator's full allocation.
///
/// Validator addresses are unique within `entries`. Order is insertion order;
/// it implies no ranking but is kept so serialization is deterministic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationIntent {
    delegator: DelegatorAddress,
    entries: Vec<ValidatorWeight>,
}

impl DelegationIntent {
    /// An empty intent, as held by a first-time delegator.
    pub fn new(delegator: DelegatorAddress) -> Self {
        Self {
            delegator,
            entries: Vec::new(),
        }
    }

    /// Build an intent from entries, rejecting repeated validators.
    pub fn with_entries(
        delegator: DelegatorAddress,
        entries: Vec<ValidatorWeight>,
    ) -> Result<Self, IntentError> {
        ensure_unique(&entries)?;
        Ok(Self { delegator, entries })
    }

    pub fn delegator(&self) -> &DelegatorAddress {
        &self.delegator
    }

    pub fn entries(&self) -> &[ValidatorWeight] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_parts(self) -> (DelegatorAddress, Vec<ValidatorWeight>) {
        (self.delegator, self.entries)
    }

    /// Mutable access to weights only; validator keys stay fixed.
    pub fn weights_mut(&mut self) -> impl Iterator<Item = &mut Dec> {
        self.entries.iter_mut().map(|e| &mut e.weight)
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> Result<Dec, IntentError> {
        Dec::checked_sum(self.entries.iter().map(|e| e.weight)).ok_or(IntentError::Overflow)
    }

    /// The entry for `validator`.
    ///
    /// Most callers know the validator is present and may treat
    /// [`IntentError::ValidatorNotFound`] as fatal; that decision is theirs.
    pub fn lookup(&self, validator: &ValidatorAddress) -> Result<&ValidatorWeight, IntentError> {
        self.entries
            .iter()
            .find(|e| &e.validator == validator)
            .ok_or_else(|| IntentError::ValidatorNotFound(validator.to_string()))
    }

    pub fn contains(&self, validator: &ValidatorAddress) -> bool {
        self.entries.iter().any(|e| &e.validator == validator)
    }

    /// Re-check the no-duplicates invariant, e.g. after decoding from storage.
    pub fn validate(&self) -> Result<(), IntentError> {
        ensure_unique(&self.entries)
    }
}

/// Fail with the first validator address that repeats.
pub fn ensure_unique(entries: &[ValidatorWeight]) -> Result<(), IntentError> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(&entry.validator) {
            return Err(IntentError::DuplicateValidator(entry.validator.to_string()));
        }
    }
    Ok(())
}
