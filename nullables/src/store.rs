//! Nullable store: thread-safe in-memory intent storage for testing.
//!
//! Intents are kept bincode-encoded, the way a real key-value backend would
//! hold them, so tests also cover the serialized representation.

use ics_store::{IntentStore, StoreError};
use ics_types::{DelegationIntent, DelegatorAddress};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// An in-memory intent store for testing.
pub struct NullIntentStore {
    intents: Mutex<BTreeMap<DelegatorAddress, Vec<u8>>>,
}

impl NullIntentStore {
    pub fn new() -> Self {
        Self {
            intents: Mutex::new(BTreeMap::new()),
        }
    }

    /// Raw encoded bytes for a delegator, for asserting on the stored form.
    pub fn raw_bytes(&self, delegator: &DelegatorAddress) -> Option<Vec<u8>> {
        self.lock().ok()?.get(delegator).cloned()
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<DelegatorAddress, Vec<u8>>>, StoreError> {
        self.intents
            .lock()
            .map_err(|_| StoreError::Backend("intent map lock poisoned".into()))
    }
}

impl Default for NullIntentStore {
    fn default() -> Self {
        Self::new()
    }
}

fn decode(bytes: &[u8]) -> Result<DelegationIntent, StoreError> {
    let intent: DelegationIntent =
        bincode::deserialize(bytes).map_err(|e| StoreError::Serialization(e.to_string()))?;
    intent
        .validate()
        .map_err(|e| StoreError::Corruption(e.to_string()))?;
    Ok(intent)
}

impl IntentStore for NullIntentStore {
    fn get_intent(
        &self,
        delegator: &DelegatorAddress,
    ) -> Result<Option<DelegationIntent>, StoreError> {
        self.lock()?.get(delegator).map(|b| decode(b)).transpose()
    }

    fn put_intent(&self, intent: &DelegationIntent) -> Result<(), StoreError> {
        let bytes =
            bincode::serialize(intent).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.lock()?.insert(intent.delegator().clone(), bytes);
        Ok(())
    }

    fn delete_intent(&self, delegator: &DelegatorAddress) -> Result<(), StoreError> {
        self.lock()?
            .remove(delegator)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(delegator.to_string()))
    }

    fn intent_count(&self) -> Result<u64, StoreError> {
        Ok(self.lock()?.len() as u64)
    }

    fn iter_intents(&self) -> Result<Vec<DelegationIntent>, StoreError> {
        self.lock()?.values().map(|b| decode(b)).collect()
    }
}
