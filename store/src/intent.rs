use ics_types::{DelegationIntent, DelegatorAddress};

use crate::StoreError;

/// Persistence for delegation intents, keyed by delegator.
///
/// Callers perform load → engine call → store cycles. Serializing those
/// cycles per delegator is the backend's (or its caller's) job; the trait
/// itself makes no atomicity promise across two calls.
pub trait IntentStore {
    /// `Ok(None)` for a delegator that never submitted an intent.
    fn get_intent(&self, delegator: &DelegatorAddress) -> Result<Option<DelegationIntent>, StoreError>;
    fn put_intent(&self, intent: &DelegationIntent) -> Result<(), StoreError>;
    fn delete_intent(&self, delegator: &DelegatorAddress) -> Result<(), StoreError>;
    fn intent_count(&self) -> Result<u64, StoreError>;
    /// All stored intents, ordered by delegator address.
    fn iter_intents(&self) -> Result<Vec<DelegationIntent>, StoreError>;
}
