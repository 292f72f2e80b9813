use ics_store::StoreError;
use ics_types::IntentError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error(transparent)]
    Intent(#[from] IntentError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("no intent recorded for delegator {0}")]
    NoIntent(String),

    #[error("intent would hold {count} validators, limit is {max}")]
    TooManyEntries { count: usize, max: usize },

    #[error("invalid address: {0:?}")]
    InvalidAddress(String),
}
