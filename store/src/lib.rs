//! Abstract storage traits for delegation intents.
//!
//! Every storage backend (on-chain KV store, database, in-memory for testing)
//! implements these traits. The rest of the codebase depends only on the traits.

pub mod error;
pub mod intent;

pub use error::StoreError;
pub use intent::IntentStore;
