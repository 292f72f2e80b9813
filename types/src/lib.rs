//! Fundamental types for delegation intents.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! the fixed-point decimal used for weights and amounts, delegator/validator
//! identifiers, and the per-delegator weight vector itself.

pub mod address;
pub mod dec;
pub mod error;
pub mod intent;

pub use address::{DelegatorAddress, ValidatorAddress};
pub use dec::Dec;
pub use error::IntentError;
pub use intent::{DelegationIntent, ValidatorWeight};
