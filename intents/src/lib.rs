//! Delegation intent weighting.
//!
//! A delegator's intent is a vector of validator weights. This crate keeps
//! those vectors proportional and mergeable:
//! - **Normalize**: rescale weights to sum to one
//! - **Ordinalize**: turn fractions into amounts of a total stake
//! - **Merge**: add newly supplied absolute amounts on top of prior proportions
//!
//! The engine functions are pure. [`IntentUpdater`] wires them to an
//! [`ics_store::IntentStore`] for the load → compute → persist cycle.

pub mod engine;
pub mod error;
pub mod updater;

pub use engine::{merge, normalize, ordinalize};
pub use error::UpdateError;
pub use updater::{Allocation, Allocations, IntentUpdater};
