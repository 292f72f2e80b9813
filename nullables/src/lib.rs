//! Nullable infrastructure for deterministic testing.
//!
//! Storage is abstracted behind the `ics-store` traits. This crate provides
//! test-friendly implementations that:
//! - Return deterministic values
//! - Can be inspected programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod store;

pub use store::NullIntentStore;
