//! Cross-layer integration tests for AnDson
//!
//! Tests that verify correct interaction between multiple crates.

mod persistence;
mod scenario;
mod stale_handles;
