//! AnDson - Personal anime record store
//!
//! This crate re-exports all layers of the AnDson system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: andson_runtime    - Database, handles, JSON files, logging
//! Layer 1: andson_storage    - Arenas, name catalogs, records, documents
//! Layer 0: andson_foundation - Ids, errors, format validators
//! ```

pub use andson_foundation as foundation;
pub use andson_runtime as runtime;
pub use andson_storage as storage;
