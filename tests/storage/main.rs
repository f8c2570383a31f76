//! Integration tests for Layer 1: Storage
//!
//! Tests for arenas, name catalogs, the record hierarchy, and documents.

mod arena;
mod catalog;
mod document;
mod store;
