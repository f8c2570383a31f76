//! Integration tests for Layer 2: Runtime
//!
//! Tests for the shared database, entity handles, and file persistence.

mod files;
