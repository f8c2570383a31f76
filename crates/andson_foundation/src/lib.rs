//! Identifiers, errors, and format validators for AnDson.
//!
//! This crate provides:
//! - [`AnimeId`], [`ViewId`], [`ReviewId`] - Per-scope entity identifiers
//! - [`ViewKey`], [`ReviewKey`] - Id chains from the store root down to an entity
//! - [`Error`] - Rich error types with context
//! - [`validate`] - Month, date, and ranking validators

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entity;
pub mod error;
pub mod validate;

pub use entity::{AnimeId, EntityKey, EntityLevel, NameScope, ReviewId, ReviewKey, ViewId, ViewKey};
pub use error::{Error, ErrorContext, ErrorKind, Result};
