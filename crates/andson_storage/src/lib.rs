//! Entity arenas, name catalogs, and the record hierarchy for AnDson.
//!
//! This crate provides:
//! - [`EntityArena`] - Per-scope entity storage with never-reused ids
//! - [`NameCatalog`] - Derived name → id indices, one per scope
//! - [`Anime`], [`View`], [`Review`] - The three record levels
//! - [`Store`] - The root, resolving id chains level by level
//! - [`document`] - The persisted document model and version check

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod anime;
pub mod arena;
pub mod catalog;
pub mod document;
mod list;
pub mod review;
pub mod store;
pub mod view;

pub use anime::{Anime, NewAnime};
pub use arena::EntityArena;
pub use catalog::NameCatalog;
pub use document::{Document, DocumentHeader, EDITION, SUPPORTED_VERSION};
pub use review::{NewReview, Review};
pub use store::Store;
pub use view::{NewView, View};
