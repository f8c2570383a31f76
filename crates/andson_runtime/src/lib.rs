//! Database, entity handles, JSON persistence, and logging for AnDson.
//!
//! This crate provides:
//! - [`Database`] - A shared store root that hands out handles
//! - [`AnimeHandle`], [`ViewHandle`], [`ReviewHandle`] - Handles that
//!   re-validate their id chain on every access
//! - [`serialize`] - JSON text and file persistence
//! - [`DocumentConfig`] - Open/save settings
//! - [`logging`] - Rotating file logger bootstrap

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod database;
pub mod handle;
pub mod logging;
pub mod serialize;

pub use config::DocumentConfig;
pub use database::Database;
pub use handle::{AnimeHandle, ReviewHandle, ViewHandle};
pub use logging::{default_log_level, init_logging, logging_status};
pub use serialize::{from_json, load_from_file, save_to_file, to_json};
