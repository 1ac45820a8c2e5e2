#![forbid(unsafe_code)]

//! Core domain model and business logic for the Iron Vault workout tracker.
//!
//! This crate provides:
//! - Domain types (exercises, slots, modes, playlist items, set records)
//! - The built-in exercise catalog
//! - Plate-load and one-rep-max calculators
//! - The append-only CSV set log
//! - Playlist generation
//! - The session player and its rest timer

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod calc;
pub mod history;
pub mod engine;
pub mod timer;
pub mod session;
pub mod guide;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog, Catalog};
pub use config::Config;
pub use calc::{estimated_one_rep_max, one_rep_max, plate_load, PlateCalculator, PlateLoad};
pub use history::{CsvSetLog, SetLog, LOG_FILE_NAME};
pub use engine::{generate, generate_with_rng, GenerateOptions};
pub use timer::{Deferred, RestTimer, TimerState};
pub use session::{Advance, LogOutcome, PlayerState, SessionPlayer, SessionSummary, Step};
