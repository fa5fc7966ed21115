#![forbid(unsafe_code)]

//! Core domain model and calculation logic for the boost timer calculator.
//!
//! This crate provides:
//! - Domain types (tiers, per-tier amounts, scenarios, breakdown rows)
//! - Experience engine (level <-> cumulative experience)
//! - Progression aggregation and the time-progression chart series
//! - Interactive session state and line commands
//! - CSV/JSON export, configuration, and logging setup

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod experience;
pub mod progression;
pub mod format;
pub mod session;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use experience::{
    cumulative_experience_for_level, experience_for_level, level_for_experience, MAX_LEVEL,
    MIN_LEVEL,
};
pub use progression::{compute, time_progression};
pub use format::format_time;
pub use session::{Session, SessionCommand};
