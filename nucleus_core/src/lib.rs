#![forbid(unsafe_code)]

//! Core domain model and business logic for the Nucleus macro planner.
//!
//! This crate provides:
//! - Domain types (macro targets, weekdays, workout days)
//! - Workout-aware macro adjustment
//! - Weekly aggregation and per-day plans
//! - The workout schedule store and its persistence
//! - CSV plan export/import

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod adjust;
pub mod weekly;
pub mod schedule;
pub mod store;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use adjust::{adjust_macros, Adjustment, AdjustmentPolicy};
pub use weekly::{plan_week, summarize_week, DayPlan, WeeklySummary};
pub use schedule::WorkoutSchedule;
pub use export::{export_plan_csv, import_schedule_csv};
