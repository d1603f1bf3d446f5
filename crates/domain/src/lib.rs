//! # Slotgrid Domain
//!
//! Business domain types and models for slotgrid.
//!
//! This crate contains:
//! - Domain data types (Event, TimeSlot, WeekSchedule, Feed)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Pure string utilities (title anonymization)
//!
//! ## Architecture
//! - No dependencies on other slotgrid crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::AppConfig;
pub use errors::{Result, SlotgridError};
pub use types::{Event, EventStatus, Feed, TimeSlot, WeekSchedule, WEEKDAYS};
