//! # Slotgrid Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The weekly availability merge engine
//! - ISO week date arithmetic and the slot grid builder
//! - The publish window planner
//! - Port/adapter interfaces (traits) for I/O collaborators
//!
//! ## Architecture Principles
//! - Only depends on `slotgrid-domain`
//! - No network, filesystem, or process code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod ports;
pub mod schedule;

pub use ports::{FeedFetcher, FeedParser, SchedulePublisher};
pub use schedule::merge::MergeEngine;
pub use schedule::week::{first_day_of_iso_week, week_bounds, week_of};
pub use schedule::window::{past_friday_cutover, plan_weeks, WeekTarget};
