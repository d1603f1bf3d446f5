//! # Slotgrid Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The HTTP/file feed fetcher (reqwest)
//! - The ICS document parser
//! - The markdown schedule renderer
//! - The git-backed schedule publisher
//!
//! ## Architecture
//! - Implements traits defined in `slotgrid-core`
//! - Depends on `slotgrid-domain` and `slotgrid-core`
//! - Contains all "impure" code (network, filesystem, processes)

pub mod errors;
pub mod fetch;
pub mod git;
pub mod ics;
pub mod render;

// Re-export commonly used items
pub use errors::InfraError;
pub use fetch::FeedClient;
pub use git::GitRepository;
pub use ics::IcsParser;
pub use render::MarkdownRenderer;
