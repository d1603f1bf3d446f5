//! Pure domain utilities

pub mod privacy;
