//! Weekly schedule computation
//!
//! Pure date arithmetic and the merge engine. Everything here is synchronous,
//! allocation-light, and free of process-wide state; concurrent merges for
//! different weeks only share the read-only input event slice.

pub mod grid;
pub mod merge;
pub mod week;
pub mod window;
