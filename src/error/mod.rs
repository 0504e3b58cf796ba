//! Error module orchestrator.
//!
//! Downstream code imports the crate error type from here while the
//! implementation details live in the private `types` module.

mod types;

pub use types::{LayoutError, Result};
