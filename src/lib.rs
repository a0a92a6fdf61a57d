// src/lib.rs

// Crate root: exposes the engine as a library so both the CLI binary and
// the integration tests drive the same pipeline.
pub mod config;
pub mod core;
pub mod logging;

pub use crate::config::AssessmentConfig;
pub use crate::core::engine::analyze_target;
pub use crate::core::models::{ArtifactStatus, PageCapture, ScanReport};
