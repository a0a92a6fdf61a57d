// src/core/mod.rs

// Root of the pipeline: data shapes, passive reconnaissance, the brief
// sent to the assessment service, the service call itself, and the
// orchestrator composing all of it.

/// Shared data shapes: the captured page, recon facts, artifact sentinels,
/// the final scan report, and the client session record.
pub mod models;

/// Passive collection: tech fingerprinting, security header evaluation,
/// markup fact extraction, and the concurrent auxiliary artifact fetches.
pub mod recon;

/// Assembles the bounded technical brief handed to the assessment service.
pub mod briefing;

/// Performs the one-shot call to the external assessment service.
pub mod assessment;

/// The pipeline orchestrator tying recon, briefing, and assessment together.
pub mod engine;
