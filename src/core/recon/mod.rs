// src/core/recon/mod.rs

// Passive collection over an already-captured page, plus the two auxiliary
// fetches issued against the target origin.
pub mod artifacts;
pub mod fingerprint;
pub mod headers;
pub mod markup;

pub use self::artifacts::collect_auxiliary_artifacts;
pub use self::fingerprint::detect_tech_stack;
pub use self::headers::evaluate_security_headers;
pub use self::markup::extract_page_facts;
