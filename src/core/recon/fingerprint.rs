// src/core/recon/fingerprint.rs

use reqwest::header::HeaderMap;
use tracing::{debug, info};

/// A markup probe pairing a lowercase literal substring with the canonical
/// label it detects.
struct MarkupProbe {
    needle: &'static str,
    label: &'static str,
}

// Probes run in declaration order so the fingerprint is deterministic for
// identical input. Substring matching is deliberately loose; a false
// positive is still usable reconnaissance signal.
static MARKUP_PROBES: &[MarkupProbe] = &[
    MarkupProbe { needle: "react", label: "React" },
    MarkupProbe { needle: "next.js", label: "Next.js" },
    MarkupProbe { needle: "__next", label: "Next.js" },
    MarkupProbe { needle: "vue", label: "Vue.js" },
    MarkupProbe { needle: "wp-content", label: "WordPress" },
    MarkupProbe { needle: "bootstrap", label: "Bootstrap" },
    MarkupProbe { needle: "tailwind", label: "Tailwind CSS" },
    MarkupProbe { needle: "jquery", label: "jQuery" },
    MarkupProbe { needle: "shopify", label: "Shopify" },
];

/// Fingerprints the target from its response headers and raw markup.
///
/// Header checks run first (`server`, then `x-powered-by`), then the markup
/// probes over the body lowercased once. The output is de-duplicated and
/// keeps first-detection order.
///
/// # Arguments
/// * `headers` - The response headers of the captured page.
/// * `html` - The full HTML text of the captured page.
///
/// # Returns
/// An ordered list of technology labels, possibly empty. Never fails.
pub fn detect_tech_stack(headers: &HeaderMap, html: &str) -> Vec<String> {
    let mut stack: Vec<String> = Vec::new();

    if let Some(server) = headers.get("server").and_then(|v| v.to_str().ok()) {
        debug!(value = server, "Server header present.");
        stack.push(format!("Server: {}", server));
    }
    if let Some(powered_by) = headers.get("x-powered-by").and_then(|v| v.to_str().ok()) {
        debug!(value = powered_by, "X-Powered-By header present.");
        stack.push(format!("X-Powered-By: {}", powered_by));
    }

    let lowered = html.to_lowercase();
    for probe in MARKUP_PROBES {
        if lowered.contains(probe.needle) && !stack.iter().any(|label| label == probe.label) {
            debug!(tech = probe.label, "Markup probe matched.");
            stack.push(probe.label.to_string());
        }
    }

    info!(count = %stack.len(), "Technology fingerprint assembled.");
    stack
}
