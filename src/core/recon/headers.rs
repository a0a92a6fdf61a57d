// src/core/recon/headers.rs

use reqwest::header::HeaderMap;
use tracing::{debug, warn};

use crate::core::models::{SecurityHeaderReport, HEADER_INVALID_UTF8, HEADER_MISSING};

/// Reads one header, falling back to the `"MISSING"` sentinel.
///
/// Lookup is case-insensitive through `HeaderMap`. A header that is present
/// but not valid UTF-8 reports a placeholder so it still counts as set.
fn check_header(headers: &HeaderMap, name: &str) -> String {
    match headers.get(name) {
        Some(value) => match value.to_str() {
            Ok(s) => {
                debug!(header_name = name, value = s, "Header found.");
                s.to_string()
            }
            Err(_) => {
                warn!(header_name = name, "Header found but contained invalid UTF-8.");
                HEADER_INVALID_UTF8.to_string()
            }
        },
        None => {
            debug!(header_name = name, "Header not found.");
            HEADER_MISSING.to_string()
        }
    }
}

/// Evaluates the six well-known security headers on the captured response.
///
/// # Arguments
/// * `headers` - The response headers of the already-fetched target page.
///
/// # Returns
/// A `SecurityHeaderReport` with exactly six entries, each holding the
/// header's literal value or the `"MISSING"` sentinel. Never partial.
pub fn evaluate_security_headers(headers: &HeaderMap) -> SecurityHeaderReport {
    debug!("Evaluating security response headers.");
    SecurityHeaderReport {
        content_security_policy: check_header(headers, "content-security-policy"),
        x_frame_options: check_header(headers, "x-frame-options"),
        strict_transport_security: check_header(headers, "strict-transport-security"),
        x_content_type_options: check_header(headers, "x-content-type-options"),
        referrer_policy: check_header(headers, "referrer-policy"),
        permissions_policy: check_header(headers, "permissions-policy"),
    }
}
