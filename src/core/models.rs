// src/core/models.rs

use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use strum::Display;

// --- Sentinel Values ---
// Reserved strings standing in for absent or failed values, distinct from
// empty. Status derivation and the brief both key off these exact strings,
// so they live here rather than scattered through the collectors.

/// A security header that is absent on the response.
pub const HEADER_MISSING: &str = "MISSING";
/// A header that is present but whose value is not valid UTF-8.
pub const HEADER_INVALID_UTF8: &str = "[Invalid UTF-8]";
/// An auxiliary endpoint that answered with a non-success status.
pub const ARTIFACT_NOT_FOUND: &str = "Not Found (404)";
/// An auxiliary fetch that failed at the transport level.
pub const ARTIFACT_FETCH_FAILED: &str = "Failed to fetch";
/// A reachable sitemap that held no extractable location URLs.
pub const SITEMAP_NO_URLS: &str = "Sitemap found but no URLs extracted.";

// --- Fixed Report Texts ---

/// Report body returned when the assessment service settings are absent.
pub const CONFIG_ERROR_REPORT: &str =
    "## Configuration Error\n\nLLM API keys are missing. Cannot perform advanced analysis.";

/// Prefix of the report body returned when the pipeline fails hard; the
/// rendered failure cause is appended after it.
pub const DIAGNOSIS_FAILED_PREFIX: &str =
    "## Diagnosis Failed\n\nWraithScan encountered a critical error during scanning.\n\nDebug: ";

// --- Pipeline Input ---

// One captured target page. The engine never fetches the page itself; the
// caller supplies html and headers, and they stay immutable for the whole
// run.
#[derive(Debug, Clone)]
pub struct PageCapture {
    pub url: String,
    pub html: String,
    pub headers: HeaderMap,
}

impl PageCapture {
    pub fn new(url: &str, html: &str, headers: HeaderMap) -> Self {
        Self {
            url: url.to_string(),
            html: html.to_string(),
            headers,
        }
    }
}

// --- Markup Facts ---

// Title and external-script excerpt lifted from the captured HTML. Both
// arrive pre-bounded from the extractor so the brief never re-truncates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageFacts {
    pub title: String,
    pub script_excerpt: String,
}

// --- Security Header Report ---

// Exactly six well-known headers, each mapped to its response value or the
// MISSING sentinel. Field order is the serialization order, so the brief
// embeds the canonical header names in a stable sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecurityHeaderReport {
    #[serde(rename = "Content-Security-Policy")]
    pub content_security_policy: String,
    #[serde(rename = "X-Frame-Options")]
    pub x_frame_options: String,
    #[serde(rename = "Strict-Transport-Security")]
    pub strict_transport_security: String,
    #[serde(rename = "X-Content-Type-Options")]
    pub x_content_type_options: String,
    #[serde(rename = "Referrer-Policy")]
    pub referrer_policy: String,
    #[serde(rename = "Permissions-Policy")]
    pub permissions_policy: String,
}

// --- Auxiliary Artifacts ---

// Robots and sitemap values as collected: a bounded content extract or one
// of the sentinel strings. Never an error; containment happens inside the
// collector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuxiliaryArtifacts {
    pub robots: String,
    pub sitemap: String,
}

// --- Final Report ---

// Terminal state of one auxiliary artifact as exposed on the report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display)]
pub enum ArtifactStatus {
    Analyzed,
    #[serde(rename = "Not Found")]
    #[strum(serialize = "Not Found")]
    NotFound,
    Error,
}

// The engine's only output. The optional fields are omitted from the JSON
// body on the misconfigured short-circuit, which never computes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub url: String,
    pub markdown_report: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub robots_status: Option<ArtifactStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sitemap_status: Option<ArtifactStatus>,
}

impl ScanReport {
    /// Report for the short-circuit taken when service settings are absent.
    pub fn misconfigured(url: &str) -> Self {
        Self {
            url: url.to_string(),
            markdown_report: CONFIG_ERROR_REPORT.to_string(),
            tech_stack: None,
            robots_status: None,
            sitemap_status: None,
        }
    }

    /// Report for the single orchestrator-level catch: the fixed diagnostic
    /// prefix followed by the rendered failure cause.
    pub fn failed(url: &str, cause: &str) -> Self {
        Self {
            url: url.to_string(),
            markdown_report: format!("{}{}", DIAGNOSIS_FAILED_PREFIX, cause),
            tech_stack: Some(Vec::new()),
            robots_status: Some(ArtifactStatus::Error),
            sitemap_status: Some(ArtifactStatus::Error),
        }
    }
}

// --- Client Session ---

// Per-client bookkeeping used by a surrounding service for quota math.
// Storage, expiry window and reset live outside this crate; only the shape
// and the remaining-quota computation are defined here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClientSession {
    pub client_ip: String,
    pub scan_count: u32,
    pub last_scan_at: DateTime<Utc>,
}

impl ClientSession {
    /// Scans left within `quota`, never negative.
    pub fn remaining_quota(&self, quota: u32) -> u32 {
        quota.saturating_sub(self.scan_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_report_serializes_camel_case_and_omits_absent_fields() {
        let report = ScanReport::misconfigured("https://example.com");
        let json = serde_json::to_value(&report).expect("serialize report");

        assert_eq!(json["url"], "https://example.com");
        assert_eq!(json["markdownReport"], CONFIG_ERROR_REPORT);
        let object = json.as_object().expect("object");
        assert!(!object.contains_key("techStack"));
        assert!(!object.contains_key("robotsStatus"));
        assert!(!object.contains_key("sitemapStatus"));
    }

    #[test]
    fn artifact_status_serializes_with_original_labels() {
        assert_eq!(
            serde_json::to_value(ArtifactStatus::NotFound).expect("serialize"),
            serde_json::Value::String("Not Found".to_string())
        );
        assert_eq!(
            serde_json::to_value(ArtifactStatus::Analyzed).expect("serialize"),
            serde_json::Value::String("Analyzed".to_string())
        );
        assert_eq!(ArtifactStatus::NotFound.to_string(), "Not Found");
    }

    #[test]
    fn failed_report_pairs_prefix_with_cause() {
        let report = ScanReport::failed("https://example.com", "boom");
        assert!(report.markdown_report.starts_with("## Diagnosis Failed"));
        assert!(report.markdown_report.ends_with("Debug: boom"));
        assert_eq!(report.tech_stack, Some(Vec::new()));
        assert_eq!(report.robots_status, Some(ArtifactStatus::Error));
        assert_eq!(report.sitemap_status, Some(ArtifactStatus::Error));
    }

    #[test]
    fn header_report_serializes_canonical_names_in_declared_order() {
        let report = SecurityHeaderReport {
            content_security_policy: "default-src 'self'".to_string(),
            x_frame_options: HEADER_MISSING.to_string(),
            strict_transport_security: HEADER_MISSING.to_string(),
            x_content_type_options: "nosniff".to_string(),
            referrer_policy: HEADER_MISSING.to_string(),
            permissions_policy: HEADER_MISSING.to_string(),
        };
        let json = serde_json::to_string_pretty(&report).expect("serialize");

        let keys: Vec<usize> = [
            "Content-Security-Policy",
            "X-Frame-Options",
            "Strict-Transport-Security",
            "X-Content-Type-Options",
            "Referrer-Policy",
            "Permissions-Policy",
        ]
        .iter()
        .map(|name| json.find(name).expect("key present"))
        .collect();
        assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn remaining_quota_saturates_at_zero() {
        let session = ClientSession {
            client_ip: "203.0.113.9".to_string(),
            scan_count: 7,
            last_scan_at: Utc::now(),
        };
        assert_eq!(session.remaining_quota(10), 3);
        assert_eq!(session.remaining_quota(5), 0);
    }
}
