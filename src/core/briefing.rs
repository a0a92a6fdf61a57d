// src/core/briefing.rs

// The brief is the single bounded document handed to the assessment
// service: a reconnaissance data block followed by a fixed, versioned
// protocol block. Only the data sections vary between runs.

use color_eyre::eyre::{Result, WrapErr};
use tracing::debug;

use crate::core::models::{AuxiliaryArtifacts, PageFacts, SecurityHeaderReport};

/// Role the assessment service is asked to assume on every call.
pub const ASSESSOR_PERSONA: &str =
    "You are a senior penetration tester. You provide realistic, actionable security reports.";

// Constant across invocations; bumping the version marker is the only way
// this text changes.
const ASSESSMENT_PROTOCOL: &str = r#"=== ASSESSMENT PROTOCOL v1 ===
Perform a deeply technical security audit based on the reconnaissance data above.

PHASE 1: ATTACK SURFACE ANALYSIS
- Analyze the robots entries. Are admins hiding sensitive directories (e.g. /admin, /backup, /config)?
- Analyze the detected stack. Are there known historical vulnerabilities associated with these technologies?
- Evaluate the script sources. Any risky third-party integrations (trackers over http, outdated libraries)?

PHASE 2: VULNERABILITY AUDIT (OWASP TOP 10)
- Inspect the security headers and explain the exact impact of each missing one.
- Review the overall posture the reconnaissance layer implies.

PHASE 3: EXPLOITABILITY ASSESSMENT
- For each finding, describe a theoretical attack vector an adversary would attempt.
- Stay theoretical: no working exploit payloads.

PHASE 4: REPORT GENERATION
- Produce a professional Markdown report with this structure:
  # WraithScan Security Audit Report
  ## Executive Summary
  ## Reconnaissance Findings
  ## Critical Vulnerabilities
  ## Medium Risks
  ## Strengthening Recommendations
- Assign a quantitative Security Score (0-100).

OUTPUT FORMAT:
Pure Markdown. No wrapper text. Be concise, technical, and authoritative."#;

/// Assembles the technical brief for one captured page.
///
/// Deterministic and side-effect-free: identical inputs produce an
/// identical document. Every embedded field arrives pre-truncated from its
/// producer, so nothing is re-truncated here.
///
/// # Arguments
/// * `url` - The captured page URL the assessment targets.
/// * `facts` - Title and script excerpt from the markup extractor.
/// * `tech_stack` - Ordered fingerprint labels.
/// * `artifacts` - Robots and sitemap values, content or sentinel.
/// * `header_report` - The six-header security evaluation.
pub fn compose_brief(
    url: &str,
    facts: &PageFacts,
    tech_stack: &[String],
    artifacts: &AuxiliaryArtifacts,
    header_report: &SecurityHeaderReport,
) -> Result<String> {
    let headers_json = serde_json::to_string_pretty(header_report)
        .wrap_err("failed to serialize the security header report")?;

    let stack_line = if tech_stack.is_empty() {
        "Unknown".to_string()
    } else {
        tech_stack.join(", ")
    };
    let robots = if artifacts.robots.is_empty() {
        "None"
    } else {
        artifacts.robots.as_str()
    };
    let sitemap = if artifacts.sitemap.is_empty() {
        "None"
    } else {
        artifacts.sitemap.as_str()
    };

    debug!(url, "Composing assessment brief.");

    Ok(format!(
        r#"You are performing an authorized passive security assessment of: {url}

=== RECONNAISSANCE LAYER ===
[Target Profile]
- Page Title: {title}
- Tech Stack Detected: {stack}

[Attack Surface]
- Robots Policy (Disallowed Paths):
{robots}

- Sitemap (Endpoint Sample):
{sitemap}

- External Scripts (Third-party risks):
{scripts}

[Security Posture]
- Headers:
{headers}

{protocol}"#,
        url = url,
        title = facts.title,
        stack = stack_line,
        robots = robots,
        sitemap = sitemap,
        scripts = facts.script_excerpt,
        headers = headers_json,
        protocol = ASSESSMENT_PROTOCOL,
    ))
}
