// src/core/engine.rs

use color_eyre::eyre::Result;
use tracing::{error, info, warn};

use crate::config::{AssessmentConfig, Credentials};
use crate::core::assessment::request_assessment;
use crate::core::briefing::compose_brief;
use crate::core::models::{
    ArtifactStatus, PageCapture, ScanReport, ARTIFACT_FETCH_FAILED, ARTIFACT_NOT_FOUND,
    SITEMAP_NO_URLS,
};
use crate::core::recon::{
    collect_auxiliary_artifacts, detect_tech_stack, evaluate_security_headers, extract_page_facts,
};

/// Runs the full reconnaissance-and-assessment pipeline for one captured
/// page.
///
/// Total with respect to its inputs: every path returns a well-formed
/// `ScanReport` with a non-empty markdown body, and no failure escapes
/// this boundary. Three terminal outcomes exist: the misconfigured
/// short-circuit, the populated success report, and the diagnostic report
/// produced by the single catch below.
///
/// # Arguments
/// * `config` - Process-wide assessment service settings.
/// * `page` - The captured target page (url, html, response headers).
pub async fn analyze_target(config: &AssessmentConfig, page: &PageCapture) -> ScanReport {
    info!(url = %page.url, "Starting target analysis.");

    let Some(credentials) = config.credentials() else {
        // Without service settings no assessment can happen, so the recon
        // work is skipped as well and no request leaves the process.
        warn!("Assessment service settings are incomplete; skipping scan.");
        return ScanReport::misconfigured(&page.url);
    };

    match run_pipeline(&credentials, page).await {
        Ok(report) => report,
        Err(e) => {
            error!(url = %page.url, error = %e, "Pipeline failed; returning diagnostic report.");
            ScanReport::failed(&page.url, &format!("{:#}", e))
        }
    }
}

// Everything that can escalate lives here so analyze_target stays the
// single catch point. Auxiliary fetch failures never surface as errors;
// they degrade to sentinels inside the collector.
async fn run_pipeline(credentials: &Credentials<'_>, page: &PageCapture) -> Result<ScanReport> {
    let facts = extract_page_facts(&page.html);
    let tech_stack = detect_tech_stack(&page.headers, &page.html);
    let header_report = evaluate_security_headers(&page.headers);
    let artifacts = collect_auxiliary_artifacts(&page.url).await;

    let brief = compose_brief(&page.url, &facts, &tech_stack, &artifacts, &header_report)?;
    let markdown_report = request_assessment(credentials, &brief).await?;

    let robots_status = derive_robots_status(&artifacts.robots);
    let sitemap_status = derive_sitemap_status(&artifacts.sitemap);

    info!(
        url = %page.url,
        tech = %tech_stack.len(),
        robots = %robots_status,
        sitemap = %sitemap_status,
        "Target analysis finished."
    );

    Ok(ScanReport {
        url: page.url.clone(),
        markdown_report,
        tech_stack: Some(tech_stack),
        robots_status: Some(robots_status),
        sitemap_status: Some(sitemap_status),
    })
}

// Robots artifact → report status. The fetch-failure sentinel still counts
// as analyzed; Error is reserved for the pipeline-level failure path.
fn derive_robots_status(robots: &str) -> ArtifactStatus {
    if robots.starts_with("Not Found") {
        ArtifactStatus::NotFound
    } else {
        ArtifactStatus::Analyzed
    }
}

// Sitemap artifact → report status. Analyzed only when location URLs were
// actually extracted; the sentinels and the found-but-empty marker all map
// to NotFound.
fn derive_sitemap_status(sitemap: &str) -> ArtifactStatus {
    if sitemap == ARTIFACT_NOT_FOUND || sitemap == ARTIFACT_FETCH_FAILED || sitemap == SITEMAP_NO_URLS
    {
        ArtifactStatus::NotFound
    } else {
        ArtifactStatus::Analyzed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::CONFIG_ERROR_REPORT;
    use reqwest::header::HeaderMap;

    #[test]
    fn robots_status_follows_the_not_found_prefix_rule() {
        assert_eq!(
            derive_robots_status(ARTIFACT_NOT_FOUND),
            ArtifactStatus::NotFound
        );
        assert_eq!(
            derive_robots_status("User-agent: *"),
            ArtifactStatus::Analyzed
        );
        // A transport failure is still "analyzed"; Error only comes from
        // the pipeline-level failure path.
        assert_eq!(
            derive_robots_status(ARTIFACT_FETCH_FAILED),
            ArtifactStatus::Analyzed
        );
    }

    #[test]
    fn sitemap_status_requires_extracted_urls() {
        assert_eq!(
            derive_sitemap_status("https://a/\nhttps://b/"),
            ArtifactStatus::Analyzed
        );
        assert_eq!(
            derive_sitemap_status(SITEMAP_NO_URLS),
            ArtifactStatus::NotFound
        );
        assert_eq!(
            derive_sitemap_status(ARTIFACT_NOT_FOUND),
            ArtifactStatus::NotFound
        );
        assert_eq!(
            derive_sitemap_status(ARTIFACT_FETCH_FAILED),
            ArtifactStatus::NotFound
        );
    }

    #[tokio::test]
    async fn missing_settings_short_circuit_with_the_fixed_report() {
        let page = PageCapture::new("https://example.com", "<html></html>", HeaderMap::new());
        let report = analyze_target(&AssessmentConfig::default(), &page).await;

        assert_eq!(report.url, "https://example.com");
        assert_eq!(report.markdown_report, CONFIG_ERROR_REPORT);
        assert!(report.tech_stack.is_none());
        assert!(report.robots_status.is_none());
        assert!(report.sitemap_status.is_none());
    }
}
