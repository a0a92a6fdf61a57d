// src/core/recon/artifacts.rs

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use crate::core::models::{
    AuxiliaryArtifacts, ARTIFACT_FETCH_FAILED, ARTIFACT_NOT_FOUND, SITEMAP_NO_URLS,
};

/// Identifies the scanner on every auxiliary request it sends.
pub const BOT_USER_AGENT: &str =
    concat!("WraithScanBot/", env!("CARGO_PKG_VERSION"), " (Security Research)");

const ROBOTS_PREFIX_LIMIT: usize = 500;
const SITEMAP_URL_LIMIT: usize = 5;
const AUXILIARY_TIMEOUT: Duration = Duration::from_secs(10);

// Non-greedy scan for location entries. Sitemaps in the wild are often not
// well-formed XML, so a structural text scan beats a strict parser here.
static RE_SITEMAP_LOC: Lazy<Regex> = Lazy::new(|| Regex::new(r"<loc>(.*?)</loc>").unwrap());

/// Collects both auxiliary artifacts concurrently.
///
/// The two fetches are independent; a slow or failing endpoint neither
/// serializes nor aborts the other, so wall-clock cost is the slower of
/// the two rather than their sum.
pub async fn collect_auxiliary_artifacts(base_url: &str) -> AuxiliaryArtifacts {
    let (robots, sitemap) = tokio::join!(
        fetch_robots_policy(base_url),
        fetch_sitemap_sample(base_url)
    );
    AuxiliaryArtifacts { robots, sitemap }
}

/// Fetches `/robots.txt` from the target origin.
///
/// # Arguments
/// * `base_url` - The captured page URL; the artifact path is resolved
///   against its origin.
///
/// # Returns
/// The first 500 characters of the body on success, `"Not Found (404)"` on
/// a non-success status, or `"Failed to fetch"` on any transport failure.
/// Never fails past this function.
pub async fn fetch_robots_policy(base_url: &str) -> String {
    info!(base_url, "Fetching robots policy.");
    let body = match fetch_artifact_body(base_url, "/robots.txt").await {
        Ok(Some(text)) => text,
        Ok(None) => return ARTIFACT_NOT_FOUND.to_string(),
        Err(reason) => {
            warn!(base_url, error = %reason, "Robots fetch degraded to sentinel.");
            return ARTIFACT_FETCH_FAILED.to_string();
        }
    };
    body.chars().take(ROBOTS_PREFIX_LIMIT).collect()
}

/// Fetches `/sitemap.xml` and samples up to 5 location URLs from it.
///
/// # Returns
/// The extracted URLs joined with newlines, a found-but-empty marker when
/// the body holds no `<loc>` entries, or the same sentinels as the robots
/// fetch for status and transport failures.
pub async fn fetch_sitemap_sample(base_url: &str) -> String {
    info!(base_url, "Fetching sitemap sample.");
    let body = match fetch_artifact_body(base_url, "/sitemap.xml").await {
        Ok(Some(text)) => text,
        Ok(None) => return ARTIFACT_NOT_FOUND.to_string(),
        Err(reason) => {
            warn!(base_url, error = %reason, "Sitemap fetch degraded to sentinel.");
            return ARTIFACT_FETCH_FAILED.to_string();
        }
    };

    let locations = extract_sitemap_locations(&body);
    if locations.is_empty() {
        debug!(base_url, "Sitemap reachable but held no location entries.");
        return SITEMAP_NO_URLS.to_string();
    }
    locations.join("\n")
}

// Ok(Some(body)) on success, Ok(None) on a non-success status, Err with a
// short reason for anything transport-shaped. Callers map the Err case to
// the fetch-failure sentinel.
async fn fetch_artifact_body(base_url: &str, path: &str) -> Result<Option<String>, String> {
    let target = Url::parse(base_url)
        .and_then(|base| base.join(path))
        .map_err(|e| format!("invalid target url: {}", e))?;

    let client = Client::builder()
        .user_agent(BOT_USER_AGENT)
        .timeout(AUXILIARY_TIMEOUT)
        .build()
        .map_err(|e| format!("failed to build HTTP client: {}", e))?;

    let response = client
        .get(target.clone())
        .send()
        .await
        .map_err(|e| format!("request failed: {}", e))?;

    if !response.status().is_success() {
        debug!(url = %target, status = %response.status(), "Artifact endpoint returned non-success status.");
        return Ok(None);
    }

    let body = response
        .text()
        .await
        .map_err(|e| format!("failed to read response body: {}", e))?;
    Ok(Some(body))
}

fn extract_sitemap_locations(body: &str) -> Vec<&str> {
    RE_SITEMAP_LOC
        .captures_iter(body)
        .take(SITEMAP_URL_LIMIT)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}
