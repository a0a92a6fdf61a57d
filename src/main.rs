// src/main.rs

use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use url::Url;

use wraithscan::config::AssessmentConfig;
use wraithscan::core::engine::analyze_target;
use wraithscan::core::models::PageCapture;
use wraithscan::core::recon::artifacts::BOT_USER_AGENT;
use wraithscan::logging;

const CAPTURE_TIMEOUT: Duration = Duration::from_secs(30);

/// Passive web reconnaissance with an LLM-written security assessment.
#[derive(Debug, Parser)]
#[command(name = "wraithscan", version, about)]
struct Cli {
    /// Target URL; a missing scheme defaults to https.
    target: String,

    /// Print the full scan report as JSON instead of the markdown body.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if let Err(e) = logging::initialize_logging() {
        eprintln!("warning: could not initialize logging: {}", e);
    }

    let target_url = normalize_target(&cli.target)?;
    let config = AssessmentConfig::from_env();

    let page = capture_page(&target_url).await?;
    let report = analyze_target(&config, &page).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.markdown_report);
    }

    Ok(())
}

/// Prepends a scheme when absent and validates the result parses as a URL.
fn normalize_target(raw: &str) -> Result<String> {
    let with_scheme = if !raw.starts_with("http://") && !raw.starts_with("https://") {
        format!("https://{}", raw)
    } else {
        raw.to_string()
    };
    Url::parse(&with_scheme)
        .map(|url| url.to_string())
        .wrap_err_with(|| format!("invalid target url: {}", raw))
}

/// Fetches the target page once. The engine itself never does this; it
/// receives the capture ready-made.
async fn capture_page(target_url: &str) -> Result<PageCapture> {
    info!(url = target_url, "Capturing target page.");
    let client = reqwest::Client::builder()
        .user_agent(BOT_USER_AGENT)
        .timeout(CAPTURE_TIMEOUT)
        .build()
        .wrap_err("failed to build the capture HTTP client")?;

    let response = client
        .get(target_url)
        .send()
        .await
        .wrap_err_with(|| format!("could not fetch {}", target_url))?;

    let headers = response.headers().clone();
    let html = response
        .text()
        .await
        .wrap_err("could not read the target page body")?;

    Ok(PageCapture::new(target_url, &html, headers))
}
