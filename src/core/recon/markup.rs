// src/core/recon/markup.rs

use scraper::{Html, Selector};
use tracing::debug;

use crate::core::models::PageFacts;

const SCRIPT_EXCERPT_LIMIT: usize = 500;

/// Lifts the page title and an external-script excerpt out of raw markup.
///
/// The title is the text of the first `<title>` element, or `"No Title"`.
/// External script `src` values are newline-joined, cut to the first 500
/// characters, and suffixed with `...`, so the brief can embed the excerpt
/// without re-truncating.
pub fn extract_page_facts(html: &str) -> PageFacts {
    let document = Html::parse_document(html);

    let title = Selector::parse("title")
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_string())
        })
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| "No Title".to_string());

    let sources: Vec<&str> = Selector::parse("script[src]")
        .ok()
        .map(|selector| {
            document
                .select(&selector)
                .filter_map(|el| el.value().attr("src"))
                .collect()
        })
        .unwrap_or_default();

    debug!(title = %title, scripts = %sources.len(), "Extracted markup facts.");

    let excerpt: String = sources
        .join("\n")
        .chars()
        .take(SCRIPT_EXCERPT_LIMIT)
        .collect();

    PageFacts {
        title,
        script_excerpt: format!("{}...", excerpt),
    }
}
