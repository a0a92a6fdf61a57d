// src/core/assessment.rs

use std::time::Duration;

use color_eyre::eyre::{eyre, Result, WrapErr};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::Credentials;
use crate::core::briefing::ASSESSOR_PERSONA;

/// Substituted when the service reply carries no usable completion text.
pub const EMPTY_REPLY_PLACEHOLDER: &str = "Error generating report.";

const ASSESSMENT_TIMEOUT: Duration = Duration::from_secs(120);
// Low temperature favors factual reporting over creativity.
const SAMPLING_TEMPERATURE: f32 = 0.2;
const MAX_COMPLETION_TOKENS: u32 = 4000;

// --- Wire Shapes ---

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

// The reply is an untrusted external schema: only the fields this crate
// reads are modelled, and every level may be absent.
#[derive(Debug, Deserialize)]
struct ChatCompletionReply {
    #[serde(default)]
    choices: Vec<ReplyChoice>,
}

#[derive(Debug, Deserialize)]
struct ReplyChoice {
    message: Option<ReplyMessage>,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

impl ChatCompletionReply {
    // First completion's text, if the reply actually carried one.
    fn into_report(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.is_empty())
    }
}

/// Sends the brief to the configured assessment service.
///
/// Exactly one attempt: a non-success status or an unreadable reply is a
/// hard failure for the whole pipeline, while a reply that merely lacks
/// completion text degrades to a fixed placeholder.
///
/// # Arguments
/// * `credentials` - The fully-populated service settings.
/// * `brief` - The technical brief composed for this run.
///
/// # Returns
/// The markdown report text produced by the service.
pub async fn request_assessment(credentials: &Credentials<'_>, brief: &str) -> Result<String> {
    let endpoint = format!(
        "{}/v1/chat/completions",
        credentials.api_url.trim_end_matches('/')
    );
    info!(endpoint = %endpoint, model = credentials.model_id, "Requesting security assessment.");

    let client = reqwest::Client::builder()
        .timeout(ASSESSMENT_TIMEOUT)
        .build()
        .wrap_err("failed to build the assessment HTTP client")?;

    let request = ChatCompletionRequest {
        model: credentials.model_id,
        messages: vec![
            ChatMessage {
                role: "system",
                content: ASSESSOR_PERSONA,
            },
            ChatMessage {
                role: "user",
                content: brief,
            },
        ],
        temperature: SAMPLING_TEMPERATURE,
        max_tokens: MAX_COMPLETION_TOKENS,
    };

    let response = client
        .post(&endpoint)
        .bearer_auth(credentials.api_key)
        .json(&request)
        .send()
        .await
        .wrap_err("assessment service request failed")?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!("assessment service returned {}: {}", status, body));
    }

    let reply: ChatCompletionReply = response
        .json()
        .await
        .wrap_err("assessment service reply was not valid JSON")?;

    Ok(reply.into_report().unwrap_or_else(|| {
        warn!("Assessment reply carried no completion text.");
        EMPTY_REPLY_PLACEHOLDER.to_string()
    }))
}
