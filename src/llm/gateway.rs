//! Inference gateway — packages an image batch into one provider request
//! and recovers a structured report from the completion text.
//!
//! Stateless per request: each `analyze` call is a pure function of its
//! input batch plus external I/O. The reqwest client is shared only as a
//! connection pool. Exactly one external call per invocation — retry policy,
//! if any, belongs to the caller.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};

use super::extract::{excerpt, extract_json_object};
use super::prompts::{self, ANALYZE_SYSTEM_PROMPT, MAX_TOKENS, TEMPERATURE};
use super::types::AnalysisReport;
use super::validate::validate_report;
use crate::config::{AppConfig, ProviderMode};
use crate::error::AnalysisError;
use crate::intake::{MAX_IMAGES, MIN_IMAGES};

/// Outbound call timeout. The session blocks until the call resolves, so
/// the request must not hang indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub struct InferenceGateway {
    config: AppConfig,
    client: reqwest::Client,
}

impl InferenceGateway {
    pub fn new(config: AppConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");
        Self { config, client }
    }

    /// Analyze a batch of base64 image payloads into a report.
    ///
    /// Batch bounds are enforced again here regardless of what the HTTP
    /// layer already checked. In reference mode no external call is made.
    pub async fn analyze(&self, images: &[String]) -> Result<AnalysisReport, AnalysisError> {
        let count = images.len();
        if !(MIN_IMAGES..=MAX_IMAGES).contains(&count) {
            return Err(AnalysisError::InvalidBatchSize { count });
        }

        let api_key = match &self.config.provider {
            ProviderMode::Reference => {
                log::warn!("[LLM] Reference mode — returning placeholder report");
                return Ok(AnalysisReport::reference());
            }
            ProviderMode::Live { api_key } => api_key,
        };

        let mut content = vec![json!({
            "type": "text",
            "text": prompts::build_analyze_message(count),
        })];
        for image in images {
            content.push(json!({
                "type": "image_url",
                "image_url": { "url": normalize_data_uri(image) },
            }));
        }

        let request_body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": ANALYZE_SYSTEM_PROMPT },
                { "role": "user", "content": content },
            ],
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
        });

        log::info!("[LLM] Model: {}", self.config.model);
        log::info!("[LLM] Sending {} images for analysis", count);
        let start = std::time::Instant::now();

        let response = self
            .client
            .post(&self.config.base_url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("[LLM] API returned {}: {}", status, body);
            return Err(AnalysisError::Provider {
                status: status.as_u16(),
                body: excerpt(&body, 200),
            });
        }

        let completion: ChatResponse = response.json().await?;
        log::info!("[LLM] API latency: {}ms", start.elapsed().as_millis());

        let choice = completion.choices.first();
        if let Some(reason) = choice.and_then(|c| c.finish_reason.as_deref()) {
            if reason == "length" {
                log::warn!("[LLM] Completion truncated (finish_reason=length)");
            }
        }

        let text = choice.map(|c| c.message.content.as_str()).unwrap_or("");
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyCompletion);
        }

        let json_str = extract_json_object(text).ok_or_else(|| AnalysisError::NoJsonFound {
            excerpt: excerpt(text, 200),
        })?;

        let parsed: Value =
            serde_json::from_str(json_str).map_err(|e| AnalysisError::MalformedJson {
                detail: e.to_string(),
                excerpt: excerpt(json_str, 200),
            })?;

        let report = validate_report(parsed)?;
        log::info!(
            "[LLM] Report parsed: {} openers, {} interests",
            report.openers.len(),
            report.profile.interests.len()
        );
        Ok(report)
    }
}

/// Normalize a payload to a data URI. Payloads that already carry the
/// `data:` prefix pass through unchanged; bare base64 gets a jpeg prefix.
fn normalize_data_uri(payload: &str) -> String {
    if payload.starts_with("data:") {
        payload.to_string()
    } else {
        format!("data:image/jpeg;base64,{payload}")
    }
}

/// Provider response envelope (OpenAI-compatible chat completions).
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}
