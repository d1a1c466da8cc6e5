// Google Gemini adapter (generateContent)
// API Reference: https://ai.google.dev/api/generate-content

use crate::config::LLMConfig;
use crate::llm::provider::LLMAdapter;
use crate::types::{AppError, AppResult};
use crate::utils::with_retry;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

pub struct GoogleAdapter {
    client: Client,
    api_base: String,
    model: String,
    google_search: bool,
    max_retries: u32,
    retry_delay: Duration,
}

// Request types for the generateContent API
#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

// Response types. Every level is optional so that shape problems surface as
// InvalidResponse rather than as a serde error.
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GoogleAdapter {
    pub fn new(config: &LLMConfig) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Config(format!("failed to construct HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            google_search: config.google_search,
            max_retries: config.max_retries,
            retry_delay: RETRY_BASE_DELAY,
        })
    }

    /// Endpoint URL without the key; the key goes in the query string so it
    /// never appears in logged URLs.
    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        )
    }

    fn build_request<'a>(&self, prompt: &'a str) -> GenerateContentRequest<'a> {
        let tools = if self.google_search {
            vec![Tool {
                google_search: GoogleSearch {},
            }]
        } else {
            Vec::new()
        };

        GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            tools,
        }
    }

    async fn send_once(&self, prompt: &str, api_key: &str) -> AppResult<String> {
        let url = self.endpoint();
        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&self.build_request(prompt))
            .send()
            .await
            .map_err(|e| AppError::LLMApi(format!("Gemini request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::LLMStatus {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::InvalidResponse(format!("Failed to parse Gemini response: {}", e.without_url())))?;

        extract_text(body)
    }
}

fn extract_text(body: GenerateContentResponse) -> AppResult<String> {
    let candidate = body
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| AppError::InvalidResponse("Gemini returned no candidates".to_string()))?;

    candidate
        .content
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or_else(|| AppError::InvalidResponse("Gemini candidate has no text part".to_string()))
}

#[async_trait]
impl LLMAdapter for GoogleAdapter {
    async fn generate_content(&self, prompt: &str, api_key: &str) -> AppResult<String> {
        debug!(model = %self.model, prompt_chars = prompt.chars().count(), "Sending generateContent request");

        let text = with_retry(
            || self.send_once(prompt, api_key),
            self.max_retries,
            self.retry_delay,
            AppError::is_retryable,
        )
        .await?;

        info!(model = %self.model, response_chars = text.chars().count(), "Gemini response received");
        Ok(text)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
