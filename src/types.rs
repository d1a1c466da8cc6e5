// Type definitions shared across the crate

use serde::Serialize;

/// A single question about one topic, as submitted from the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    pub topic: String,
    pub question: String,
    #[serde(skip_serializing)]
    pub credential: Option<String>,
}

impl AnalysisRequest {
    /// Build a request from raw form input. Question and credential are
    /// trimmed; a blank credential counts as absent.
    pub fn new(
        topic: impl Into<String>,
        question: impl Into<String>,
        credential: Option<String>,
    ) -> Self {
        let credential = credential
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Self {
            topic: topic.into().trim().to_string(),
            question: question.into().trim().to_string(),
            credential,
        }
    }

    /// Check the submission invariant: topic and question must both be present.
    pub fn validate(&self, message: &str) -> AppResult<()> {
        if self.topic.is_empty() || self.question.is_empty() {
            return Err(AppError::Validation(message.to_string()));
        }
        Ok(())
    }
}

/// Which path produced an analysis text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
    Model,
    Offline,
    Failure,
}

/// Markdown text returned by the model or one of the canned fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub raw_text: String,
    pub source: ResultSource,
}

impl AnalysisResult {
    pub fn model(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            source: ResultSource::Model,
        }
    }

    pub fn offline(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            source: ResultSource::Offline,
        }
    }

    pub fn failure(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            source: ResultSource::Failure,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    /// The request never got a response (connect, timeout, TLS).
    #[error("LLM API error: {0}")]
    LLMApi(String),

    #[error("LLM API error ({status}): {message}")]
    LLMStatus { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Whether the same request may succeed if sent again. Client errors and
    /// malformed bodies will not.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::LLMApi(_) => true,
            AppError::LLMStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
