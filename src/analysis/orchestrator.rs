//! Request orchestration
//!
//! Turns a submitted topic/question into rendered analysis text: validate,
//! build the prompt, call the model (or fall back to the offline message),
//! then render the markdown.

use std::sync::Arc;

use tracing::{error, info};

use super::prompt::build_prompt;
use super::topics::AssetCatalog;
use crate::config::{Config, Messages};
use crate::llm::{GoogleAdapter, LLMAdapter};
use crate::output::{CommonMarkRenderer, MarkdownRenderer};
use crate::types::{AnalysisRequest, AnalysisResult, AppResult};

/// Everything the screen needs after one submission.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub request: AnalysisRequest,
    pub result: AnalysisResult,
    pub chart: String,
    pub html: String,
    pub plain_text: String,
}

pub struct RequestOrchestrator {
    adapter: Arc<dyn LLMAdapter>,
    renderer: Arc<dyn MarkdownRenderer>,
    assets: AssetCatalog,
    messages: Messages,
}

impl RequestOrchestrator {
    pub fn new(
        adapter: Arc<dyn LLMAdapter>,
        renderer: Arc<dyn MarkdownRenderer>,
        assets: AssetCatalog,
        messages: Messages,
    ) -> Self {
        Self {
            adapter,
            renderer,
            assets,
            messages,
        }
    }

    /// Gemini adapter and CommonMark renderer, as configured.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let adapter = GoogleAdapter::new(&config.llm)?;
        Ok(Self::new(
            Arc::new(adapter),
            Arc::new(CommonMarkRenderer),
            AssetCatalog::new(config.paths.assets_dir.clone()),
            config.messages.clone(),
        ))
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn assets(&self) -> &AssetCatalog {
        &self.assets
    }

    pub fn build_prompt(&self, topic: &str, question: &str) -> String {
        build_prompt(topic, question)
    }

    pub fn chart_for(&self, topic: &str) -> String {
        self.assets.chart_for(topic)
    }

    /// Produce analysis text for a prompt. Never fails: a missing credential
    /// yields the offline message, and any endpoint problem yields the error
    /// message.
    pub async fn generate_analysis(&self, prompt: &str, credential: Option<&str>) -> AnalysisResult {
        let credential = credential.map(str::trim).filter(|c| !c.is_empty());

        let Some(api_key) = credential else {
            info!("No API key provided; returning offline analysis");
            return AnalysisResult::offline(self.messages.offline.clone());
        };

        match self.adapter.generate_content(prompt, api_key).await {
            Ok(text) => AnalysisResult::model(text),
            Err(e) => {
                error!(model = %self.adapter.model(), "Erro ao gerar análise: {}", e);
                AnalysisResult::failure(self.messages.error.clone())
            }
        }
    }

    /// Returns `(html, plain_text)`.
    pub fn render(&self, result: &AnalysisResult) -> (String, String) {
        (
            self.renderer.to_html(&result.raw_text),
            self.renderer.to_plain_text(&result.raw_text),
        )
    }

    /// Full submission. The only error is a validation failure, raised
    /// before anything is sent.
    pub async fn analyze(&self, request: AnalysisRequest) -> AppResult<Analysis> {
        request.validate(&self.messages.validation)?;

        let chart = self.chart_for(&request.topic);
        let prompt = self.build_prompt(&request.topic, &request.question);
        let result = self
            .generate_analysis(&prompt, request.credential.as_deref())
            .await;
        let (html, plain_text) = self.render(&result);

        info!(topic = %request.topic, source = ?result.source, "Analysis ready");

        Ok(Analysis {
            request,
            result,
            chart,
            html,
            plain_text,
        })
    }
}
