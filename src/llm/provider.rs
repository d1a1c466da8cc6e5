use async_trait::async_trait;
use crate::types::AppResult;

/// A remote text-generation endpoint.
///
/// Implementations return the text of the first candidate, or an error for
/// any transport, status or shape problem. Callers decide how failures are
/// presented.
#[async_trait]
pub trait LLMAdapter: Send + Sync {
    async fn generate_content(&self, prompt: &str, api_key: &str) -> AppResult<String>;

    /// Model identifier, used for logging.
    fn model(&self) -> &str;
}
