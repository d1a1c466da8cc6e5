// Chart interpretation: topics, prompt template and request orchestration

pub mod orchestrator;
pub mod prompt;
pub mod topics;

pub use orchestrator::{Analysis, RequestOrchestrator};
pub use prompt::build_prompt;
pub use topics::{AssetCatalog, Topic};
