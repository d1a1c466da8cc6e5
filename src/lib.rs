// Prisma Analytics - AI interpretation of educational-analytics charts

pub mod analysis;  // Topics, prompt template, request orchestration
pub mod config;
pub mod headless;
pub mod llm;
pub mod output;    // Markdown rendering, clipboard, file export
pub mod tui;       // Terminal User Interface
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use analysis::{Analysis, RequestOrchestrator, Topic};
pub use config::Config;
pub use types::{AnalysisRequest, AnalysisResult, AppError, AppResult};
