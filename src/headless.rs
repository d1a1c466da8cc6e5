//! One-shot mode: analyse a single question and print the result.

use std::io::Write;

use chrono::Utc;
use tracing::info;

use crate::analysis::{Analysis, RequestOrchestrator};
use crate::output::{export_file_name, FileExporter};
use crate::types::{AnalysisRequest, AppResult};

#[derive(Debug, Clone, Default)]
pub struct HeadlessOptions {
    /// Print the HTML rendering instead of plain text.
    pub html: bool,
    /// Also save the plain text through the exporter.
    pub save: bool,
}

/// Run one analysis, writing the rendered text to `out`. Validation failures
/// are returned before any request is made.
pub async fn run_once<W: Write>(
    orchestrator: &RequestOrchestrator,
    exporter: &dyn FileExporter,
    request: AnalysisRequest,
    options: &HeadlessOptions,
    out: &mut W,
) -> AppResult<Analysis> {
    let analysis = orchestrator.analyze(request).await?;

    let body = if options.html {
        &analysis.html
    } else {
        &analysis.plain_text
    };
    writeln!(out, "{}", body.trim_end())?;

    info!(chart = %analysis.chart, "Chart for this topic");

    if options.save {
        let file_name = export_file_name(&analysis.request.topic, Utc::now().date_naive());
        let path = exporter.export(&file_name, &analysis.plain_text)?;
        info!("Saved to {}", path.display());
    }

    Ok(analysis)
}
