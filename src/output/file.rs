use crate::types::{AppError, AppResult};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

/// Topic placeholder used in file names when no topic is selected.
pub const FALLBACK_TOPIC: &str = "analise";

pub trait FileExporter: Send {
    /// Write `contents` to `file_name` and return where it landed.
    fn export(&self, file_name: &str, contents: &str) -> AppResult<PathBuf>;
}

/// `prisma_<topic>_<YYYY-MM-DD>.txt`
pub fn export_file_name(topic: &str, date: NaiveDate) -> String {
    let topic = topic.trim();
    let topic = if topic.is_empty() { FALLBACK_TOPIC } else { topic };
    format!("prisma_{}_{}.txt", topic, date.format("%Y-%m-%d"))
}

/// Writes exports as UTF-8 text files into a single directory.
#[derive(Debug, Clone)]
pub struct FsExporter {
    dir: PathBuf,
}

impl FsExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileExporter for FsExporter {
    fn export(&self, file_name: &str, contents: &str) -> AppResult<PathBuf> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| AppError::Export(format!("{}: {}", self.dir.display(), e)))?;

        let path = self.dir.join(file_name);
        std::fs::write(&path, contents)
            .map_err(|e| AppError::Export(format!("{}: {}", path.display(), e)))?;

        info!("Analysis exported to {}", path.display());
        Ok(path)
    }
}
