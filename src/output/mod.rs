// Output capabilities: rendering, clipboard and file export

pub mod clipboard;
pub mod file;
pub mod markdown;

pub use clipboard::{ClipboardSink, Osc52Clipboard};
pub use file::{export_file_name, FileExporter, FsExporter};
pub use markdown::{CommonMarkRenderer, MarkdownRenderer};
