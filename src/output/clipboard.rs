use crate::types::{AppError, AppResult};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::io::Write;

pub trait ClipboardSink: Send {
    fn write_text(&mut self, text: &str) -> AppResult<()>;
}

/// Sets the system clipboard through the terminal using the OSC 52 escape
/// sequence. Works over SSH and inside tmux (with `set-clipboard on`).
pub struct Osc52Clipboard<W: Write + Send> {
    out: W,
}

impl Osc52Clipboard<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self {
            out: std::io::stdout(),
        }
    }
}

impl<W: Write + Send> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn sequence(text: &str) -> String {
        format!("\x1b]52;c;{}\x07", BASE64.encode(text.as_bytes()))
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> ClipboardSink for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> AppResult<()> {
        self.out
            .write_all(Self::sequence(text).as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|e| AppError::Clipboard(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_encodes_text() {
        assert_eq!(Osc52Clipboard::<Vec<u8>>::sequence("oi"), "\x1b]52;c;b2k=\x07");
    }

    #[test]
    fn test_writes_to_terminal() {
        let mut clipboard = Osc52Clipboard::new(Vec::new());
        clipboard.write_text("Análise").unwrap();
        let written = String::from_utf8(clipboard.into_inner()).unwrap();
        assert!(written.starts_with("\x1b]52;c;"));
        assert!(written.ends_with('\x07'));
        assert!(written.contains(&BASE64.encode("Análise")));
    }
}
