//! Keyboard and timer input, translated into [`AppAction`]s.

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Leave the screen; refused while a request is in flight
    Quit,
    /// Leave unconditionally (Ctrl+C)
    ForceQuit,
    Submit,
    /// Clear the form and hide the result
    Reset,
    Copy,
    Save,
    ToggleHelp,
    /// Dismiss the current notice
    Escape,
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    NextField,
    PrevField,
    /// Any other key, routed to the focused field
    Input(KeyEvent),
    /// Bracketed paste, delivered whole so embedded newlines do not submit
    Paste(String),
    /// Periodic wake-up; also sent on resize so the screen redraws
    Tick,
}

/// Merges terminal input and a fixed-rate tick into one channel.
pub struct EventHandler {
    rx: mpsc::Receiver<AppAction>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel(64);
        tokio::spawn(pump(tx, tick_rate));
        Self { rx }
    }

    /// Next action. Ticks keep arriving, so this waits at most one tick.
    pub async fn next(&mut self) -> Option<AppAction> {
        self.rx.recv().await
    }
}

/// Runs until the receiver is dropped or the terminal stream ends.
async fn pump(tx: mpsc::Sender<AppAction>, tick_rate: Duration) {
    let mut input = EventStream::new();
    let mut ticks = tokio::time::interval(tick_rate);

    loop {
        let action = tokio::select! {
            _ = ticks.tick() => Some(AppAction::Tick),
            event = input.next() => match event {
                Some(Ok(event)) => map_event(event),
                Some(Err(e)) => {
                    warn!("Terminal input error: {}", e);
                    None
                }
                None => break,
            },
        };

        if let Some(action) = action {
            if tx.send(action).await.is_err() {
                break;
            }
        }
    }
}

fn map_event(event: Event) -> Option<AppAction> {
    match event {
        // Release and repeat events would double every keystroke
        Event::Key(key) if key.kind == KeyEventKind::Press => map_key_event(key),
        Event::Paste(text) => Some(AppAction::Paste(text)),
        Event::Resize(_, _) => Some(AppAction::Tick),
        _ => None,
    }
}

pub fn map_key_event(key: KeyEvent) -> Option<AppAction> {
    let action = if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => AppAction::ForceQuit,
            KeyCode::Char('q') => AppAction::Quit,
            KeyCode::Char('r') => AppAction::Reset,
            KeyCode::Char('y') => AppAction::Copy,
            KeyCode::Char('s') => AppAction::Save,
            _ => AppAction::Input(key),
        }
    } else {
        match key.code {
            KeyCode::Enter => AppAction::Submit,
            KeyCode::Esc => AppAction::Escape,
            KeyCode::F(1) => AppAction::ToggleHelp,
            KeyCode::Tab => AppAction::NextField,
            KeyCode::BackTab => AppAction::PrevField,
            KeyCode::Up => AppAction::ScrollUp,
            KeyCode::Down => AppAction::ScrollDown,
            KeyCode::PageUp => AppAction::ScrollPageUp,
            KeyCode::PageDown => AppAction::ScrollPageDown,
            _ => AppAction::Input(key),
        }
    };
    Some(action)
}
