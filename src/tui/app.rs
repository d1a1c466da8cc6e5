//! Application State
//!
//! The whole screen is one form. `App` owns every field the handlers touch,
//! so there is no global UI state.

use crate::analysis::{Analysis, RequestOrchestrator, Topic};
use crate::config::{Config, Messages};
use crate::output::{export_file_name, ClipboardSink, FileExporter, FsExporter, Osc52Clipboard};
use crate::tui::event::AppAction;
use crate::tui::ui;
use crate::types::{AnalysisRequest, AppResult};
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tui_textarea::TextArea;

/// How long the copy confirmation stays on screen.
pub const COPY_CONFIRMATION: Duration = Duration::from_millis(1500);

const QUESTION_PLACEHOLDER: &str = "Descreva o que deseja entender sobre o gráfico...";

const QUIT_WHILE_SUBMITTING: &str = "Aguarde a análise terminar para sair (Ctrl+C força a saída).";

/// Current view/screen
#[derive(Debug, Clone, PartialEq, Default)]
pub enum View {
    #[default]
    Form,
    Help,
}

/// Focusable form fields, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Topic,
    Question,
    ApiKey,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::Topic => Field::Question,
            Field::Question => Field::ApiKey,
            Field::ApiKey => Field::Topic,
        }
    }

    fn prev(self) -> Self {
        match self {
            Field::Topic => Field::ApiKey,
            Field::Question => Field::Topic,
            Field::ApiKey => Field::Question,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Transient message shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

/// Events from the background generation task
#[derive(Debug)]
pub enum AppEvent {
    AnalysisComplete(Box<Analysis>),
    AnalysisRejected(String),
}

/// Main application state
pub struct App {
    // UI State
    pub view: View,
    pub should_quit: bool,
    pub focus: Field,

    // Form
    pub topic_index: Option<usize>,
    pub question: TextArea<'static>,
    pub api_key: String,
    default_api_key: String,

    // Submission
    pub submitting: bool,
    pub submit_label: String,

    // Result
    pub result_visible: bool,
    pub response_text: String,
    pub response_html: String,
    pub analysis: Option<Analysis>,
    pub chart: String,
    pub scroll_offset: u16,
    pub max_scroll: u16,

    // Export
    pub copy_label: String,
    copied_at: Option<Instant>,
    pub notice: Option<Notice>,

    orchestrator: Arc<RequestOrchestrator>,
    clipboard: Box<dyn ClipboardSink>,
    exporter: Box<dyn FileExporter>,

    event_rx: mpsc::Receiver<AppEvent>,
    event_tx: mpsc::Sender<AppEvent>,
}

impl App {
    /// Create the application with the configured Gemini adapter, terminal
    /// clipboard and file exporter.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let orchestrator = RequestOrchestrator::from_config(config)?;
        Ok(Self::new(
            Arc::new(orchestrator),
            Box::new(Osc52Clipboard::stdout()),
            Box::new(FsExporter::new(config.paths.export_dir.clone())),
            config.llm.google_api_key.clone(),
        ))
    }

    pub fn new(
        orchestrator: Arc<RequestOrchestrator>,
        clipboard: Box<dyn ClipboardSink>,
        exporter: Box<dyn FileExporter>,
        default_api_key: String,
    ) -> Self {
        let (tx, rx) = mpsc::channel(16);
        let messages = orchestrator.messages().clone();

        let mut app = Self {
            view: View::Form,
            should_quit: false,
            focus: Field::Topic,
            topic_index: None,
            question: new_question_input(),
            api_key: String::new(),
            default_api_key,
            submitting: false,
            submit_label: messages.submit_label.clone(),
            result_visible: false,
            response_text: String::new(),
            response_html: String::new(),
            analysis: None,
            chart: String::new(),
            scroll_offset: 0,
            max_scroll: 0,
            copy_label: messages.copy_label,
            copied_at: None,
            notice: None,
            orchestrator,
            clipboard,
            exporter,
            event_rx: rx,
            event_tx: tx,
        };

        app.reset();
        app
    }

    pub fn messages(&self) -> &Messages {
        self.orchestrator.messages()
    }

    pub fn selected_topic(&self) -> Option<Topic> {
        self.topic_index.and_then(|i| Topic::ALL.get(i).copied())
    }

    pub fn question_text(&self) -> String {
        self.question.lines().join("\n")
    }

    /// Masked key for display; empty means offline mode.
    pub fn api_key_hint(&self) -> Option<String> {
        let key = self.api_key.trim();
        if key.is_empty() {
            return None;
        }
        let tail: String = key.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
        Some(format!("••••{}", tail))
    }

    /// Quitting is refused while a request is in flight.
    pub fn confirm_quit(&self) -> bool {
        !self.submitting
    }

    /// Poll for async events
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
        }
    }

    /// Wait for the in-flight submission to finish. Returns false if nothing
    /// was pending.
    #[cfg(test)]
    pub(crate) async fn wait_for_analysis(&mut self) -> bool {
        if !self.submitting {
            return false;
        }
        match self.event_rx.recv().await {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::AnalysisComplete(analysis) => {
                self.response_text = analysis.plain_text.clone();
                self.response_html = analysis.html.clone();
                self.chart = analysis.chart.clone();
                self.analysis = Some(*analysis);
                self.scroll_offset = 0;
            }
            AppEvent::AnalysisRejected(message) => {
                self.response_text.clear();
                self.result_visible = false;
                self.notice = Some(Notice::warning(message));
            }
        }
        self.set_submitting(false);
    }

    /// Handle a user action
    pub async fn handle_action(&mut self, action: AppAction) {
        if action == AppAction::ForceQuit {
            self.should_quit = true;
            return;
        }

        if self.view == View::Help && action != AppAction::Tick {
            // Any key closes help
            self.view = View::Form;
            return;
        }

        match action {
            AppAction::Quit | AppAction::ForceQuit => {
                if self.confirm_quit() {
                    self.should_quit = true;
                } else {
                    self.notice = Some(Notice::warning(QUIT_WHILE_SUBMITTING));
                }
            }
            AppAction::Submit => self.submit(),
            AppAction::Reset => {
                if !self.submitting {
                    self.reset();
                }
            }
            AppAction::Copy => self.copy_analysis(),
            AppAction::Save => self.save_analysis(),
            AppAction::ToggleHelp => {
                self.view = View::Help;
            }
            AppAction::Escape => {
                self.notice = None;
            }
            AppAction::ScrollUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
            }
            AppAction::ScrollDown => {
                if self.scroll_offset < self.max_scroll {
                    self.scroll_offset += 1;
                }
            }
            AppAction::ScrollPageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(10);
            }
            AppAction::ScrollPageDown => {
                self.scroll_offset = (self.scroll_offset + 10).min(self.max_scroll);
            }
            AppAction::NextField => {
                self.focus = self.focus.next();
            }
            AppAction::PrevField => {
                self.focus = self.focus.prev();
            }
            AppAction::Input(key) => self.handle_input(key),
            AppAction::Paste(text) => self.handle_paste(&text),
            AppAction::Tick => self.on_tick(Instant::now()),
        }
    }

    /// Route a key to the focused field. Inputs are disabled while submitting.
    fn handle_input(&mut self, key: KeyEvent) {
        if self.submitting {
            return;
        }

        // Unbound Ctrl/Alt chords must not leak letters into the single-line fields
        let chord = key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        match self.focus {
            Field::Topic if chord => {}
            Field::Topic => match key.code {
                KeyCode::Right | KeyCode::Char(' ') => self.cycle_topic(1),
                KeyCode::Left => self.cycle_topic(-1),
                KeyCode::Backspace | KeyCode::Delete => self.topic_index = None,
                _ => {}
            },
            Field::Question => {
                self.question.input(key);
            }
            Field::ApiKey if chord => {}
            Field::ApiKey => match key.code {
                KeyCode::Char(c) => self.api_key.push(c),
                KeyCode::Backspace => {
                    self.api_key.pop();
                }
                _ => {}
            },
        }
    }

    /// Pasted text is inserted as typed; its line breaks never submit.
    fn handle_paste(&mut self, text: &str) {
        if self.submitting {
            return;
        }

        match self.focus {
            Field::Topic => {}
            Field::Question => {
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.question.insert_str(text);
            }
            Field::ApiKey => self
                .api_key
                .extend(text.chars().filter(|c| !c.is_control())),
        }
    }

    fn cycle_topic(&mut self, step: isize) {
        let len = Topic::ALL.len() as isize;
        let next = match self.topic_index {
            None if step >= 0 => 0,
            None => len - 1,
            Some(i) => (i as isize + step).rem_euclid(len),
        };
        self.topic_index = Some(next as usize);
    }

    fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
        let messages = self.orchestrator.messages();
        self.submit_label = if submitting {
            messages.submitting_label.clone()
        } else {
            messages.submit_label.clone()
        };
    }

    /// Validate the form and start generation in the background. At most one
    /// submission is in flight.
    fn submit(&mut self) {
        if self.submitting {
            return;
        }

        let topic = self.selected_topic().map(|t| t.id()).unwrap_or_default();
        let request = AnalysisRequest::new(topic, self.question_text(), Some(self.api_key.clone()));

        if let Err(e) = request.validate(&self.messages().validation) {
            self.notice = Some(Notice::warning(e.to_string()));
            return;
        }

        self.notice = None;
        self.chart = self.orchestrator.chart_for(&request.topic);
        self.result_visible = true;
        self.analysis = None;
        self.response_html.clear();
        self.response_text = self.messages().loading.clone();
        self.scroll_offset = 0;
        self.set_submitting(true);

        info!(topic = %request.topic, offline = request.credential.is_none(), "Submitting analysis request");

        let orchestrator = Arc::clone(&self.orchestrator);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let event = match orchestrator.analyze(request).await {
                Ok(analysis) => AppEvent::AnalysisComplete(Box::new(analysis)),
                Err(e) => AppEvent::AnalysisRejected(e.to_string()),
            };
            tx.send(event).await.ok();
        });
    }

    /// Clear the form and return to the initial screen.
    pub fn reset(&mut self) {
        self.topic_index = None;
        self.question = new_question_input();
        self.api_key = self.default_api_key.clone();
        self.result_visible = false;
        self.response_text.clear();
        self.response_html.clear();
        self.analysis = None;
        self.chart = self.orchestrator.assets().placeholder();
        self.scroll_offset = 0;
        self.max_scroll = 0;
        self.notice = None;
        self.focus = Field::Topic;
    }

    fn exportable_text(&self) -> Option<String> {
        self.analysis
            .as_ref()
            .map(|a| a.plain_text.clone())
            .filter(|text| !text.trim().is_empty())
    }

    fn copy_analysis(&mut self) {
        let Some(text) = self.exportable_text() else {
            self.notice = Some(Notice::warning(self.messages().nothing_to_copy.clone()));
            return;
        };

        match self.clipboard.write_text(&text) {
            Ok(()) => {
                self.copy_label = self.messages().copied_label.clone();
                self.copied_at = Some(Instant::now());
            }
            Err(e) => {
                warn!("Clipboard write failed: {}", e);
                self.notice = Some(Notice::error(e.to_string()));
            }
        }
    }

    fn save_analysis(&mut self) {
        let Some(text) = self.exportable_text() else {
            self.notice = Some(Notice::warning(self.messages().nothing_to_save.clone()));
            return;
        };

        let topic = self.selected_topic().map(|t| t.id()).unwrap_or_default();
        let file_name = export_file_name(topic, Utc::now().date_naive());

        match self.exporter.export(&file_name, &text) {
            Ok(path) => {
                self.notice = Some(Notice::info(format!("Análise salva em {}", path.display())));
            }
            Err(e) => {
                warn!("Export failed: {}", e);
                self.notice = Some(Notice::error(e.to_string()));
            }
        }
    }

    /// Restore the copy label once the confirmation has been shown long enough.
    pub fn on_tick(&mut self, now: Instant) {
        if let Some(at) = self.copied_at {
            if now.duration_since(at) >= COPY_CONFIRMATION {
                self.copied_at = None;
                self.copy_label = self.messages().copy_label.clone();
            }
        }
    }

    /// Update max scroll from the wrapped height of the response text.
    pub fn update_scroll_bounds(&mut self, width: u16, viewport_height: u16) {
        let content_height = ui::wrapped_height(&self.response_text, width);
        let content_height = u16::try_from(content_height).unwrap_or(u16::MAX);

        self.max_scroll = content_height.saturating_sub(viewport_height);
        if self.scroll_offset > self.max_scroll {
            self.scroll_offset = self.max_scroll;
        }
    }
}

fn new_question_input() -> TextArea<'static> {
    let mut input = TextArea::default();
    input.set_cursor_line_style(ratatui::style::Style::default());
    input.set_placeholder_text(QUESTION_PLACEHOLDER);
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::orchestrator::tests::{orchestrator_with, MockAdapter};
    use crate::config::{COPIED_LABEL, COPY_LABEL, OFFLINE_MESSAGE, SUBMITTING_LABEL, SUBMIT_LABEL};
    use crate::types::{AppError, AppResult};
    use ratatui::{backend::TestBackend, style::Style, Terminal};
    use std::path::PathBuf;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct RecordingClipboard {
        writes: Arc<Mutex<Vec<String>>>,
    }

    impl ClipboardSink for RecordingClipboard {
        fn write_text(&mut self, text: &str) -> AppResult<()> {
            self.writes.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct RecordingExporter {
        files: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl FileExporter for RecordingExporter {
        fn export(&self, file_name: &str, contents: &str) -> AppResult<PathBuf> {
            self.files
                .lock()
                .unwrap()
                .push((file_name.to_string(), contents.to_string()));
            Ok(PathBuf::from(file_name))
        }
    }

    struct FailingExporter;

    impl FileExporter for FailingExporter {
        fn export(&self, _file_name: &str, _contents: &str) -> AppResult<PathBuf> {
            Err(AppError::Export("disk full".to_string()))
        }
    }

    struct Harness {
        app: App,
        adapter: Arc<MockAdapter>,
        clipboard: RecordingClipboard,
        exporter: RecordingExporter,
    }

    fn harness(reply: &str, api_key: &str) -> Harness {
        let adapter = MockAdapter::replying(reply);
        let clipboard = RecordingClipboard::default();
        let exporter = RecordingExporter::default();
        let app = App::new(
            Arc::new(orchestrator_with(adapter.clone())),
            Box::new(clipboard.clone()),
            Box::new(exporter.clone()),
            api_key.to_string(),
        );
        Harness { app, adapter, clipboard, exporter }
    }

    fn select_topic(app: &mut App, topic: Topic) {
        app.topic_index = Topic::ALL.iter().position(|t| *t == topic);
    }

    fn type_question(app: &mut App, text: &str) {
        app.question.insert_str(text);
    }

    #[tokio::test]
    async fn test_initial_state_is_reset() {
        let h = harness("unused", "");
        assert!(!h.app.result_visible);
        assert!(h.app.topic_index.is_none());
        assert_eq!(h.app.chart, "./assets/placeholder.png");
        assert_eq!(h.app.submit_label, SUBMIT_LABEL);
        assert_eq!(h.app.copy_label, COPY_LABEL);
    }

    #[tokio::test]
    async fn test_submit_without_question_is_rejected() {
        let mut h = harness("unused", "key");
        select_topic(&mut h.app, Topic::Foco);

        h.app.handle_action(AppAction::Submit).await;

        assert!(!h.app.submitting);
        assert!(!h.app.result_visible);
        assert_eq!(
            h.app.notice,
            Some(Notice::warning("Preencha o tema e a pergunta/descrição."))
        );
        assert_eq!(h.adapter.call_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_without_topic_is_rejected() {
        let mut h = harness("unused", "key");
        type_question(&mut h.app, "Por que?");

        h.app.handle_action(AppAction::Submit).await;

        assert!(h.app.notice.is_some());
        assert!(!h.app.wait_for_analysis().await);
        assert_eq!(h.adapter.call_count(), 0);
    }

    #[tokio::test]
    async fn test_offline_submission() {
        let mut h = harness("unused", "");
        select_topic(&mut h.app, Topic::Foco);
        type_question(&mut h.app, "Por que o foco caiu?");

        h.app.handle_action(AppAction::Submit).await;
        assert!(h.app.submitting);
        assert_eq!(h.app.submit_label, SUBMITTING_LABEL);
        assert_eq!(h.app.response_text, "Gerando análise...");
        assert_eq!(h.app.chart, "./assets/grafico_foco.png");

        assert!(h.app.wait_for_analysis().await);

        assert!(!h.app.submitting);
        assert_eq!(h.app.submit_label, SUBMIT_LABEL);
        let analysis = h.app.analysis.as_ref().unwrap();
        assert_eq!(analysis.result.raw_text, OFFLINE_MESSAGE);
        assert_eq!(h.adapter.call_count(), 0);
    }

    #[tokio::test]
    async fn test_online_submission_renders_html() {
        let mut h = harness("Análise X", "secret-key");
        select_topic(&mut h.app, Topic::Grupo);
        type_question(&mut h.app, "Como foi o grupo?");

        h.app.handle_action(AppAction::Submit).await;
        assert!(h.app.wait_for_analysis().await);

        assert_eq!(h.app.response_html, "<p>Análise X</p>\n");
        assert_eq!(h.app.response_text, "Análise X");
        assert_eq!(h.app.chart, "./assets/grafico_grupo.png");
        assert_eq!(h.adapter.call_count(), 1);
    }

    #[tokio::test]
    async fn test_second_submit_ignored_while_pending() {
        let mut h = harness("ok", "key");
        select_topic(&mut h.app, Topic::Metas);
        type_question(&mut h.app, "Q");

        h.app.handle_action(AppAction::Submit).await;
        h.app.handle_action(AppAction::Submit).await;
        h.app.handle_action(AppAction::Reset).await;
        assert!(h.app.submitting);
        assert!(h.app.result_visible);

        assert!(h.app.wait_for_analysis().await);
        assert_eq!(h.adapter.call_count(), 1);
    }

    #[tokio::test]
    async fn test_inputs_disabled_while_submitting() {
        let mut h = harness("ok", "key");
        select_topic(&mut h.app, Topic::Metas);
        type_question(&mut h.app, "Q");
        h.app.focus = Field::ApiKey;

        h.app.handle_action(AppAction::Submit).await;
        let typed = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        h.app.handle_action(AppAction::Input(typed)).await;
        assert_eq!(h.app.api_key, "key");

        h.app.wait_for_analysis().await;
        h.app.handle_action(AppAction::Input(typed)).await;
        assert_eq!(h.app.api_key, "keyx");
    }

    #[tokio::test]
    async fn test_export_guards_when_nothing_generated() {
        let mut h = harness("unused", "");

        h.app.handle_action(AppAction::Save).await;
        assert_eq!(
            h.app.notice,
            Some(Notice::warning("Nenhuma análise disponível para salvar."))
        );

        h.app.handle_action(AppAction::Copy).await;
        assert_eq!(
            h.app.notice,
            Some(Notice::warning("Nenhuma análise disponível para copiar."))
        );

        assert!(h.exporter.files.lock().unwrap().is_empty());
        assert!(h.clipboard.writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_copy_and_save_after_analysis() {
        let mut h = harness("**Resumo:** tudo certo", "key");
        select_topic(&mut h.app, Topic::Habitos);
        type_question(&mut h.app, "Q");
        h.app.handle_action(AppAction::Submit).await;
        h.app.wait_for_analysis().await;

        h.app.handle_action(AppAction::Copy).await;
        assert_eq!(h.clipboard.writes.lock().unwrap().as_slice(), ["Resumo: tudo certo"]);
        assert_eq!(h.app.copy_label, COPIED_LABEL);

        h.app.on_tick(Instant::now() + COPY_CONFIRMATION);
        assert_eq!(h.app.copy_label, COPY_LABEL);

        h.app.handle_action(AppAction::Save).await;
        let files = h.exporter.files.lock().unwrap();
        assert_eq!(files.len(), 1);
        let (name, contents) = &files[0];
        assert!(name.starts_with("prisma_habitos_"));
        assert!(name.ends_with(".txt"));
        assert_eq!(contents, "Resumo: tudo certo");
    }

    #[tokio::test]
    async fn test_save_failure_shows_notice() {
        let adapter = MockAdapter::replying("texto");
        let mut app = App::new(
            Arc::new(orchestrator_with(adapter)),
            Box::new(RecordingClipboard::default()),
            Box::new(FailingExporter),
            "key".to_string(),
        );
        select_topic(&mut app, Topic::Rotina);
        type_question(&mut app, "Q");
        app.handle_action(AppAction::Submit).await;
        app.wait_for_analysis().await;

        app.handle_action(AppAction::Save).await;

        let notice = app.notice.unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.message.contains("disk full"));
    }

    #[tokio::test]
    async fn test_reset_clears_form() {
        let mut h = harness("ok", "env-key");
        select_topic(&mut h.app, Topic::Foco);
        type_question(&mut h.app, "Q");
        h.app.api_key = "typed".to_string();
        h.app.handle_action(AppAction::Submit).await;
        h.app.wait_for_analysis().await;

        h.app.handle_action(AppAction::Reset).await;

        assert!(h.app.topic_index.is_none());
        assert!(h.app.question_text().is_empty());
        assert_eq!(h.app.api_key, "env-key");
        assert!(!h.app.result_visible);
        assert!(h.app.analysis.is_none());
        assert!(h.app.response_text.is_empty());
        assert_eq!(h.app.chart, "./assets/placeholder.png");
    }

    #[tokio::test]
    async fn test_topic_cycling() {
        let mut h = harness("ok", "");
        let right = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        let left = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);

        h.app.handle_action(AppAction::Input(right)).await;
        assert_eq!(h.app.selected_topic(), Some(Topic::Rotina));

        h.app.handle_action(AppAction::Input(left)).await;
        assert_eq!(h.app.selected_topic(), Some(Topic::Criatividade));
    }

    #[tokio::test]
    async fn test_api_key_hint_masks_key() {
        let mut h = harness("ok", "");
        assert_eq!(h.app.api_key_hint(), None);
        h.app.api_key = "abcdef1234".to_string();
        assert_eq!(h.app.api_key_hint().as_deref(), Some("••••1234"));
    }

    #[tokio::test]
    async fn test_scroll_bounds() {
        let mut h = harness("ok", "");
        h.app.response_text = "a\nb\nc\n".repeat(10);
        h.app.update_scroll_bounds(80, 10);
        assert_eq!(h.app.max_scroll, 20);
        h.app.scroll_offset = 50;
        h.app.update_scroll_bounds(80, 40);
        assert_eq!(h.app.scroll_offset, 0);
    }

    #[tokio::test]
    async fn test_last_wrapped_line_visible_at_max_scroll() {
        let mut h = harness("ok", "");
        h.app.response_text = "aaaaa bbbbb ccccc\naaaaa bbbbb ccccc\naaaaa bbbbb FINAL".to_string();

        h.app.update_scroll_bounds(10, 3);
        assert_eq!(h.app.max_scroll, 6);
        h.app.handle_action(AppAction::ScrollPageDown).await;
        assert_eq!(h.app.scroll_offset, 6);

        let mut terminal = Terminal::new(TestBackend::new(10, 3)).unwrap();
        terminal
            .draw(|frame| {
                let body = ui::response_body(&h.app.response_text, Style::default())
                    .scroll((h.app.scroll_offset, 0));
                frame.render_widget(body, frame.area());
            })
            .unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("FINAL"), "screen was {:?}", screen);
    }

    #[tokio::test]
    async fn test_unbound_chords_do_not_type_into_api_key() {
        let mut h = harness("ok", "");
        h.app.focus = Field::ApiKey;

        for modifiers in [KeyModifiers::CONTROL, KeyModifiers::ALT] {
            let chord = KeyEvent::new(KeyCode::Char('a'), modifiers);
            h.app.handle_action(AppAction::Input(chord)).await;
        }
        let typed = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE);
        h.app.handle_action(AppAction::Input(typed)).await;

        assert_eq!(h.app.api_key, "k");
    }

    #[tokio::test]
    async fn test_pasted_key_with_newline_does_not_submit() {
        let mut h = harness("ok", "");
        select_topic(&mut h.app, Topic::Foco);
        type_question(&mut h.app, "Q");
        h.app.focus = Field::ApiKey;

        h.app.handle_action(AppAction::Paste("AIza-123\r\n".to_string())).await;

        assert_eq!(h.app.api_key, "AIza-123");
        assert!(!h.app.submitting);
        assert_eq!(h.adapter.call_count(), 0);
    }

    #[tokio::test]
    async fn test_paste_into_question_keeps_lines() {
        let mut h = harness("ok", "");
        h.app.focus = Field::Question;

        h.app.handle_action(AppAction::Paste("linha um\nlinha dois".to_string())).await;

        assert_eq!(h.app.question_text(), "linha um\nlinha dois");
        assert!(!h.app.submitting);
    }

    #[tokio::test]
    async fn test_quit_refused_while_submitting() {
        let mut h = harness("ok", "key");
        select_topic(&mut h.app, Topic::Foco);
        type_question(&mut h.app, "Q");
        h.app.handle_action(AppAction::Submit).await;

        h.app.handle_action(AppAction::Quit).await;
        assert!(!h.app.confirm_quit());
        assert!(!h.app.should_quit);
        assert_eq!(h.app.notice.as_ref().map(|n| n.level), Some(NoticeLevel::Warning));

        h.app.wait_for_analysis().await;
        h.app.handle_action(AppAction::Quit).await;
        assert!(h.app.should_quit);
    }

    #[tokio::test]
    async fn test_force_quit_while_submitting() {
        let mut h = harness("ok", "key");
        select_topic(&mut h.app, Topic::Foco);
        type_question(&mut h.app, "Q");
        h.app.handle_action(AppAction::Submit).await;
        h.app.view = View::Help;

        h.app.handle_action(AppAction::ForceQuit).await;
        assert!(h.app.should_quit);
    }
}
