//! The single Prisma Analytics screen, built with Ratatui.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │ ◆ Prisma Analytics Interpretação de gráficos      ● online    │
//! └───────────────────────────────────────────────────────────────┘
//! ┌ Nova análise ─────────────────────────────────────────────────┐
//! │ Tema     ◀ Foco e concentração (foco) ▶  3/10                 │
//! │ ┌ Pergunta ─────────────────────────────────────────────────┐ │
//! │ │ Por que o foco caiu?                                      │ │
//! │ └───────────────────────────────────────────────────────────┘ │
//! │ API Key  ••••1234                                             │
//! │           Gerar Análise   [Enter]                             │
//! └───────────────────────────────────────────────────────────────┘
//! ┌ Gráfico ─────────┐┌ Análise  [Ctrl+Y] Copiar texto ──────────┐
//! │ ./assets/...     ││ rendered analysis text                   │
//! └──────────────────┘└──────────────────────────────────────────┘
//! Pronto │ [Tab] Campo [Ctrl+R] Limpar [Ctrl+Q] Sair [F1] Ajuda
//! ```

pub mod app;
pub mod event;
pub mod theme;
pub mod ui;
pub mod widgets;

pub use app::{App, AppEvent, Field, Notice, NoticeLevel, View};
pub use event::{AppAction, EventHandler};

use crate::config::Config;
use crossterm::{
    cursor::Show,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{stdout, Stdout};
use std::time::Duration;
use tracing::{error, info};

/// Also bounds how long a finished analysis waits before it is drawn.
const TICK_RATE: Duration = Duration::from_millis(100);

pub type Screen = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode on the alternate screen, with bracketed paste.
pub fn enter_screen() -> anyhow::Result<Screen> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableBracketedPaste)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout()))?)
}

/// Undo [`enter_screen`]. Harmless if called twice.
pub fn leave_screen() -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen, Show)?;
    Ok(())
}

/// A panic message printed into the alternate screen is lost, so restore
/// the terminal before the default hook runs.
fn restore_on_panic() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        leave_screen().ok();
        default_hook(info);
    }));
}

pub async fn run(config: Config) -> anyhow::Result<()> {
    let mut app = App::from_config(&config)?;
    info!(
        model = %config.llm.model,
        offline = config.llm.google_api_key.trim().is_empty(),
        "Opening analysis screen"
    );

    restore_on_panic();
    let mut screen = enter_screen()?;
    let mut events = EventHandler::new(TICK_RATE);

    let outcome = event_loop(&mut screen, &mut app, &mut events).await;

    if let Err(e) = leave_screen() {
        error!("Could not restore terminal: {}", e);
    }
    outcome
}

async fn event_loop(
    screen: &mut Screen,
    app: &mut App,
    events: &mut EventHandler,
) -> anyhow::Result<()> {
    while !app.should_quit {
        app.poll_events();

        let mut area = Rect::default();
        screen.draw(|frame| {
            area = frame.area();
            ui::render(frame, app);
        })?;
        let (width, height) = ui::response_viewport(area);
        app.update_scroll_bounds(width, height);

        match events.next().await {
            Some(action) => app.handle_action(action).await,
            None => break,
        }
    }

    info!("Analysis screen closed");
    Ok(())
}
