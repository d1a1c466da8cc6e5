//! Screen composition: header, form, result panels, status bar and the help
//! overlay.

use crate::tui::app::{App, View};
use crate::tui::theme::{Icons, Theme};
use crate::tui::widgets;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const SHORTCUTS: [(&str, &str); 4] = [
    ("[Tab]", "Campo"),
    ("[Ctrl+R]", "Limpar"),
    ("[Ctrl+Q]", "Sair"),
    ("[F1]", "Ajuda"),
];

const HELP_ENTRIES: [(&str, &str); 9] = [
    ("Tab/Shift+Tab", "Alternar entre campos"),
    ("←/→", "Escolher tema (campo Tema)"),
    ("Enter", "Gerar análise"),
    ("Ctrl+Y", "Copiar texto da análise"),
    ("Ctrl+S", "Salvar análise em .txt"),
    ("Ctrl+R", "Limpar formulário"),
    ("↑/↓ PgUp/PgDn", "Rolar análise"),
    ("Esc", "Dispensar aviso"),
    ("Ctrl+Q", "Sair"),
];

/// Header, form, result and status rows.
fn screen_areas(area: Rect) -> [Rect; 4] {
    Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(10),
        Constraint::Min(8),
        Constraint::Length(1),
    ])
    .areas(area)
}

/// Chart and response columns inside the result row.
fn result_areas(area: Rect) -> [Rect; 2] {
    Layout::horizontal([Constraint::Percentage(30), Constraint::Percentage(70)]).areas(area)
}

/// Inner width and height of the response panel for a given screen size.
pub fn response_viewport(area: Rect) -> (u16, u16) {
    let [_, _, result, _] = screen_areas(area);
    let [_, response] = result_areas(result);
    (response.width.saturating_sub(2), response.height.saturating_sub(2))
}

/// Response text as drawn, before the block and scroll are applied.
pub fn response_body(text: &str, style: Style) -> Paragraph<'static> {
    let lines: Vec<Line<'static>> = text
        .lines()
        .map(|line| Line::styled(line.to_string(), style))
        .collect();
    Paragraph::new(lines).wrap(Wrap { trim: false })
}

/// Rows `text` occupies once word-wrapped to `width`, exactly as drawn.
pub fn wrapped_height(text: &str, width: u16) -> usize {
    response_body(text, Style::default()).line_count(width.max(1))
}

pub fn render(frame: &mut Frame, app: &App) {
    let [header, form, result, status] = screen_areas(frame.area());

    render_header(frame, header, app);
    widgets::render_form(frame, form, app);

    if app.result_visible {
        let [chart, response] = result_areas(result);
        widgets::render_chart(frame, chart, &app.chart);
        render_response(frame, response, app);
    } else {
        render_idle_result(frame, result, app);
    }

    render_status_bar(frame, status, app);

    if app.view == View::Help {
        render_help(frame);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let online = app.api_key_hint().is_some();
    let (icon, mode) = if online {
        (Icons::ONLINE, "online")
    } else {
        (Icons::OFFLINE, "offline")
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(format!("{} Prisma Analytics", Icons::PRISM), Theme::brand()),
        Span::styled(" Interpretação de gráficos educacionais  ", Theme::muted()),
        Span::styled(format!("{} {}", icon, mode), Theme::mode(online)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(Theme::frame(false)));

    frame.render_widget(header, area);
}

/// Shown after reset: the placeholder asset and a hint.
fn render_idle_result(frame: &mut Frame, area: Rect, app: &App) {
    let hint = Paragraph::new(vec![
        Line::default(),
        Line::styled("Escolha um tema, escreva sua pergunta e gere a análise.", Theme::faint()),
        Line::styled(app.chart.clone(), Theme::faint()),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(" Análise ")
            .borders(Borders::ALL)
            .border_style(Theme::frame(false)),
    );

    frame.render_widget(hint, area);
}

fn render_response(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!(" Análise  [Ctrl+Y] {}  [Ctrl+S] Salvar ", app.copy_label);
    let response = response_body(&app.response_text, Theme::response(app.submitting))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Theme::frame(true)),
        )
        .scroll((app.scroll_offset, 0));

    frame.render_widget(response, area);
}

/// Notice if any, otherwise loading or ready, followed by the shortcuts.
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let status = match &app.notice {
        Some(notice) => Span::styled(notice.message.clone(), Theme::notice(notice.level)),
        None if app.submitting => Span::styled(app.messages().loading.clone(), Theme::busy()),
        None => Span::styled("Pronto", Theme::muted()),
    };

    let mut spans = vec![status, Span::raw(" │")];
    for (key, desc) in SHORTCUTS {
        spans.push(Span::styled(format!(" {}", key), Theme::key_hint()));
        spans.push(Span::styled(format!(" {}", desc), Theme::muted()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let key_width = HELP_ENTRIES
        .iter()
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = vec![Line::styled("Atalhos", Theme::heading()), Line::default()];
    lines.extend(HELP_ENTRIES.iter().map(|(key, desc)| {
        Line::from(vec![
            Span::styled(format!("{:<key_width$}  ", key), Theme::key_hint()),
            Span::styled(*desc, Theme::text()),
        ])
    }));
    lines.push(Line::default());
    lines.push(Line::styled("Sem API Key a análise roda em modo offline.", Theme::muted()));
    lines.push(Line::styled("Pressione qualquer tecla para fechar", Theme::faint()));

    let help = Paragraph::new(lines).block(
        Block::default()
            .title(" Ajuda ")
            .borders(Borders::ALL)
            .border_style(Theme::frame(true)),
    );

    frame.render_widget(help, area);
}

/// Rectangle of the given percentages centred in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);

    center
}
