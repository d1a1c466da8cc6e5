//! Form Widget
//!
//! Topic selector, question input, API key field and submit button.

use crate::analysis::Topic;
use crate::tui::app::{App, Field};
use crate::tui::theme::{Icons, Theme};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Width of the label column, so values line up.
const LABEL_WIDTH: usize = 9;

/// Render the form
pub fn render_form(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Nova análise ")
        .borders(Borders::ALL)
        .border_style(Theme::frame(false));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [topic, question, api_key, submit] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

    render_topic(frame, topic, app);
    render_question(frame, question, app);
    render_api_key(frame, api_key, app);
    render_submit(frame, submit, app);
}

fn field_label(name: &str, focused: bool) -> Span<'static> {
    Span::styled(format!("{:<LABEL_WIDTH$}", name), Theme::field_label(focused))
}

fn render_topic(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Field::Topic;

    let mut spans = vec![
        field_label("Tema", focused),
        Span::styled(format!("{} ", Icons::LEFT), Theme::faint()),
    ];
    match (app.selected_topic(), app.topic_index) {
        (Some(topic), Some(index)) => {
            spans.push(Span::styled(
                format!("{} ({})", topic.label(), topic.id()),
                Theme::field_value(focused),
            ));
            spans.push(Span::styled(format!(" {}", Icons::RIGHT), Theme::faint()));
            spans.push(Span::styled(
                format!("  {}/{}", index + 1, Topic::ALL.len()),
                Theme::faint(),
            ));
        }
        _ => {
            spans.push(Span::styled("Selecione um tema", Theme::faint()));
            spans.push(Span::styled(format!(" {}", Icons::RIGHT), Theme::faint()));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_question(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Pergunta ")
        .borders(Borders::ALL)
        .border_style(Theme::frame(app.focus == Field::Question));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(&app.question, inner);
}

fn render_api_key(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Field::ApiKey;
    let value = match app.api_key_hint() {
        Some(hint) => Span::styled(hint, Theme::text()),
        None => Span::styled("(vazio: modo offline)", Theme::faint()),
    };

    let mut spans = vec![field_label("API Key", focused), value];
    if focused && !app.submitting {
        spans.push(Span::styled(Icons::CURSOR, Theme::busy()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_submit(frame: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::raw(" ".repeat(LABEL_WIDTH)),
        Span::styled(
            format!(" {} ", app.submit_label),
            Theme::submit_button(app.submitting),
        ),
        Span::styled("  [Enter]", Theme::key_hint()),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}
