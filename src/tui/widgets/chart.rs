//! Chart Widget
//!
//! The terminal cannot draw the chart image, so this panel names the asset
//! that belongs to the selected topic and whether it is present on disk.

use crate::tui::theme::{Icons, Theme};
use ratatui::{
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::path::Path;

pub fn render_chart(frame: &mut Frame, area: Rect, chart: &str) {
    let present = Path::new(chart).is_file();
    let status = if present {
        "disponível"
    } else {
        "arquivo não encontrado"
    };

    let lines = vec![
        Line::default(),
        Line::styled(Icons::CHART, Theme::brand()),
        Line::default(),
        Line::styled(chart.to_string(), Theme::text()),
        Line::styled(status, Theme::asset_status(present)),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Gráfico ")
                .borders(Borders::ALL)
                .border_style(Theme::frame(false)),
        );

    frame.render_widget(paragraph, area);
}
