//! Colours and styles for the Prisma screen.
//!
//! Styles are keyed on screen state (focus, notice level, online mode,
//! submission) so widgets never pick raw colours themselves.

use crate::tui::app::NoticeLevel;
use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    /// Prism violet
    pub const ACCENT: Color = Color::Rgb(167, 139, 250);
    pub const OK: Color = Color::Rgb(74, 222, 128);
    pub const CAUTION: Color = Color::Rgb(250, 204, 21);
    pub const FAILURE: Color = Color::Rgb(248, 113, 113);

    pub const FG: Color = Color::Rgb(226, 232, 240);
    pub const MUTED: Color = Color::Rgb(148, 163, 184);
    pub const FAINT: Color = Color::Rgb(71, 85, 105);

    pub const FRAME: Color = Color::Rgb(51, 65, 85);
    pub const FRAME_FOCUSED: Color = Color::Rgb(129, 140, 248);

    pub fn text() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED)
    }

    pub fn faint() -> Style {
        Style::default().fg(Self::FAINT)
    }

    /// Product name and accented values
    pub fn brand() -> Style {
        Style::default().fg(Self::ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn heading() -> Style {
        Style::default().fg(Self::FG).add_modifier(Modifier::BOLD)
    }

    pub fn frame(focused: bool) -> Style {
        Style::default().fg(if focused { Self::FRAME_FOCUSED } else { Self::FRAME })
    }

    pub fn field_label(focused: bool) -> Style {
        if focused {
            Self::brand()
        } else {
            Self::muted()
        }
    }

    pub fn field_value(focused: bool) -> Style {
        if focused {
            Self::brand()
        } else {
            Self::text()
        }
    }

    pub fn notice(level: NoticeLevel) -> Style {
        let color = match level {
            NoticeLevel::Info => Self::OK,
            NoticeLevel::Warning => Self::CAUTION,
            NoticeLevel::Error => Self::FAILURE,
        };
        Style::default().fg(color)
    }

    /// Header indicator: live endpoint or canned offline text
    pub fn mode(online: bool) -> Style {
        Style::default().fg(if online { Self::OK } else { Self::CAUTION })
    }

    pub fn asset_status(present: bool) -> Style {
        Style::default().fg(if present { Self::OK } else { Self::CAUTION })
    }

    pub fn submit_button(submitting: bool) -> Style {
        if submitting {
            Style::default().fg(Self::MUTED).bg(Self::FRAME)
        } else {
            Style::default()
                .fg(Color::Black)
                .bg(Self::ACCENT)
                .add_modifier(Modifier::BOLD)
        }
    }

    /// Response text; the loading message is highlighted
    pub fn response(submitting: bool) -> Style {
        if submitting {
            Self::busy()
        } else {
            Self::text()
        }
    }

    pub fn busy() -> Style {
        Style::default().fg(Self::CAUTION).add_modifier(Modifier::BOLD)
    }

    pub fn key_hint() -> Style {
        Style::default().fg(Self::ACCENT).add_modifier(Modifier::BOLD)
    }
}

pub struct Icons;

impl Icons {
    pub const ONLINE: &'static str = "●";
    pub const OFFLINE: &'static str = "○";
    pub const LEFT: &'static str = "◀";
    pub const RIGHT: &'static str = "▶";
    pub const CHART: &'static str = "▤";
    pub const CURSOR: &'static str = "▌";
    pub const PRISM: &'static str = "◆";
}
