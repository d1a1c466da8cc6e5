//! TUI Widgets
//!
//! Custom widgets for the Prisma Analytics TUI.

mod chart;
mod form;

pub use chart::render_chart;
pub use form::render_form;
