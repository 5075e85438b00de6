//! Modal notices for warnings, errors and confirmations.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::help::popup_area;
use crate::theme::RenderContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message that blocks input until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title, message)
    }

    fn color(&self, ctx: &RenderContext) -> Color {
        match self.level {
            NoticeLevel::Info => ctx.success,
            NoticeLevel::Warning => ctx.warning,
            NoticeLevel::Error => ctx.error,
        }
    }
}

/// Render a notice centered over the current screen.
pub fn render_notice(frame: &mut Frame, notice: &Notice, ctx: &RenderContext) {
    let area = popup_area(frame.area(), 50, 30);
    frame.render_widget(Clear, area);

    let color = notice.color(ctx);
    let block = Block::default()
        .title(format!(" {} ", notice.title))
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .style(super::base_style(ctx));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [message_area, hint_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

    let message = Paragraph::new(notice.message.as_str())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(message, message_area);

    let hint = Paragraph::new(Line::from(Span::styled(
        "Enter or Esc to dismiss",
        Style::default().fg(ctx.dim).add_modifier(Modifier::ITALIC),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(hint, hint_area);
}
