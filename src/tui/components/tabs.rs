//! Tab bar shown at the top of every activity.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Paragraph, Tabs},
};

use crate::about::TITLE;
use crate::theme::RenderContext;
use crate::tui::ActivityType;

pub fn render_tab_bar(frame: &mut Frame, area: Rect, active: ActivityType, ctx: &RenderContext) {
    let title_width = (TITLE.len() + 3) as u16;
    let [title_area, tabs_area] =
        Layout::horizontal([Constraint::Length(title_width), Constraint::Min(0)]).areas(area);

    let title =
        Paragraph::new(format!(" {TITLE}")).style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(title, title_area);

    let tabs = Tabs::new(ActivityType::ALL.map(|t| t.title()))
        .select(active.position())
        .style(Style::default().fg(ctx.dim))
        .highlight_style(
            Style::default()
                .fg(ctx.accent)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
        .divider("|");
    frame.render_widget(tabs, tabs_area);
}
