//! TUI components using tui-realm.

pub mod column;
pub mod credential_field;
pub mod help;
pub mod info;
pub mod notice;
pub mod prompt;
pub mod tabs;

pub use column::ColumnPanel;
pub use credential_field::CredentialField;
pub use help::{
    ABOUT_FOOTER_ACTIONS, MAIN_FOOTER_ACTIONS, OPTIONS_FOOTER_ACTIONS, format_footer, render_help,
};
pub use info::InfoPanel;
pub use notice::{Notice, NoticeLevel, render_notice};
pub use prompt::PromptEditor;
pub use tabs::render_tab_bar;

use ratatui::{Frame, layout::Rect, style::Style, widgets::Block};
use tuirealm::props::{AttrValue, Attribute, Props};

use crate::theme::RenderContext;

/// Base style for the appearance mode: text color on the mode's background.
pub fn base_style(ctx: &RenderContext) -> Style {
    Style::default().fg(ctx.text).bg(ctx.background)
}

/// Paint `area` with the appearance mode's colors before drawing on top.
pub fn fill_background(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
    frame.render_widget(Block::default().style(base_style(ctx)), area);
}

/// Whether the component owning `props` has focus.
pub(crate) fn is_focused(props: &Props) -> bool {
    props
        .get_or(Attribute::Focus, AttrValue::Flag(false))
        .unwrap_flag()
}
