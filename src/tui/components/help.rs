//! Help modal and footer hints built from the dispatcher's bindings.

use crossterm_actions::{AppEvent, NavigationEvent, SelectionEvent, TuiEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::theme::RenderContext;
use crate::tui::{AppAction, dispatcher};

/// Actions to display in a keybinding group.
struct KeybindingGroup {
    title: &'static str,
    actions: &'static [AppAction],
}

/// Groups of actions for the help modal.
const HELP_GROUPS: &[KeybindingGroup] = &[
    KeybindingGroup {
        title: "Global",
        actions: &[
            AppAction::Tui(TuiEvent::App(AppEvent::Quit)),
            AppAction::Tui(TuiEvent::App(AppEvent::Help)),
            AppAction::NextTab,
            AppAction::PrevTab,
        ],
    },
    KeybindingGroup {
        title: "Focus Navigation",
        actions: &[
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)),
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Prev)),
        ],
    },
    KeybindingGroup {
        title: "Columns",
        actions: &[
            AppAction::AddColumn,
            AppAction::RemoveColumn,
            AppAction::PrintData,
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Left)),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Right)),
        ],
    },
    KeybindingGroup {
        title: "Options / About",
        actions: &[
            AppAction::SaveCredentials,
            AppAction::RevertCredentials,
            AppAction::ToggleReveal,
            AppAction::OpenLink,
        ],
    },
];

/// Keys handled inside components rather than through the dispatcher.
const EXTRA_BINDINGS: &[(&str, &str)] = &[
    ("Start editing", "Enter"),
    ("Stop editing", "Esc"),
    ("Delete character", "Backspace"),
];

/// Actions shown in the main tab footer.
pub const MAIN_FOOTER_ACTIONS: &[AppAction] = &[
    AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)),
    AppAction::AddColumn,
    AppAction::RemoveColumn,
    AppAction::PrintData,
    AppAction::NextTab,
    AppAction::Tui(TuiEvent::App(AppEvent::Help)),
    AppAction::Tui(TuiEvent::App(AppEvent::Quit)),
];

/// Actions shown in the options tab footer.
pub const OPTIONS_FOOTER_ACTIONS: &[AppAction] = &[
    AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)),
    AppAction::ToggleReveal,
    AppAction::SaveCredentials,
    AppAction::RevertCredentials,
    AppAction::NextTab,
    AppAction::Tui(TuiEvent::App(AppEvent::Help)),
    AppAction::Tui(TuiEvent::App(AppEvent::Quit)),
];

/// Actions shown in the about tab footer.
pub const ABOUT_FOOTER_ACTIONS: &[AppAction] = &[
    AppAction::OpenLink,
    AppAction::NextTab,
    AppAction::Tui(TuiEvent::App(AppEvent::Help)),
    AppAction::Tui(TuiEvent::App(AppEvent::Quit)),
];

/// Format a footer string from a list of actions.
/// Format: "desc: key | desc: key" (description first, single key binding)
pub fn format_footer(actions: &[AppAction], extras: &[(&str, &str)]) -> String {
    let help_entries = dispatcher().config().help_entries();
    let mut parts: Vec<String> = Vec::new();

    for action in actions {
        if let Some(entry) = help_entries.get(action)
            && let (Some(key), Some(desc)) = (entry.keys.first(), entry.description)
        {
            parts.push(format!("{}: {key}", desc.to_lowercase()));
        }
    }

    for (desc, key) in extras {
        parts.push(format!("{desc}: {key}"));
    }

    parts.join(" | ")
}

/// Calculate a centered popup area with given width/height percentages.
pub(crate) fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

/// Render the help modal overlay.
pub fn render_help(frame: &mut Frame, ctx: &RenderContext) {
    let area = popup_area(frame.area(), 50, 80);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ctx.accent))
        .style(super::base_style(ctx));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(inner);
    let content_area = layout[0];
    let footer_area = layout[1];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(ctx.dim);

    let mut lines = vec![
        Line::from(Span::styled("Keybindings", bold)),
        Line::from(""),
    ];

    let help_entries = dispatcher().config().help_entries();

    for group in HELP_GROUPS {
        lines.push(Line::from(Span::styled(group.title, bold)));
        for action in group.actions {
            if let Some(entry) = help_entries.get(action) {
                let keys_str = entry
                    .keys
                    .iter()
                    .map(|k| k.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                let desc = entry.description.unwrap_or("(no description)");
                lines.push(Line::from(vec![
                    Span::styled(format!("  {desc:<20}"), Style::default()),
                    Span::styled(keys_str, dim),
                ]));
            }
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled("Text Fields", bold)));
    for (description, keys) in EXTRA_BINDINGS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {description:<20}"), Style::default()),
            Span::styled(*keys, dim),
        ]));
    }

    let content = Paragraph::new(lines);
    frame.render_widget(content, content_area);

    let footer = Paragraph::new(Line::from(Span::styled(
        "Press Esc, ?, or Enter to close",
        Style::default().fg(ctx.dim).add_modifier(Modifier::ITALIC),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(footer, footer_area);
}
