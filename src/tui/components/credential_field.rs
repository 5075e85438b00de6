//! Masked API key entry Component.

use crossterm_actions::{InputEvent, TuiEvent};
use ratatui::Frame;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult},
    event::Key,
    props::{AttrValue, Attribute, Props},
};

use super::is_focused;
use crate::credentials::Provider;
use crate::theme::RenderContext;
use crate::tui::activities::options::{Msg, UserEvent, options_msg_for};
use crate::tui::{AppAction, dispatcher};

/// One provider's key, masked unless revealed.
pub struct CredentialField {
    props: Props,
    provider: Provider,
    value: String,
    revealed: bool,
    editing: bool,
    ctx: RenderContext,
}

impl CredentialField {
    pub fn new(provider: Provider, value: &str, revealed: bool, ctx: RenderContext) -> Self {
        Self {
            props: Props::default(),
            provider,
            value: value.to_string(),
            revealed,
            editing: false,
            ctx,
        }
    }

    fn shown_value(&self) -> String {
        if self.revealed {
            self.value.clone()
        } else {
            "*".repeat(self.value.chars().count())
        }
    }

    fn changed(&self) -> Option<Msg> {
        Some(Msg::CredentialEdited(self.provider, self.value.clone()))
    }
}

impl MockComponent for CredentialField {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let focused = is_focused(&self.props);

        let [label_area, entry_area, toggle_area] = Layout::horizontal([
            Constraint::Length(18),
            Constraint::Min(20),
            Constraint::Length(8),
        ])
        .areas(area);

        let label_style = if focused {
            Style::default()
                .fg(self.ctx.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        frame.render_widget(
            Paragraph::new(self.provider.label()).style(label_style),
            label_area,
        );

        let entry_style = if self.editing {
            Style::default().fg(self.ctx.text).bg(self.ctx.dim)
        } else if focused {
            Style::default().fg(self.ctx.accent)
        } else {
            Style::default()
        };
        let entry = if self.value.is_empty() && !self.editing {
            Line::from(Span::styled(
                "Enter API key here...",
                Style::default().fg(self.ctx.dim),
            ))
        } else {
            let mut spans = vec![Span::styled(self.shown_value(), entry_style)];
            if self.editing {
                spans.push(Span::styled("▏", Style::default().fg(self.ctx.accent)));
            }
            Line::from(spans)
        };
        frame.render_widget(Paragraph::new(entry), entry_area);

        let toggle = if self.revealed { "[Hide]" } else { "[Show]" };
        frame.render_widget(
            Paragraph::new(toggle).style(Style::default().fg(self.ctx.dim)),
            toggle_area,
        );
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::One(StateValue::String(self.value.clone()))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        match cmd {
            Cmd::Type(c) => {
                self.value.push(c);
                CmdResult::Changed(self.state())
            }
            Cmd::Delete => {
                if self.value.pop().is_some() {
                    CmdResult::Changed(self.state())
                } else {
                    CmdResult::None
                }
            }
            _ => CmdResult::None,
        }
    }
}

impl Component<Msg, UserEvent> for CredentialField {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        if !is_focused(&self.props) {
            return None;
        }

        let Event::Keyboard(key_event) = ev else {
            return None;
        };

        if self.editing {
            return match key_event.code {
                Key::Esc | Key::Enter => {
                    self.editing = false;
                    None
                }
                Key::Tab => {
                    self.editing = false;
                    Some(Msg::FocusNext)
                }
                Key::Backspace => match self.perform(Cmd::Delete) {
                    CmdResult::Changed(_) => self.changed(),
                    _ => None,
                },
                Key::Char(c) => match self.perform(Cmd::Type(c)) {
                    CmdResult::Changed(_) => self.changed(),
                    _ => None,
                },
                _ => None,
            };
        }

        let action = dispatcher().dispatch(&key_event)?;

        match action {
            AppAction::Tui(TuiEvent::Input(InputEvent::Confirm)) => {
                self.editing = true;
                None
            }
            AppAction::ToggleReveal => Some(Msg::ToggleReveal(self.provider)),
            other => options_msg_for(&other),
        }
    }
}
