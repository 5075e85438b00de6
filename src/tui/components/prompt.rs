//! Multi-line prompt editor Component.

use crossterm_actions::{InputEvent, TuiEvent};
use ratatui::Frame;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult},
    event::Key,
    props::{AttrValue, Attribute, Props},
};

use super::is_focused;
use crate::theme::RenderContext;
use crate::tui::activities::main::{Msg, UserEvent, main_msg_for};
use crate::tui::{AppAction, dispatcher};

/// Free-text prompt input. Enter starts editing, Esc stops.
pub struct PromptEditor {
    props: Props,
    text: String,
    editing: bool,
    ctx: RenderContext,
}

impl PromptEditor {
    pub fn new(text: impl Into<String>, ctx: RenderContext) -> Self {
        Self {
            props: Props::default(),
            text: text.into(),
            editing: false,
            ctx,
        }
    }

    fn changed(&self) -> Option<Msg> {
        Some(Msg::PromptChanged(self.text.clone()))
    }
}

impl MockComponent for PromptEditor {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let focused = is_focused(&self.props);

        let border_style = if self.editing {
            Style::default()
                .fg(self.ctx.accent)
                .add_modifier(Modifier::BOLD)
        } else if focused {
            Style::default().fg(self.ctx.accent)
        } else {
            Style::default()
        };
        let title = if self.editing {
            " LLM Prompt [editing] "
        } else {
            " LLM Prompt "
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line> = self.text.split('\n').map(Line::from).collect();
        if self.editing
            && let Some(last) = lines.last_mut()
        {
            last.push_span(Span::styled("▏", Style::default().fg(self.ctx.accent)));
        }

        if self.text.is_empty() && !self.editing {
            let hint = Paragraph::new(Span::styled(
                "Press Enter to write a prompt...",
                Style::default().fg(self.ctx.dim),
            ));
            frame.render_widget(hint, inner);
            return;
        }

        // Keep the end of the text in view while typing
        let overflow = (lines.len() as u16).saturating_sub(inner.height);
        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((overflow, 0));
        frame.render_widget(paragraph, inner);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::One(StateValue::String(self.text.clone()))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        match cmd {
            Cmd::Type(c) => {
                self.text.push(c);
                CmdResult::Changed(self.state())
            }
            Cmd::Delete => {
                if self.text.pop().is_some() {
                    CmdResult::Changed(self.state())
                } else {
                    CmdResult::None
                }
            }
            _ => CmdResult::None,
        }
    }
}

impl Component<Msg, UserEvent> for PromptEditor {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        if !is_focused(&self.props) {
            return None;
        }

        let Event::Keyboard(key_event) = ev else {
            return None;
        };

        // Editing mode takes raw key input
        if self.editing {
            return match key_event.code {
                Key::Esc => {
                    self.editing = false;
                    None
                }
                Key::Tab => {
                    self.editing = false;
                    Some(Msg::FocusNext)
                }
                Key::Enter => match self.perform(Cmd::Type('\n')) {
                    CmdResult::Changed(_) => self.changed(),
                    _ => None,
                },
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
            other => main_msg_for(&other),
        }
    }
}
