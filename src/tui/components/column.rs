//! Comparison column Component: model and temperature selectors plus the
//! read-only response text.

use crossterm_actions::{NavigationEvent, TuiEvent};
use ratatui::Frame;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult, Direction as CmdDirection},
    props::{AttrValue, Attribute, Props},
};

use super::{base_style, is_focused};
use crate::grid::{Column, ModelChoice, TemperatureChoice};
use crate::theme::RenderContext;
use crate::tui::activities::main::{Msg, UserEvent, main_msg_for};
use crate::tui::{AppAction, dispatcher};

/// Field selected inside a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Field {
    #[default]
    Model,
    Temperature,
    Response,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Self::Model => Self::Temperature,
            Self::Temperature | Self::Response => Self::Response,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Model | Self::Temperature => Self::Model,
            Self::Response => Self::Temperature,
        }
    }
}

/// One comparison slot as shown on screen.
pub struct ColumnPanel {
    props: Props,
    index: usize,
    title: String,
    model: ModelChoice,
    temperature: TemperatureChoice,
    response: String,
    field: Field,
    scroll: u16,
    border: Color,
    ctx: RenderContext,
}

impl ColumnPanel {
    pub fn new(column: &Column, ctx: RenderContext) -> Self {
        Self {
            props: Props::default(),
            index: column.index,
            title: column.title(),
            model: column.model_choice,
            temperature: column.temperature_choice,
            response: column.response_text.clone(),
            field: Field::default(),
            scroll: 0,
            border: ctx.column_border(column.index),
            ctx,
        }
    }

    fn draw_choice(&self, frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
        let [label_area, value_area] =
            Layout::horizontal([Constraint::Length(13), Constraint::Min(5)]).areas(area);

        let label_style = if active {
            Style::default().fg(self.border).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        frame.render_widget(Paragraph::new(label).style(label_style), label_area);

        let arrow_style = if active {
            Style::default().fg(self.ctx.dim)
        } else {
            Style::default().fg(self.ctx.dim).add_modifier(Modifier::DIM)
        };
        let value_style = if active {
            Style::default().fg(self.border)
        } else {
            Style::default()
        };
        let line = Line::from(vec![
            Span::styled("◂ ", arrow_style),
            Span::styled(value.to_string(), value_style),
            Span::styled(" ▸", arrow_style),
        ]);
        frame.render_widget(Paragraph::new(line), value_area);
    }

    fn cycle(&mut self, forward: bool) -> Option<Msg> {
        match self.field {
            Field::Model => {
                self.model = if forward { self.model.next() } else { self.model.prev() };
                Some(Msg::ModelChanged(self.index, self.model))
            }
            Field::Temperature => {
                self.temperature = if forward {
                    self.temperature.next()
                } else {
                    self.temperature.prev()
                };
                Some(Msg::TemperatureChanged(self.index, self.temperature))
            }
            Field::Response => None,
        }
    }
}

impl MockComponent for ColumnPanel {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let focused = is_focused(&self.props);

        let border_style = if focused {
            Style::default().fg(self.border).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.border)
        };
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(Style::default().fg(self.border).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(if focused {
                BorderType::Thick
            } else {
                BorderType::Plain
            })
            .border_style(border_style)
            .style(base_style(&self.ctx));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [model_area, temp_area, label_area, response_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

        self.draw_choice(
            frame,
            model_area,
            "Model:",
            self.model.label(),
            focused && self.field == Field::Model,
        );
        self.draw_choice(
            frame,
            temp_area,
            "Temperature:",
            self.temperature.label(),
            focused && self.field == Field::Temperature,
        );

        let response_label_style = if focused && self.field == Field::Response {
            Style::default().fg(self.border).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        frame.render_widget(
            Paragraph::new("Response:").style(response_label_style),
            label_area,
        );

        let response = Paragraph::new(self.response.as_str())
            .style(Style::default().fg(self.ctx.text))
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));
        frame.render_widget(response, response_area);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::Vec(vec![
            StateValue::Usize(self.model.position()),
            StateValue::Usize(self.temperature.position()),
        ])
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        match cmd {
            Cmd::Move(CmdDirection::Up) => {
                if self.field == Field::Response && self.scroll > 0 {
                    self.scroll -= 1;
                } else {
                    self.field = self.field.prev();
                }
                CmdResult::None
            }
            Cmd::Move(CmdDirection::Down) => {
                if self.field == Field::Response {
                    let max = self.response.lines().count().saturating_sub(1) as u16;
                    self.scroll = (self.scroll + 1).min(max);
                } else {
                    self.field = self.field.next();
                }
                CmdResult::None
            }
            _ => CmdResult::None,
        }
    }
}

impl Component<Msg, UserEvent> for ColumnPanel {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        if !is_focused(&self.props) {
            return None;
        }

        let Event::Keyboard(key_event) = ev else {
            return None;
        };

        let action = dispatcher().dispatch(&key_event)?;

        match action {
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)) => {
                self.perform(Cmd::Move(CmdDirection::Up));
                None
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)) => {
                self.perform(Cmd::Move(CmdDirection::Down));
                None
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Left)) => self.cycle(false),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Right)) => self.cycle(true),
            other => main_msg_for(&other),
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::theme::{AppearanceMode, ColorTheme};

    fn render(ctx: RenderContext) -> Terminal<TestBackend> {
        let mut panel = ColumnPanel::new(&Column::new(0), ctx);
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal.draw(|frame| panel.view(frame, frame.area())).unwrap();
        terminal
    }

    #[test]
    fn light_mode_paints_text_on_its_background() {
        let ctx = RenderContext::new(AppearanceMode::Light, ColorTheme::Blue);
        let terminal = render(ctx.clone());
        let buffer = terminal.backend().buffer();

        // First character of the placeholder response
        let cell = &buffer[(1, 4)];
        assert_eq!(cell.symbol(), "R");
        assert_eq!(cell.fg, ctx.text);
        assert_eq!(cell.bg, ctx.background);

        // Blank space inside the panel is painted too
        assert_eq!(buffer[(38, 10)].bg, ctx.background);
    }

    #[test]
    fn header_uses_column_title() {
        let terminal = render(RenderContext::default());
        let top: String = (0..40)
            .map(|x| terminal.backend().buffer()[(x, 0)].symbol().to_string())
            .collect();
        assert!(top.contains("Column 1"));
    }
}
