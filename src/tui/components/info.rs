//! Read-only About panel Component.

use ratatui::Frame;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tuirealm::{
    Component, Event, MockComponent, State,
    command::{Cmd, CmdResult},
    props::{AttrValue, Attribute, Props},
};

use crate::about::{DESCRIPTION, DOCS_URL, FEATURES, FOOTER, SUBTITLE, TITLE, VERSION};
use crate::theme::RenderContext;
use crate::tui::activities::about::{Msg, UserEvent, about_msg_for};
use crate::tui::dispatcher;

pub struct InfoPanel {
    props: Props,
    ctx: RenderContext,
}

impl InfoPanel {
    pub fn new(ctx: RenderContext) -> Self {
        Self {
            props: Props::default(),
            ctx,
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let dim = Style::default().fg(self.ctx.dim);

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(TITLE, bold.fg(self.ctx.accent))),
            Line::from(Span::styled(SUBTITLE, bold)),
            Line::from(format!("Version {VERSION}")),
            Line::from(""),
        ];
        lines.extend(DESCRIPTION.lines().map(Line::from));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Features:", bold)));
        lines.extend(FEATURES.iter().map(|f| Line::from(format!("• {f}"))));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("Documentation: "),
            Span::styled(
                DOCS_URL,
                Style::default()
                    .fg(self.ctx.accent)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(FOOTER, dim)));
        lines
    }
}

impl MockComponent for InfoPanel {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(" About ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let paragraph = Paragraph::new(self.lines())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, inner);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::None
    }

    fn perform(&mut self, _cmd: Cmd) -> CmdResult {
        CmdResult::None
    }
}

impl Component<Msg, UserEvent> for InfoPanel {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        let Event::Keyboard(key_event) = ev else {
            return None;
        };

        let action = dispatcher().dispatch(&key_event)?;
        about_msg_for(&action)
    }
}
