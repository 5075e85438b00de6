//! About activity - static information and the documentation link.

use std::io::Stdout;
use std::time::Duration;

use color_eyre::eyre::{Result, eyre};
use ratatui::{
    Terminal,
    crossterm::event::{self, Event, KeyCode},
    layout::{Constraint, Layout},
    prelude::CrosstermBackend,
    style::{Modifier, Style},
    widgets::Paragraph,
};
use tuirealm::{Application, EventListenerCfg, PollStrategy, Update};

use crate::tui::activity::{Activity, ActivityType, Context, ExitReason};
use crate::tui::components::{
    ABOUT_FOOTER_ACTIONS, InfoPanel, fill_background, format_footer, render_help, render_notice,
    render_tab_bar,
};
use crate::tui::{AppAction, GlobalEvent, handle_global_app_events};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Id {
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Quit,
    ShowHelp,
    NextTab,
    PrevTab,
    OpenLink,
}

impl From<GlobalEvent> for Msg {
    fn from(event: GlobalEvent) -> Self {
        match event {
            GlobalEvent::Quit => Msg::Quit,
            GlobalEvent::ShowHelp => Msg::ShowHelp,
            GlobalEvent::NextTab => Msg::NextTab,
            GlobalEvent::PrevTab => Msg::PrevTab,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {}

pub fn about_msg_for(action: &AppAction) -> Option<Msg> {
    if let Some(event) = handle_global_app_events(action) {
        return Some(event.into());
    }

    match action {
        AppAction::OpenLink => Some(Msg::OpenLink),
        _ => None,
    }
}

#[derive(Default)]
pub struct AboutActivity {
    app: Option<Application<Id, Msg, UserEvent>>,
    context: Option<Context>,
    exit_reason: Option<ExitReason>,
}

impl Activity for AboutActivity {
    fn on_create(&mut self, context: Context) {
        let mut app: Application<Id, Msg, UserEvent> = Application::init(
            EventListenerCfg::default()
                .crossterm_input_listener(Duration::from_millis(20), 10)
                .poll_timeout(Duration::from_millis(50)),
        );

        let info = InfoPanel::new(context.model.render.clone());
        if let Err(e) = app
            .mount(Id::Info, Box::new(info), vec![])
            .and_then(|()| app.active(&Id::Info))
        {
            tracing::error!("Failed to mount components: {}", e);
        }

        self.context = Some(context);
        self.app = Some(app);
    }

    fn on_draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let app = self
            .app
            .as_mut()
            .ok_or_else(|| eyre!("about activity drawn before creation"))?;
        let model = &mut self
            .context
            .as_mut()
            .ok_or_else(|| eyre!("about activity has no context"))?
            .model;

        terminal.draw(|frame| {
            let area = frame.area();
            fill_background(frame, area, &model.render);

            let [tabs_area, info_area, footer_area] = Layout::vertical([
                Constraint::Length(1),
                Constraint::Min(10),
                Constraint::Length(1),
            ])
            .areas(area);

            render_tab_bar(frame, tabs_area, ActivityType::About, &model.render);
            app.view(&Id::Info, frame, info_area);

            let footer = format_footer(ABOUT_FOOTER_ACTIONS, &[]);
            frame.render_widget(
                Paragraph::new(footer).style(Style::default().add_modifier(Modifier::DIM)),
                footer_area,
            );

            if model.show_help {
                render_help(frame, &model.render);
            }
            if let Some(notice) = &model.notice {
                render_notice(frame, notice, &model.render);
            }
        })?;

        if model.has_modal() {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?') => {
                        model.dismiss_modal();
                    }
                    _ => {}
                }
            }
            return Ok(());
        }

        if let Ok(messages) = app.tick(PollStrategy::Once) {
            for msg in messages {
                match msg {
                    Msg::Quit => {
                        self.exit_reason = Some(ExitReason::Quit);
                        return Ok(());
                    }
                    Msg::NextTab => {
                        self.exit_reason = Some(ExitReason::SwitchTo(ActivityType::About.next()));
                        return Ok(());
                    }
                    Msg::PrevTab => {
                        self.exit_reason = Some(ExitReason::SwitchTo(ActivityType::About.prev()));
                        return Ok(());
                    }
                    other => {
                        model.update(Some(other));
                    }
                }
            }
        }

        Ok(())
    }

    fn will_umount(&self) -> Option<&ExitReason> {
        self.exit_reason.as_ref()
    }

    fn on_destroy(&mut self) -> Option<Context> {
        self.app = None;
        self.context.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn o_opens_the_link() {
        assert_eq!(about_msg_for(&AppAction::OpenLink), Some(Msg::OpenLink));
        assert_eq!(about_msg_for(&AppAction::PrintData), None);
    }
}
