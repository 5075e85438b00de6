//! Options activity - the API key form.

use std::io::Stdout;
use std::time::Duration;

use color_eyre::eyre::{Result, eyre};
use crossterm_actions::{SelectionEvent, TuiEvent};
use ratatui::{
    Terminal,
    crossterm::event::{self, Event, KeyCode},
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    prelude::CrosstermBackend,
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use tuirealm::{Application, EventListenerCfg, PollStrategy, Update};

use crate::credentials::Provider;
use crate::tui::activity::{Activity, ActivityType, Context, ExitReason};
use crate::tui::components::{
    CredentialField, OPTIONS_FOOTER_ACTIONS, fill_background, format_footer, render_help,
    render_notice, render_tab_bar,
};
use crate::tui::{AppAction, GlobalEvent, Model, handle_global_app_events};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Id {
    Field(Provider),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Quit,
    ShowHelp,
    NextTab,
    PrevTab,
    FocusNext,
    FocusPrev,

    CredentialEdited(Provider, String),
    ToggleReveal(Provider),
    Save,
    Revert,

    // Chained after reveal state or the draft is replaced
    SyncFields,
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

pub fn options_msg_for(action: &AppAction) -> Option<Msg> {
    if let Some(event) = handle_global_app_events(action) {
        return Some(event.into());
    }

    match action {
        AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)) => Some(Msg::FocusNext),
        AppAction::Tui(TuiEvent::Selection(SelectionEvent::Prev)) => Some(Msg::FocusPrev),
        AppAction::SaveCredentials => Some(Msg::Save),
        AppAction::RevertCredentials => Some(Msg::Revert),
        _ => None,
    }
}

/// Index into [`Provider::ALL`] of the focused field.
#[derive(Debug, Default)]
struct FocusManager {
    current_idx: usize,
}

impl FocusManager {
    fn current_focus(&self) -> Id {
        Id::Field(Provider::ALL[self.current_idx])
    }

    fn focus_next(&mut self) -> Id {
        self.current_idx = (self.current_idx + 1) % Provider::ALL.len();
        self.current_focus()
    }

    fn focus_prev(&mut self) -> Id {
        self.current_idx = (self.current_idx + Provider::ALL.len() - 1) % Provider::ALL.len();
        self.current_focus()
    }
}

#[derive(Default)]
pub struct OptionsActivity {
    app: Option<Application<Id, Msg, UserEvent>>,
    focus: FocusManager,
    context: Option<Context>,
    exit_reason: Option<ExitReason>,
}

impl OptionsActivity {
    fn create_application() -> Application<Id, Msg, UserEvent> {
        Application::init(
            EventListenerCfg::default()
                .crossterm_input_listener(Duration::from_millis(20), 10)
                .poll_timeout(Duration::from_millis(50)),
        )
    }

    fn field_for(model: &Model, provider: Provider) -> CredentialField {
        CredentialField::new(
            provider,
            model.form.draft().get(provider),
            model.form.is_revealed(provider),
            model.render.clone(),
        )
    }

    fn mount_components(app: &mut Application<Id, Msg, UserEvent>, model: &Model) -> Result<()> {
        for provider in Provider::ALL {
            let field = Self::field_for(model, provider);
            app.mount(Id::Field(provider), Box::new(field), vec![])?;
        }
        app.active(&Id::Field(Provider::OpenAi))?;
        Ok(())
    }

    /// Remount every field from the form so masking and drafts match it.
    fn sync_fields(app: &mut Application<Id, Msg, UserEvent>, model: &Model, focus: Id) {
        for provider in Provider::ALL {
            let id = Id::Field(provider);
            let _ = app.umount(&id);
            let field = Self::field_for(model, provider);
            if let Err(e) = app.mount(id, Box::new(field), vec![]) {
                tracing::error!(?provider, "failed to mount credential field: {e}");
            }
        }
        let _ = app.active(&focus);
    }
}

impl Activity for OptionsActivity {
    fn on_create(&mut self, context: Context) {
        let mut app = Self::create_application();

        if let Err(e) = Self::mount_components(&mut app, &context.model) {
            tracing::error!("Failed to mount components: {}", e);
        }

        self.context = Some(context);
        self.app = Some(app);
    }

    fn on_draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let app = self
            .app
            .as_mut()
            .ok_or_else(|| eyre!("options activity drawn before creation"))?;
        let model = &mut self
            .context
            .as_mut()
            .ok_or_else(|| eyre!("options activity has no context"))?
            .model;

        terminal.draw(|frame| {
            let area = frame.area();
            fill_background(frame, area, &model.render);

            let [tabs_area, form_area, footer_area] = Layout::vertical([
                Constraint::Length(1),
                Constraint::Min(10),
                Constraint::Length(1),
            ])
            .areas(area);

            render_tab_bar(frame, tabs_area, ActivityType::Options, &model.render);

            let block = Block::default().borders(Borders::ALL).title(" API Keys ");
            let inner = block.inner(form_area);
            frame.render_widget(block, form_area);

            let [_, openai, _, azure, _, claude, _, status] = Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(2),
            ])
            .areas(inner);

            app.view(&Id::Field(Provider::OpenAi), frame, openai);
            app.view(&Id::Field(Provider::Azure), frame, azure);
            app.view(&Id::Field(Provider::Claude), frame, claude);

            let configured: Vec<&str> = model
                .credentials
                .record()
                .configured()
                .map(|p| p.key())
                .collect();
            let saved = if configured.is_empty() {
                "none".to_string()
            } else {
                configured.join(", ")
            };
            let dim = Style::default().fg(model.render.dim);
            let lines = vec![
                Line::styled(
                    format!("Stored in: {}", model.credentials.path().display()),
                    dim,
                ),
                Line::styled(format!("Saved keys: {saved}"), dim),
            ];
            frame.render_widget(Paragraph::new(lines), status);

            let footer = format_footer(OPTIONS_FOOTER_ACTIONS, &[("edit", "Enter")]);
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
            let mut needs_sync = false;

            for msg in messages {
                match &msg {
                    Msg::FocusNext => {
                        let next = self.focus.focus_next();
                        let _ = app.active(&next);
                    }
                    Msg::FocusPrev => {
                        let prev = self.focus.focus_prev();
                        let _ = app.active(&prev);
                    }
                    Msg::Quit => {
                        self.exit_reason = Some(ExitReason::Quit);
                        return Ok(());
                    }
                    Msg::NextTab => {
                        self.exit_reason =
                            Some(ExitReason::SwitchTo(ActivityType::Options.next()));
                        return Ok(());
                    }
                    Msg::PrevTab => {
                        self.exit_reason =
                            Some(ExitReason::SwitchTo(ActivityType::Options.prev()));
                        return Ok(());
                    }
                    _ => {}
                }

                let mut current = Some(msg);
                while let Some(m) = current {
                    if matches!(m, Msg::SyncFields) {
                        needs_sync = true;
                    }
                    current = model.update(Some(m));
                }
            }

            if needs_sync {
                Self::sync_fields(app, model, self.focus.current_focus());
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
    fn focus_cycles_through_providers() {
        let mut focus = FocusManager::default();
        assert_eq!(focus.current_focus(), Id::Field(Provider::OpenAi));
        assert_eq!(focus.focus_prev(), Id::Field(Provider::Claude));
        assert_eq!(focus.focus_next(), Id::Field(Provider::OpenAi));
        assert_eq!(focus.focus_next(), Id::Field(Provider::Azure));
    }

    #[test]
    fn actions_map_to_messages() {
        assert_eq!(options_msg_for(&AppAction::SaveCredentials), Some(Msg::Save));
        assert_eq!(options_msg_for(&AppAction::RevertCredentials), Some(Msg::Revert));
        assert_eq!(options_msg_for(&AppAction::NextTab), Some(Msg::NextTab));
        assert_eq!(options_msg_for(&AppAction::AddColumn), None);
    }
}
