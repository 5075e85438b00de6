//! Activity-based architecture for the TUI.
//!
//! Each tab is an Activity with its own Application instance, component IDs,
//! and message types. The ActivityManager orchestrates transitions.

use std::io::Stdout;

use color_eyre::eyre::{Result, eyre};
use ratatui::{Terminal, prelude::CrosstermBackend};

use super::Model;
use super::activities::{AboutActivity, MainActivity, OptionsActivity};

/// Shared context passed between activities.
pub struct Context {
    pub model: Model,
}

/// Exit reasons for activity transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum ExitReason {
    Quit,
    SwitchTo(ActivityType),
}

/// Activity lifecycle trait.
///
/// Each activity owns its own tui-realm Application and handles its own events.
pub trait Activity {
    /// Initialize the activity with context from the manager.
    fn on_create(&mut self, context: Context);

    /// Draw the UI and handle one tick of events.
    fn on_draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()>;

    /// Check if activity wants to exit. Returns Some(reason) to exit, None to continue.
    fn will_umount(&self) -> Option<&ExitReason>;

    /// Clean up and return the context to the manager.
    fn on_destroy(&mut self) -> Option<Context>;
}

/// Tabs available in the application, in display order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActivityType {
    #[default]
    Main,
    Options,
    About,
}

impl ActivityType {
    pub const ALL: [ActivityType; 3] = [Self::Main, Self::Options, Self::About];

    pub fn title(self) -> &'static str {
        match self {
            Self::Main => "Main",
            Self::Options => "Options",
            Self::About => "About",
        }
    }

    pub fn position(self) -> usize {
        match self {
            Self::Main => 0,
            Self::Options => 1,
            Self::About => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Manages activity lifecycle and transitions.
pub struct ActivityManager {
    context: Option<Context>,
    current: ActivityType,
}

impl ActivityManager {
    pub fn new(context: Context) -> Self {
        Self {
            context: Some(context),
            current: ActivityType::Main,
        }
    }

    /// Run activities until one quits or fails.
    ///
    /// The context is handed back to the manager in both cases and can be
    /// recovered with [`ActivityManager::take_context`].
    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            let mut activity: Box<dyn Activity> = match self.current {
                ActivityType::Main => Box::<MainActivity>::default(),
                ActivityType::Options => Box::<OptionsActivity>::default(),
                ActivityType::About => Box::<AboutActivity>::default(),
            };

            let context = self
                .context
                .take()
                .ok_or_else(|| eyre!("activity context was lost"))?;
            activity.on_create(context);
            tracing::debug!(activity = self.current.title(), "activity created");

            match self.drive(activity.as_mut(), |a: &mut dyn Activity| a.on_draw(terminal))? {
                ExitReason::Quit => return Ok(()),
                ExitReason::SwitchTo(next) => {
                    self.current = next;
                    // Clear leftovers from the previous tab
                    terminal.clear()?;
                }
            }
        }
    }

    /// Tick `activity` until it asks to exit. On exit or on a failed tick the
    /// activity's context is moved back into the manager.
    fn drive(
        &mut self,
        activity: &mut dyn Activity,
        mut tick: impl FnMut(&mut dyn Activity) -> Result<()>,
    ) -> Result<ExitReason> {
        loop {
            if let Err(e) = tick(activity) {
                self.context = activity.on_destroy();
                return Err(e);
            }

            if let Some(reason) = activity.will_umount().cloned() {
                let context = activity
                    .on_destroy()
                    .ok_or_else(|| eyre!("activity did not return its context"))?;
                self.context = Some(context);
                return Ok(reason);
            }
        }
    }

    /// Take the context back once the manager is done with it.
    pub fn take_context(&mut self) -> Option<Context> {
        self.context.take()
    }
}

#[cfg(test)]
mod tests {
    use tuirealm::Update;

    use super::*;
    use crate::credentials::CredentialStore;
    use crate::theme::RenderContext;
    use crate::tui::activities::main;

    #[test]
    fn tabs_cycle_both_ways() {
        assert_eq!(ActivityType::Main.next(), ActivityType::Options);
        assert_eq!(ActivityType::About.next(), ActivityType::Main);
        assert_eq!(ActivityType::Main.prev(), ActivityType::About);
    }

    /// Holds the context and never asks to exit on its own.
    #[derive(Default)]
    struct Idle {
        context: Option<Context>,
        exit: Option<ExitReason>,
    }

    impl Activity for Idle {
        fn on_create(&mut self, context: Context) {
            self.context = Some(context);
        }

        fn on_draw(&mut self, _terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
            Ok(())
        }

        fn will_umount(&self) -> Option<&ExitReason> {
            self.exit.as_ref()
        }

        fn on_destroy(&mut self) -> Option<Context> {
            self.context.take()
        }
    }

    fn manager_in(dir: &tempfile::TempDir) -> ActivityManager {
        let store = CredentialStore::new(dir.path().join("config.json"));
        let model = Model::new(RenderContext::default(), store);
        ActivityManager::new(Context { model })
    }

    #[test]
    fn failed_tick_returns_context_with_pending_dumps() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = manager_in(&dir);

        let mut activity = Idle::default();
        let mut context = manager.take_context().unwrap();
        context.model.update(Some(main::Msg::PrintData));
        activity.on_create(context);

        let result = manager.drive(&mut activity, |_| Err(eyre!("draw failed")));
        assert!(result.is_err());

        let mut context = manager.take_context().unwrap();
        assert_eq!(context.model.take_pending_output().len(), 1);
    }

    #[test]
    fn exit_request_returns_context() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = manager_in(&dir);

        let mut activity = Idle {
            exit: Some(ExitReason::SwitchTo(ActivityType::About)),
            ..Default::default()
        };
        activity.on_create(manager.take_context().unwrap());

        let reason = manager.drive(&mut activity, |_| Ok(())).unwrap();
        assert_eq!(reason, ExitReason::SwitchTo(ActivityType::About));
        assert!(manager.take_context().is_some());
    }
}
