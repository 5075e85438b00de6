//! Interactive TUI: one activity per tab (Main, Options, About).
//!
//! Architecture: Activity-based with tui-realm for components.
//! Each tab has its own Application instance and message types; the shared
//! [`Model`] travels between them inside the activity [`Context`].

mod activities;
mod activity;
mod components;
mod model;

use std::io::{Write, stdout};
use std::sync::LazyLock;

use color_eyre::eyre::Result;
use crossterm_actions::{
    ActionBinding, ActionConfig, AppEvent, EditingMode, TuiEvent, TuiRealmDispatcher,
    defaults, keys,
};
use ratatui::{
    Terminal,
    crossterm::ExecutableCommand,
    crossterm::terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    },
    prelude::CrosstermBackend,
};

use crate::config::AppConfig;
use crate::credentials::CredentialStore;

pub use activity::ActivityType;
pub use components::{Notice, NoticeLevel};
pub use model::Model;

use activity::{ActivityManager, Context};

// ============================================================================
// Event handling (shared across activities)
// ============================================================================

/// Unified application events - wraps TuiEvent + custom actions.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum AppAction {
    /// Standard TUI events (navigation, input, selection, app)
    Tui(TuiEvent),
    /// Switch to the next tab
    NextTab,
    /// Switch to the previous tab
    PrevTab,
    /// Append a comparison column
    AddColumn,
    /// Remove the last comparison column
    RemoveColumn,
    /// Queue a dump of the prompt and columns for stdout
    PrintData,
    /// Save the credential form
    SaveCredentials,
    /// Discard unsaved credential edits
    RevertCredentials,
    /// Show or hide the focused secret
    ToggleReveal,
    /// Open the documentation link
    OpenLink,
}

/// Global dispatcher instance - shared by all components.
pub static DISPATCHER: LazyLock<TuiRealmDispatcher<AppAction>> = LazyLock::new(|| {
    let mut config = ActionConfig::new(EditingMode::Emacs);

    for binding in defaults::emacs_defaults().bindings() {
        config.bind(ActionBinding {
            action: AppAction::Tui(binding.action),
            keys: binding.keys.clone(),
            description: binding.description.clone(),
        });
    }

    config.bind(
        ActionBinding::builder()
            .action(AppAction::NextTab)
            .key(keys::char(']'))
            .description("Next tab")
            .build(),
    );
    config.bind(
        ActionBinding::builder()
            .action(AppAction::PrevTab)
            .key(keys::char('['))
            .description("Previous tab")
            .build(),
    );
    config.bind(
        ActionBinding::builder()
            .action(AppAction::AddColumn)
            .key(keys::char('+'))
            .description("Add column")
            .build(),
    );
    config.bind(
        ActionBinding::builder()
            .action(AppAction::RemoveColumn)
            .key(keys::char('-'))
            .description("Remove column")
            .build(),
    );
    config.bind(
        ActionBinding::builder()
            .action(AppAction::PrintData)
            .key(keys::char('p'))
            .description("Print all data")
            .build(),
    );
    config.bind(
        ActionBinding::builder()
            .action(AppAction::SaveCredentials)
            .key(keys::char('s'))
            .description("Save API keys")
            .build(),
    );
    config.bind(
        ActionBinding::builder()
            .action(AppAction::RevertCredentials)
            .key(keys::char('r'))
            .description("Revert unsaved keys")
            .build(),
    );
    config.bind(
        ActionBinding::builder()
            .action(AppAction::ToggleReveal)
            .key(keys::char('v'))
            .description("Show/hide key")
            .build(),
    );
    config.bind(
        ActionBinding::builder()
            .action(AppAction::OpenLink)
            .key(keys::char('o'))
            .description("Open documentation")
            .build(),
    );

    config.compile();
    TuiRealmDispatcher::new(config)
});

/// Convenience function for components to access the dispatcher.
pub fn dispatcher() -> &'static TuiRealmDispatcher<AppAction> {
    &DISPATCHER
}

/// Events every activity reacts to the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalEvent {
    Quit,
    ShowHelp,
    NextTab,
    PrevTab,
}

/// Handle global application events that are common across all components.
/// Returns Some(event) if the action was handled, None otherwise.
pub fn handle_global_app_events(action: &AppAction) -> Option<GlobalEvent> {
    match action {
        AppAction::Tui(TuiEvent::App(AppEvent::Quit)) => Some(GlobalEvent::Quit),
        AppAction::Tui(TuiEvent::App(AppEvent::Help)) => Some(GlobalEvent::ShowHelp),
        AppAction::NextTab => Some(GlobalEvent::NextTab),
        AppAction::PrevTab => Some(GlobalEvent::PrevTab),
        _ => None,
    }
}

// ============================================================================
// TUI entry point
// ============================================================================

/// Run the interactive TUI.
///
/// Initialization order: the render context is built from `config`, the
/// credential store is loaded, and only then is the first activity created.
/// Data dumps requested during the session are written to stdout after the
/// terminal is restored.
pub fn run(config: &AppConfig) -> Result<()> {
    let render = config.render_context();
    let credentials = CredentialStore::open(config.credentials_path());
    let model = Model::new(render, credentials);

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut manager = ActivityManager::new(Context { model });
    let result = manager.run(&mut terminal);

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    // Flush queued dumps even when the UI loop failed
    if let Some(mut context) = manager.take_context() {
        write_pending_output(&mut context.model, &mut stdout().lock())?;
    }

    result
}

/// Write every queued dump to `out`, oldest first.
fn write_pending_output(model: &mut Model, out: &mut impl Write) -> std::io::Result<()> {
    for dump in model.take_pending_output() {
        out.write_all(dump.as_bytes())?;
    }
    out.flush()
}
