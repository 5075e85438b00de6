//! Application model for the TUI.

use tracing::{info, warn};
use tuirealm::Update;

use crate::about::{DOCS_URL, LinkOpener, SystemBrowser, open_external_link};
use crate::credentials::{CredentialForm, CredentialStore, FormAction};
use crate::grid::ComparisonGrid;
use crate::theme::RenderContext;

use super::activities::{about, main, options};
use super::components::Notice;

/// Application model containing all state.
///
/// Each activity only reads and writes the part that belongs to its tab:
/// the grid for Main, the credential store and form for Options.
pub struct Model {
    pub render: RenderContext,
    pub grid: ComparisonGrid,
    pub credentials: CredentialStore,
    pub form: CredentialForm,

    // UI state
    pub notice: Option<Notice>,
    pub show_help: bool,
    pending_output: Vec<String>,
    opener: Box<dyn LinkOpener>,
}

impl Model {
    pub fn new(render: RenderContext, credentials: CredentialStore) -> Self {
        Self::with_opener(render, credentials, Box::new(SystemBrowser))
    }

    pub fn with_opener(
        render: RenderContext,
        credentials: CredentialStore,
        opener: Box<dyn LinkOpener>,
    ) -> Self {
        let form = CredentialForm::new(credentials.record().clone());
        Self {
            render,
            grid: ComparisonGrid::new(),
            credentials,
            form,
            notice: None,
            show_help: false,
            pending_output: Vec::new(),
            opener,
        }
    }

    /// Whether a modal currently owns keyboard input.
    pub fn has_modal(&self) -> bool {
        self.show_help || self.notice.is_some()
    }

    /// Close the topmost modal.
    pub fn dismiss_modal(&mut self) {
        if self.notice.take().is_none() {
            self.show_help = false;
        }
    }

    /// Dumps waiting to be written once the terminal is released.
    pub fn take_pending_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending_output)
    }

    fn queue_dump(&mut self) {
        let dump = self.grid.export_snapshot().to_string();
        info!(columns = self.grid.count(), "data dump requested\n{dump}");
        self.pending_output.push(dump);
        self.notice = Some(Notice::info(
            "Data Dump",
            format!(
                "Data for {} column(s) will be printed to the console on exit.",
                self.grid.count()
            ),
        ));
    }
}

impl Update<main::Msg> for Model {
    fn update(&mut self, msg: Option<main::Msg>) -> Option<main::Msg> {
        use main::Msg;

        let msg = msg?;

        match msg {
            Msg::ShowHelp => {
                self.show_help = true;
                None
            }

            Msg::PromptChanged(text) => {
                self.grid.set_prompt(text);
                None
            }

            Msg::AddColumn => match self.grid.append_column() {
                Ok(_) => Some(Msg::SyncColumns),
                Err(e) => {
                    self.notice = Some(Notice::warning(e.title(), e.to_string()));
                    None
                }
            },
            Msg::RemoveColumn => match self.grid.remove_column() {
                Ok(_) => Some(Msg::SyncColumns),
                Err(e) => {
                    self.notice = Some(Notice::warning(e.title(), e.to_string()));
                    None
                }
            },

            Msg::ModelChanged(index, choice) => {
                if let Err(e) = self.grid.set_model_choice(index, choice) {
                    warn!(error = %e, "model change for missing column");
                }
                None
            }
            Msg::TemperatureChanged(index, choice) => {
                if let Err(e) = self.grid.set_temperature_choice(index, choice) {
                    warn!(error = %e, "temperature change for missing column");
                }
                None
            }

            Msg::PrintData => {
                self.queue_dump();
                None
            }

            // Handled by the activity
            Msg::Quit
            | Msg::NextTab
            | Msg::PrevTab
            | Msg::FocusNext
            | Msg::FocusPrev
            | Msg::SyncColumns => None,
        }
    }
}

impl Update<options::Msg> for Model {
    fn update(&mut self, msg: Option<options::Msg>) -> Option<options::Msg> {
        use options::Msg;

        let msg = msg?;

        match msg {
            Msg::ShowHelp => {
                self.show_help = true;
                None
            }

            Msg::CredentialEdited(provider, text) => {
                self.form.apply(FormAction::Edit(provider, text));
                None
            }
            Msg::ToggleReveal(provider) => {
                self.form.apply(FormAction::ToggleReveal(provider));
                Some(Msg::SyncFields)
            }

            Msg::Save => {
                match self.credentials.save(self.form.draft().clone()) {
                    Ok(()) => {
                        self.notice = Some(Notice::info("Success", "API keys saved successfully!"));
                    }
                    Err(e) => {
                        warn!(error = %e, "saving credentials failed");
                        self.notice = Some(Notice::error(
                            "Error",
                            format!("Failed to save API keys: {e}"),
                        ));
                    }
                }
                None
            }
            Msg::Revert => {
                self.form
                    .apply(FormAction::Reset(self.credentials.record().clone()));
                Some(Msg::SyncFields)
            }

            Msg::Quit
            | Msg::NextTab
            | Msg::PrevTab
            | Msg::FocusNext
            | Msg::FocusPrev
            | Msg::SyncFields => None,
        }
    }
}

impl Update<about::Msg> for Model {
    fn update(&mut self, msg: Option<about::Msg>) -> Option<about::Msg> {
        use about::Msg;

        let msg = msg?;

        match msg {
            Msg::ShowHelp => {
                self.show_help = true;
                None
            }
            Msg::OpenLink => {
                if let Err(e) = open_external_link(self.opener.as_ref(), DOCS_URL) {
                    self.notice = Some(Notice::warning("Link Unavailable", e.to_string()));
                }
                None
            }
            Msg::Quit | Msg::NextTab | Msg::PrevTab => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{CredentialRecord, Provider};
    use crate::grid::{MAX_COLUMNS, ModelChoice};
    use crate::tui::NoticeLevel;

    struct Unavailable;

    impl LinkOpener for Unavailable {
        fn open(&self, _url: &str) -> std::io::Result<()> {
            Err(std::io::Error::other("no handler"))
        }
    }

    fn model_in(dir: &tempfile::TempDir) -> Model {
        let store = CredentialStore::new(dir.path().join("config.json"));
        Model::with_opener(RenderContext::default(), store, Box::new(Unavailable))
    }

    /// Feed a message and every chained follow-up through the model.
    fn run_main(model: &mut Model, msg: main::Msg) -> Vec<main::Msg> {
        let mut seen = Vec::new();
        let mut current = Some(msg);
        while let Some(m) = current {
            seen.push(m.clone());
            current = model.update(Some(m));
        }
        seen
    }

    #[test]
    fn add_column_chains_sync() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = model_in(&dir);
        let seen = run_main(&mut model, main::Msg::AddColumn);
        assert_eq!(seen, vec![main::Msg::AddColumn, main::Msg::SyncColumns]);
        assert_eq!(model.grid.count(), 2);
        assert!(model.notice.is_none());
    }

    #[test]
    fn bound_violation_raises_warning() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = model_in(&dir);
        run_main(&mut model, main::Msg::RemoveColumn);
        let notice = model.notice.take().unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, "Minimum of 1 column required.");

        for _ in 1..MAX_COLUMNS {
            run_main(&mut model, main::Msg::AddColumn);
        }
        let seen = run_main(&mut model, main::Msg::AddColumn);
        assert_eq!(seen, vec![main::Msg::AddColumn]);
        assert_eq!(model.notice.unwrap().title, "Maximum Columns");
        assert_eq!(model.grid.count(), MAX_COLUMNS);
    }

    #[test]
    fn print_data_queues_dump() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = model_in(&dir);
        run_main(&mut model, main::Msg::PromptChanged("Hello".to_string()));
        run_main(&mut model, main::Msg::ModelChanged(0, ModelChoice::Claude3));
        run_main(&mut model, main::Msg::PrintData);

        let dumps = model.take_pending_output();
        assert_eq!(dumps.len(), 1);
        assert!(dumps[0].contains("Hello"));
        assert!(dumps[0].contains("  Model: Claude-3"));
        assert!(model.take_pending_output().is_empty());
    }

    #[test]
    fn save_writes_draft_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = model_in(&dir);
        model.update(Some(options::Msg::CredentialEdited(
            Provider::Claude,
            "xyz".to_string(),
        )));
        model.update(Some(options::Msg::Save));

        assert_eq!(model.notice.as_ref().unwrap().level, NoticeLevel::Info);
        assert_eq!(model.credentials.record().claude, "xyz");

        let reloaded = CredentialStore::open(dir.path().join("config.json"));
        assert_eq!(
            reloaded.record(),
            &CredentialRecord {
                claude: "xyz".to_string(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn save_failure_keeps_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("missing").join("config.json"));
        let mut model = Model::with_opener(RenderContext::default(), store, Box::new(Unavailable));
        model.update(Some(options::Msg::CredentialEdited(
            Provider::OpenAi,
            "sk".to_string(),
        )));
        model.update(Some(options::Msg::Save));

        let notice = model.notice.unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.message.starts_with("Failed to save API keys:"));
        assert_eq!(model.credentials.record(), &CredentialRecord::default());
    }

    #[test]
    fn revert_restores_saved_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = model_in(&dir);
        model.update(Some(options::Msg::CredentialEdited(
            Provider::Azure,
            "draft".to_string(),
        )));
        model.update(Some(options::Msg::ToggleReveal(Provider::Azure)));

        let next = model.update(Some(options::Msg::Revert));
        assert_eq!(next, Some(options::Msg::SyncFields));
        assert_eq!(model.form.draft().azure, "");
        assert!(!model.form.is_revealed(Provider::Azure));
    }

    #[test]
    fn link_failure_raises_warning() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = model_in(&dir);
        model.update(Some(about::Msg::OpenLink));
        assert_eq!(model.notice.unwrap().level, NoticeLevel::Warning);
    }

    #[test]
    fn dismiss_closes_notice_before_help() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = model_in(&dir);
        model.show_help = true;
        model.notice = Some(Notice::info("t", "m"));
        model.dismiss_modal();
        assert!(model.show_help);
        model.dismiss_modal();
        assert!(!model.has_modal());
    }
}
