//! Main activity - prompt editor and the comparison grid.

use std::io::Stdout;
use std::ops::Range;
use std::time::Duration;

use color_eyre::eyre::{Result, eyre};
use crossterm_actions::{SelectionEvent, TuiEvent};
use ratatui::{
    Frame, Terminal,
    crossterm::event::{self, Event, KeyCode},
    layout::{Constraint, Layout, Rect},
    prelude::CrosstermBackend,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tuirealm::{Application, EventListenerCfg, PollStrategy, Update};

use crate::grid::{MAX_COLUMNS, ModelChoice, TemperatureChoice};
use crate::tui::activity::{Activity, ActivityType, Context, ExitReason};
use crate::tui::components::{
    ColumnPanel, MAIN_FOOTER_ACTIONS, PromptEditor, fill_background, format_footer, render_help,
    render_notice, render_tab_bar,
};
use crate::tui::{AppAction, GlobalEvent, Model, handle_global_app_events};

/// Narrowest a column is drawn before the grid starts scrolling sideways.
pub const MIN_COLUMN_WIDTH: u16 = 24;

// ============================================================================
// Component identifiers (scoped to MainActivity)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Id {
    Prompt,
    Column(usize),
}

// ============================================================================
// Messages (scoped to MainActivity)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    // Application control
    Quit,
    ShowHelp,
    NextTab,
    PrevTab,

    // Focus/Navigation
    FocusNext,
    FocusPrev,

    PromptChanged(String),

    // Grid shape
    AddColumn,
    RemoveColumn,

    // Per-column selectors
    ModelChanged(usize, ModelChoice),
    TemperatureChanged(usize, TemperatureChoice),

    PrintData,

    // Chained after the grid changes shape
    SyncColumns,
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

/// Custom user events (unused, but required by tui-realm).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {}

/// Actions every Main component maps the same way.
pub fn main_msg_for(action: &AppAction) -> Option<Msg> {
    if let Some(event) = handle_global_app_events(action) {
        return Some(event.into());
    }

    match action {
        AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)) => Some(Msg::FocusNext),
        AppAction::Tui(TuiEvent::Selection(SelectionEvent::Prev)) => Some(Msg::FocusPrev),
        AppAction::AddColumn => Some(Msg::AddColumn),
        AppAction::RemoveColumn => Some(Msg::RemoveColumn),
        AppAction::PrintData => Some(Msg::PrintData),
        _ => None,
    }
}

// ============================================================================
// Focus management
// ============================================================================

/// Focus order for a grid with `count` columns: the prompt, then each column.
fn focus_order(count: usize) -> Vec<Id> {
    std::iter::once(Id::Prompt)
        .chain((0..count).map(Id::Column))
        .collect()
}

/// Tab navigation over a focus list that grows and shrinks with the grid.
#[derive(Debug, Default)]
pub struct FocusManager {
    current_idx: usize,
    ids: Vec<Id>,
}

impl FocusManager {
    pub fn new(count: usize) -> Self {
        Self {
            current_idx: 0,
            ids: focus_order(count),
        }
    }

    pub fn current_focus(&self) -> Id {
        self.ids
            .get(self.current_idx)
            .copied()
            .unwrap_or(Id::Prompt)
    }

    pub fn focus_next(&mut self) -> Id {
        self.current_idx = (self.current_idx + 1) % self.ids.len().max(1);
        self.current_focus()
    }

    pub fn focus_prev(&mut self) -> Id {
        let len = self.ids.len().max(1);
        self.current_idx = (self.current_idx + len - 1) % len;
        self.current_focus()
    }

    /// Rebuild the list for a new column count. A focused column that no
    /// longer exists hands focus to the new last column.
    pub fn resize(&mut self, count: usize) -> Id {
        self.ids = focus_order(count);
        self.current_idx = self.current_idx.min(self.ids.len() - 1);
        self.current_focus()
    }

    /// Index of the focused column, if a column has focus.
    pub fn focused_column(&self) -> Option<usize> {
        match self.current_focus() {
            Id::Column(index) => Some(index),
            Id::Prompt => None,
        }
    }
}

/// Columns drawn when only `capacity` of `count` fit, keeping `anchor` in view.
pub fn visible_window(count: usize, anchor: usize, capacity: usize) -> Range<usize> {
    let capacity = capacity.max(1);
    if count <= capacity {
        return 0..count;
    }
    let start = anchor.saturating_sub(capacity / 2).min(count - capacity);
    start..start + capacity
}

/// One-line strip above the grid: column count and the grid actions, dimmed
/// when a bound would reject them.
fn render_toolbar(frame: &mut Frame, area: Rect, model: &Model) {
    let enabled = Style::default().fg(model.render.accent);
    let disabled = Style::default().fg(model.render.dim).add_modifier(Modifier::DIM);
    let grid = &model.grid;

    let line = Line::from(vec![
        Span::styled(
            format!(" Columns: {}", grid.count()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            "[+] Add Column",
            if grid.can_append() { enabled } else { disabled },
        ),
        Span::raw("  "),
        Span::styled(
            "[-] Remove Column",
            if grid.can_remove() { enabled } else { disabled },
        ),
        Span::raw("  "),
        Span::styled("[p] Print Data", enabled),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

// ============================================================================
// MainActivity
// ============================================================================

#[derive(Default)]
pub struct MainActivity {
    app: Option<Application<Id, Msg, UserEvent>>,
    focus: FocusManager,
    context: Option<Context>,
    exit_reason: Option<ExitReason>,
}

impl MainActivity {
    fn create_application() -> Application<Id, Msg, UserEvent> {
        Application::init(
            EventListenerCfg::default()
                .crossterm_input_listener(Duration::from_millis(20), 10)
                .poll_timeout(Duration::from_millis(50)),
        )
    }

    fn mount_components(app: &mut Application<Id, Msg, UserEvent>, model: &Model) -> Result<()> {
        let prompt = PromptEditor::new(model.grid.prompt(), model.render.clone());
        app.mount(Id::Prompt, Box::new(prompt), vec![])?;

        for column in model.grid.columns() {
            let panel = ColumnPanel::new(column, model.render.clone());
            app.mount(Id::Column(column.index), Box::new(panel), vec![])?;
        }

        app.active(&Id::Prompt)?;
        Ok(())
    }

    /// Mount panels for new columns and unmount panels for removed ones.
    fn sync_columns(
        app: &mut Application<Id, Msg, UserEvent>,
        model: &Model,
        focus: &mut FocusManager,
    ) {
        let count = model.grid.count();
        for index in 0..MAX_COLUMNS {
            let id = Id::Column(index);
            match model.grid.column(index) {
                Some(column) if !app.mounted(&id) => {
                    let panel = ColumnPanel::new(column, model.render.clone());
                    if let Err(e) = app.mount(id, Box::new(panel), vec![]) {
                        tracing::error!(index, "failed to mount column: {e}");
                    }
                }
                None if app.mounted(&id) => {
                    let _ = app.umount(&id);
                }
                _ => {}
            }
        }

        let current = focus.resize(count);
        let _ = app.active(&current);
        tracing::debug!(count, "columns synced");
    }
}

impl Activity for MainActivity {
    fn on_create(&mut self, context: Context) {
        let mut app = Self::create_application();
        self.focus = FocusManager::new(context.model.grid.count());

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
            .ok_or_else(|| eyre!("main activity drawn before creation"))?;
        let model = &mut self
            .context
            .as_mut()
            .ok_or_else(|| eyre!("main activity has no context"))?
            .model;
        let anchor = self.focus.focused_column().unwrap_or(0);

        terminal.draw(|frame| {
            let area = frame.area();
            fill_background(frame, area, &model.render);

            let [tabs_area, prompt_area, toolbar_area, grid_area, footer_area] =
                Layout::vertical([
                    Constraint::Length(1),
                    Constraint::Length(8),
                    Constraint::Length(1),
                    Constraint::Min(10),
                    Constraint::Length(1),
                ])
                .areas(area);

            render_tab_bar(frame, tabs_area, ActivityType::Main, &model.render);
            app.view(&Id::Prompt, frame, prompt_area);

            let count = model.grid.count();
            render_toolbar(frame, toolbar_area, model);

            let grid_block = Block::default().borders(Borders::ALL);
            let inner = grid_block.inner(grid_area);
            let capacity = usize::from((inner.width / MIN_COLUMN_WIDTH).max(1));
            let window = visible_window(count, anchor, capacity);

            let mut title = format!(" Response Columns ({count} of {MAX_COLUMNS}) ");
            if window.len() < count {
                title.push_str(&format!(
                    "◂ showing {}-{} ▸ ",
                    window.start + 1,
                    window.end
                ));
            }
            frame.render_widget(grid_block.title(title), grid_area);

            let weights = model.grid.layout_weights();
            let constraints: Vec<Constraint> = window
                .clone()
                .map(|i| Constraint::Fill(weights[i]))
                .collect();
            let slots = Layout::horizontal(constraints).split(inner);
            for (slot, index) in slots.iter().zip(window) {
                app.view(&Id::Column(index), frame, *slot);
            }

            let footer = format_footer(
                MAIN_FOOTER_ACTIONS,
                &[("edit", "Enter"), ("choose", "←/→")],
            );
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

        // Modals intercept all input while visible
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
                        self.exit_reason = Some(ExitReason::SwitchTo(ActivityType::Main.next()));
                        return Ok(());
                    }
                    Msg::PrevTab => {
                        self.exit_reason = Some(ExitReason::SwitchTo(ActivityType::Main.prev()));
                        return Ok(());
                    }
                    _ => {}
                }

                let mut current = Some(msg);
                while let Some(m) = current {
                    if matches!(m, Msg::SyncColumns) {
                        needs_sync = true;
                    }
                    current = model.update(Some(m));
                }
            }

            if needs_sync {
                Self::sync_columns(app, model, &mut self.focus);
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
