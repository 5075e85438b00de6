//! Comparison grid: the prompt buffer plus a bounded stack of comparison columns.
//!
//! Columns are only ever pushed onto or popped from the tail, so the live
//! indices are always the contiguous range `0..count`. Every mutation that
//! changes the column count also recomputes the per-slot layout weights.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

/// Fewest columns the grid may hold.
pub const MIN_COLUMNS: usize = 1;

/// Most columns the grid may hold.
pub const MAX_COLUMNS: usize = 10;

/// Text shown in a column before any response exists.
pub const PLACEHOLDER_RESPONSE: &str = "Response from model will appear here...\n\n\
     (This textbox is read-only but you can copy text from it)";

/// Width of the horizontal rules in the diagnostic dump.
const RULE_WIDTH: usize = 80;

/// Errors from grid operations. None of them leave the grid modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("Maximum of {max} columns allowed.")]
    MaximumReached { max: usize },
    #[error("Minimum of {min} column required.")]
    MinimumRequired { min: usize },
    #[error("No column at index {index} (grid has {count})")]
    NoSuchColumn { index: usize, count: usize },
}

impl GridError {
    /// Short title for a user-facing notice.
    pub fn title(&self) -> &'static str {
        match self {
            Self::MaximumReached { .. } => "Maximum Columns",
            Self::MinimumRequired { .. } => "Minimum Columns",
            Self::NoSuchColumn { .. } => "Unknown Column",
        }
    }
}

/// Error returned when parsing a choice label fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseChoiceError {
    kind: &'static str,
    value: String,
}

/// Model selectable for a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelChoice {
    #[default]
    #[serde(rename = "GPT-4")]
    Gpt4,
    #[serde(rename = "GPT-3.5")]
    Gpt35,
    #[serde(rename = "Claude-3")]
    Claude3,
    #[serde(rename = "Claude-2")]
    Claude2,
    #[serde(rename = "Other")]
    Other,
}

impl ModelChoice {
    /// All choices in display order.
    pub const ALL: [ModelChoice; 5] = [
        Self::Gpt4,
        Self::Gpt35,
        Self::Claude3,
        Self::Claude2,
        Self::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Gpt4 => "GPT-4",
            Self::Gpt35 => "GPT-3.5",
            Self::Claude3 => "Claude-3",
            Self::Claude2 => "Claude-2",
            Self::Other => "Other",
        }
    }

    pub fn position(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }

    /// Next choice, wrapping at the end.
    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// Previous choice, wrapping at the start.
    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ModelChoice {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseChoiceError {
                kind: "model",
                value: s.to_string(),
            })
    }
}

/// Sampling temperature selectable for a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureChoice {
    #[serde(rename = "0.0")]
    Zero,
    #[serde(rename = "0.5")]
    Half,
    #[default]
    #[serde(rename = "0.7")]
    Balanced,
    #[serde(rename = "1.0")]
    One,
    #[serde(rename = "1.5")]
    High,
}

impl TemperatureChoice {
    /// All choices in display order.
    pub const ALL: [TemperatureChoice; 5] = [
        Self::Zero,
        Self::Half,
        Self::Balanced,
        Self::One,
        Self::High,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Zero => "0.0",
            Self::Half => "0.5",
            Self::Balanced => "0.7",
            Self::One => "1.0",
            Self::High => "1.5",
        }
    }

    pub fn position(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for TemperatureChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TemperatureChoice {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s.trim())
            .ok_or_else(|| ParseChoiceError {
                kind: "temperature",
                value: s.to_string(),
            })
    }
}

/// One comparison slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub index: usize,
    pub model_choice: ModelChoice,
    pub temperature_choice: TemperatureChoice,
    pub response_text: String,
}

impl Column {
    /// Column with default selections and placeholder response text.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            model_choice: ModelChoice::default(),
            temperature_choice: TemperatureChoice::default(),
            response_text: PLACEHOLDER_RESPONSE.to_string(),
        }
    }

    /// 1-based label shown in the column header.
    pub fn title(&self) -> String {
        format!("Column {}", self.index + 1)
    }
}

/// Read-only view of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSnapshot {
    pub index: usize,
    pub model_choice: ModelChoice,
    pub temperature_choice: TemperatureChoice,
    pub response_text: String,
}

/// Read-only, ordered view of the whole grid.
///
/// `Display` renders the delimited diagnostic dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridSnapshot {
    pub prompt: String,
    pub columns: Vec<ColumnSnapshot>,
}

impl fmt::Display for GridSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);

        writeln!(f)?;
        writeln!(f, "{heavy}")?;
        writeln!(f, "LLM TESTER - DATA DUMP")?;
        writeln!(f, "{heavy}")?;

        writeln!(f)?;
        writeln!(f, "PROMPT:")?;
        writeln!(f, "{light}")?;
        writeln!(f, "{}", self.prompt)?;
        writeln!(f, "{light}")?;
        writeln!(f)?;

        for column in &self.columns {
            writeln!(f)?;
            writeln!(f, "COLUMN {}:", column.index + 1)?;
            writeln!(f, "{light}")?;
            writeln!(f, "  Model: {}", column.model_choice)?;
            writeln!(f, "  Temperature: {}", column.temperature_choice)?;
            writeln!(f, "  Response:")?;
            for line in column.response_text.split('\n') {
                writeln!(f, "    {line}")?;
            }
            writeln!(f, "{light}")?;
        }

        writeln!(f)?;
        writeln!(f, "{heavy}")?;
        writeln!(f, "Total Columns: {}", self.columns.len())?;
        writeln!(f, "{heavy}")?;
        writeln!(f)
    }
}

/// Owner of the prompt buffer and the column stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonGrid {
    prompt: String,
    columns: Vec<Column>,
    weights: [u16; MAX_COLUMNS],
}

impl ComparisonGrid {
    /// Grid with an empty prompt and a single default column.
    pub fn new() -> Self {
        let mut grid = Self {
            prompt: String::new(),
            columns: vec![Column::new(0)],
            weights: [0; MAX_COLUMNS],
        };
        grid.reweight();
        grid
    }

    pub fn count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn can_append(&self) -> bool {
        self.count() < MAX_COLUMNS
    }

    pub fn can_remove(&self) -> bool {
        self.count() > MIN_COLUMNS
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Push a default column at the tail and return its index.
    #[instrument(level = "debug", skip(self), fields(count = self.count()))]
    pub fn append_column(&mut self) -> Result<usize, GridError> {
        if !self.can_append() {
            return Err(GridError::MaximumReached { max: MAX_COLUMNS });
        }

        let index = self.count();
        self.columns.push(Column::new(index));
        self.reweight();
        debug!(index, count = self.count(), "column appended");
        Ok(index)
    }

    /// Pop the highest-indexed column and return it.
    #[instrument(level = "debug", skip(self), fields(count = self.count()))]
    pub fn remove_column(&mut self) -> Result<Column, GridError> {
        if !self.can_remove() {
            return Err(GridError::MinimumRequired { min: MIN_COLUMNS });
        }

        let removed = self
            .columns
            .pop()
            .ok_or(GridError::MinimumRequired { min: MIN_COLUMNS })?;
        self.reweight();
        debug!(index = removed.index, count = self.count(), "column removed");
        Ok(removed)
    }

    pub fn set_model_choice(&mut self, index: usize, value: ModelChoice) -> Result<(), GridError> {
        self.column_mut(index)?.model_choice = value;
        Ok(())
    }

    pub fn set_temperature_choice(
        &mut self,
        index: usize,
        value: TemperatureChoice,
    ) -> Result<(), GridError> {
        self.column_mut(index)?.temperature_choice = value;
        Ok(())
    }

    pub fn set_response_text(
        &mut self,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), GridError> {
        self.column_mut(index)?.response_text = text.into();
        Ok(())
    }

    /// Ordered read-only copy of the prompt and every live column.
    pub fn export_snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            prompt: self.prompt.clone(),
            columns: self
                .columns
                .iter()
                .map(|c| ColumnSnapshot {
                    index: c.index,
                    model_choice: c.model_choice,
                    temperature_choice: c.temperature_choice,
                    response_text: c.response_text.clone(),
                })
                .collect(),
        }
    }

    /// Layout weight of every slot; live slots carry 1, the rest 0.
    pub fn layout_weights(&self) -> [u16; MAX_COLUMNS] {
        self.weights
    }

    fn column_mut(&mut self, index: usize) -> Result<&mut Column, GridError> {
        let count = self.count();
        self.columns
            .get_mut(index)
            .ok_or(GridError::NoSuchColumn { index, count })
    }

    fn reweight(&mut self) {
        self.weights = [0; MAX_COLUMNS];
        for weight in self.weights.iter_mut().take(self.columns.len()) {
            *weight = 1;
        }
    }
}

impl Default for ComparisonGrid {
    fn default() -> Self {
        Self::new()
    }
}
