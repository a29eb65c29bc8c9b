//! Extraction and classification settings.
//!
//! Every label, threshold and window bound used while scanning a statement
//! lives here so that a new report layout can be supported by editing a JSON
//! file instead of the scanner.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolError};
use crate::model::Field;

/// How a rule picks a value from the numeric cells of a labelled row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Selection {
    /// First value strictly greater than `threshold`.
    FirstAbove { threshold: f64 },
    /// First value strictly between `min` and `max`.
    FirstBetween { min: f64, max: f64 },
    /// Last value strictly greater than `threshold`.
    LastAbove { threshold: f64 },
    /// Sum of every value strictly below `threshold`.
    AllBelow { threshold: f64 },
}

impl Selection {
    /// Applies the selection to the numeric values of one row. `None` means the
    /// row carried no qualifying value.
    pub fn select(&self, values: &[f64]) -> Option<f64> {
        match *self {
            Selection::FirstAbove { threshold } => values.iter().copied().find(|v| *v > threshold),
            Selection::FirstBetween { min, max } => {
                values.iter().copied().find(|v| *v > min && *v < max)
            }
            Selection::LastAbove { threshold } => {
                values.iter().rev().copied().find(|v| *v > threshold)
            }
            Selection::AllBelow { threshold } => {
                let below: Vec<f64> = values.iter().copied().filter(|v| *v < threshold).collect();
                if below.is_empty() {
                    None
                } else {
                    Some(below.iter().sum())
                }
            }
        }
    }
}

/// How a selected value combines with what earlier rows already produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accumulate {
    /// The latest matching row wins.
    #[default]
    Replace,
    /// Values from every matching row are added up.
    Sum,
}

/// One row of the label table: which field, which label spellings, and how the
/// amount is picked once a label is found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    pub field: Field,
    pub labels: Vec<String>,
    pub selection: Selection,
    #[serde(default)]
    pub accumulate: Accumulate,
    /// A label match on a terminal rule closes the block's window.
    #[serde(default)]
    pub terminal: bool,
}

impl FieldRule {
    fn new(field: Field, labels: &[&str], selection: Selection) -> Self {
        Self {
            field,
            labels: labels.iter().map(|label| label.to_string()).collect(),
            selection,
            accumulate: Accumulate::Replace,
            terminal: false,
        }
    }

    fn summing(mut self) -> Self {
        self.accumulate = Accumulate::Sum;
        self
    }

    fn closing(mut self) -> Self {
        self.terminal = true;
        self
    }

    /// True when any label spelling occurs in the row text.
    pub fn matches(&self, text: &str) -> bool {
        self.labels
            .iter()
            .any(|label| !label.is_empty() && text.contains(label.as_str()))
    }
}

/// Upper bounds of the months-overdue buckets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// Inclusive upper bound of `MORA_BAJA`.
    pub low_max: f64,
    /// Inclusive upper bound of `MORA_MODERADA`.
    pub moderate_max: f64,
    /// Exclusive upper bound of `RIESGO_ALTO`; anything at or above is critical.
    pub high_below: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low_max: 1.0,
            moderate_max: 2.0,
            high_below: 6.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Leading sheet rows treated as a column header and never scanned.
    pub header_rows: usize,
    /// The field window spans rows `start + 1 .. start + lookahead`.
    pub lookahead: usize,
    /// A marker row ends the window only once it lies more than this many
    /// rows past the block start.
    pub guard_after: usize,
    pub fields: Vec<FieldRule>,
    pub risk: RiskThresholds,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            header_rows: 1,
            lookahead: 35,
            guard_after: 3,
            fields: default_rules(),
            risk: RiskThresholds::default(),
        }
    }
}

fn default_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::new(
            Field::PrevBalance,
            &["Saldo anterior", "Saldo  anterior"],
            Selection::FirstAbove { threshold: 0.0 },
        ),
        FieldRule::new(
            Field::Adjustments,
            &["Recibos de caja", "Rec.de Caja"],
            Selection::AllBelow { threshold: 0.0 },
        )
        .summing(),
        FieldRule::new(
            Field::Interest,
            &["Intereses por mora", "Inter.xMora"],
            Selection::FirstBetween {
                min: 0.0,
                max: 100_000.0,
            },
        )
        .summing(),
        FieldRule::new(
            Field::CurrentFee,
            &["Cuota administracion", "Cuota administración"],
            Selection::FirstAbove {
                threshold: 100_000.0,
            },
        ),
        FieldRule::new(
            Field::TotalDebt,
            &["Total a pagar", "Total  a  pagar"],
            Selection::LastAbove { threshold: 0.0 },
        )
        .closing(),
    ]
}

impl ExtractionConfig {
    /// Reads a JSON configuration file. Keys that are absent keep their
    /// defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ToolError::MissingInput(path.to_path_buf()));
        }
        let source = fs::read_to_string(path)?;
        let config: ExtractionConfig = serde_json::from_str(&source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.lookahead == 0 {
            return Err(ToolError::InvalidConfig("lookahead must be at least 1".into()));
        }

        for rule in &self.fields {
            if !rule.labels.iter().any(|label| !label.is_empty()) {
                return Err(ToolError::InvalidConfig(format!(
                    "rule for {:?} has no labels",
                    rule.field
                )));
            }
        }

        if self.fields.iter().filter(|rule| rule.terminal).count() > 1 {
            return Err(ToolError::InvalidConfig(
                "at most one rule may close the window".into(),
            ));
        }

        let risk = &self.risk;
        let ordered = risk.low_max > 0.0
            && risk.low_max <= risk.moderate_max
            && risk.moderate_max <= risk.high_below;
        if !ordered {
            return Err(ToolError::InvalidConfig(format!(
                "risk thresholds must satisfy 0 < low_max <= moderate_max <= high_below, got {} / {} / {}",
                risk.low_max, risk.moderate_max, risk.high_below
            )));
        }

        Ok(())
    }
}
