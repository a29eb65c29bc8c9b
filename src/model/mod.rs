use serde::{Deserialize, Serialize};

/// Owner placeholder used whenever the co-owner row is missing or unreadable.
pub const UNRESOLVED_OWNER: &str = "N/D";

/// A single worksheet cell as seen by the extraction engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Returns the value of cells that already hold a number. Text is never
    /// coerced here.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) if !value.is_nan() => Some(*value),
            _ => None,
        }
    }

    /// Cells that contribute nothing to a row's searchable text.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Number(value) => value.is_nan(),
            Cell::Text(text) => text.is_empty(),
        }
    }

    fn render(&self) -> Option<String> {
        if self.is_blank() {
            return None;
        }
        match self {
            Cell::Number(value) => Some(value.to_string()),
            Cell::Text(text) => Some(text.clone()),
            Cell::Empty => None,
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

/// One worksheet row, cells in column order.
pub type Row = Vec<Cell>;

/// Joins the non-blank cells of a row with single spaces. All label and marker
/// matching runs against this text.
pub fn row_text(row: &[Cell]) -> String {
    row.iter()
        .filter_map(Cell::render)
        .collect::<Vec<_>>()
        .join(" ")
}

/// A unit record located in the grid: its code, the row holding the marker and
/// the resolved co-owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitBlock {
    pub unit_number: String,
    #[serde(skip)]
    pub start_index: usize,
    pub owner_name: String,
}

impl UnitBlock {
    /// Opens a block at `start_index` with an unresolved owner.
    pub fn new(unit_number: impl Into<String>, start_index: usize) -> Self {
        Self {
            unit_number: unit_number.into(),
            start_index,
            owner_name: UNRESOLVED_OWNER.to_string(),
        }
    }
}

/// The labelled amounts a statement block can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    PrevBalance,
    CurrentFee,
    Interest,
    Adjustments,
    TotalDebt,
}

/// Amounts extracted from one block. Unmatched labels stay at `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FinancialFields {
    pub prev_balance: f64,
    pub current_fee: f64,
    pub interest: f64,
    pub adjustments: f64,
    pub total_debt: f64,
}

impl FinancialFields {
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::PrevBalance => self.prev_balance,
            Field::CurrentFee => self.current_fee,
            Field::Interest => self.interest,
            Field::Adjustments => self.adjustments,
            Field::TotalDebt => self.total_debt,
        }
    }

    pub fn set(&mut self, field: Field, value: f64) {
        let slot = match field {
            Field::PrevBalance => &mut self.prev_balance,
            Field::CurrentFee => &mut self.current_fee,
            Field::Interest => &mut self.interest,
            Field::Adjustments => &mut self.adjustments,
            Field::TotalDebt => &mut self.total_debt,
        };
        *slot = value;
    }
}

/// Delinquency bucket shown to people reviewing the portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskStatus {
    AlDia,
    MoraBaja,
    MoraModerada,
    RiesgoAlto,
    Critico,
}

impl RiskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskStatus::AlDia => "AL_DIA",
            RiskStatus::MoraBaja => "MORA_BAJA",
            RiskStatus::MoraModerada => "MORA_MODERADA",
            RiskStatus::RiesgoAlto => "RIESGO_ALTO",
            RiskStatus::Critico => "CRITICO",
        }
    }
}

/// Collection-letter template selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionClass {
    /// Up to date, no letter.
    Ad,
    /// Simple reminder.
    Cs,
    /// Persuasive collection.
    Cp,
    /// Legal collection.
    Ab,
}

impl ActionClass {
    pub fn code(&self) -> &'static str {
        match self {
            ActionClass::Ad => "AD",
            ActionClass::Cs => "CS",
            ActionClass::Cp => "CP",
            ActionClass::Ab => "AB",
        }
    }

    /// Human name of the letter template.
    pub fn letter_name(&self) -> &'static str {
        match self {
            ActionClass::Ad => "Al día",
            ActionClass::Cs => "Cobro simple",
            ActionClass::Cp => "Cobro persuasivo",
            ActionClass::Ab => "Cobro jurídico",
        }
    }

    /// Whether a collection letter is sent for this class.
    pub fn requires_letter(&self) -> bool {
        !matches!(self, ActionClass::Ad)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskClassification {
    pub overdue_amount: f64,
    pub months_overdue: f64,
    pub risk_status: RiskStatus,
    pub action_class: ActionClass,
}

/// One classified unit, serialised in the shape consumed by the letter service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRecord {
    #[serde(flatten)]
    pub block: UnitBlock,
    pub financials: FinancialFields,
    pub analysis: RiskClassification,
}
