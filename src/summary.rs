//! Portfolio-level figures derived from the classified units.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{ActionClass, RiskStatus, UnitRecord};

/// Aggregate view of a statement run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_units: usize,
    /// Units per letter class, keyed by class code.
    pub by_action_class: BTreeMap<ActionClass, usize>,
    pub by_risk_status: BTreeMap<RiskStatus, usize>,
    /// Sum of every unit's total debt.
    pub total_debt: f64,
    pub total_overdue: f64,
    /// Collection letters to send, i.e. units not up to date.
    pub letters_to_generate: usize,
}

impl PortfolioSummary {
    pub fn from_records(records: &[UnitRecord]) -> Self {
        records.iter().fold(Self::default(), |mut summary, record| {
            let analysis = &record.analysis;
            summary.total_units += 1;
            *summary
                .by_action_class
                .entry(analysis.action_class)
                .or_default() += 1;
            *summary
                .by_risk_status
                .entry(analysis.risk_status)
                .or_default() += 1;
            summary.total_debt += record.financials.total_debt;
            summary.total_overdue += analysis.overdue_amount;
            if analysis.action_class.requires_letter() {
                summary.letters_to_generate += 1;
            }
            summary
        })
    }

    pub fn count_for(&self, class: ActionClass) -> usize {
        self.by_action_class.get(&class).copied().unwrap_or(0)
    }
}
