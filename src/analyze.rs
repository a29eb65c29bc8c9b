use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::classify::classify_with;
use crate::config::ExtractionConfig;
use crate::error::{Result, ToolError};
use crate::extract::money::format_amount;
use crate::extract::{BlockLocator, WindowEnd, extract_fields, owner};
use crate::io::workbook;
use crate::model::{Row, UNRESOLVED_OWNER, UnitBlock, UnitRecord};

/// Turns a worksheet grid into one classified record per unit block, in the
/// order the blocks appear.
pub fn analyze_rows(rows: &[Row], config: &ExtractionConfig) -> Vec<UnitRecord> {
    BlockLocator::new(rows)
        .map(|block| build_record(rows, block, config))
        .collect()
}

fn build_record(rows: &[Row], mut block: UnitBlock, config: &ExtractionConfig) -> UnitRecord {
    owner::resolve_owner(&mut block, rows);
    if block.owner_name == UNRESOLVED_OWNER {
        debug!(unit = %block.unit_number, "owner unresolved");
    }

    let scan = extract_fields(rows, block.start_index, config);
    if let WindowEnd::Guard(index) = scan.end {
        warn!(
            unit = %block.unit_number,
            row = index,
            "next unit reached before the total line"
        );
    }

    let analysis = classify_with(&scan.fields, &config.risk);
    debug!(
        unit = %block.unit_number,
        total = %format_amount(scan.fields.total_debt),
        months = analysis.months_overdue,
        status = analysis.risk_status.as_str(),
        "unit classified"
    );

    UnitRecord {
        block,
        financials: scan.fields,
        analysis,
    }
}

/// Loads the first worksheet of `path` and analyses it.
#[instrument(level = "info", skip_all, fields(input = %path.display()))]
pub fn analyze_workbook(path: &Path, config: &ExtractionConfig) -> Result<Vec<UnitRecord>> {
    if !path.exists() {
        return Err(ToolError::MissingInput(path.to_path_buf()));
    }

    let rows = workbook::read_rows(path, config.header_rows)?;
    let records = analyze_rows(&rows, config);
    info!(
        row_count = rows.len(),
        unit_count = records.len(),
        "statement analysed"
    );
    Ok(records)
}

/// What the command line prints: either every record, or a single error
/// object in their place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Units(Vec<UnitRecord>),
    Failed { error: String },
}

impl Report {
    pub fn failed(error: impl ToString) -> Self {
        Report::Failed {
            error: error.to_string(),
        }
    }
}

impl From<Result<Vec<UnitRecord>>> for Report {
    fn from(result: Result<Vec<UnitRecord>>) -> Self {
        match result {
            Ok(records) => Report::Units(records),
            Err(error) => Report::failed(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ActionClass, Cell, FinancialFields, RiskStatus};

    fn row(cells: &[Cell]) -> Row {
        cells.to_vec()
    }

    fn text(value: &str) -> Row {
        vec![Cell::from(value)]
    }

    #[test]
    fn fee_less_unit_is_up_to_date() {
        let rows = vec![
            text("LOCAL: A101"),
            text("Copropietario: Juan Perez Fecha: 01/26"),
            row(&[Cell::from("Total a pagar"), Cell::from(500_000.0)]),
        ];

        let records = analyze_rows(&rows, &ExtractionConfig::default());
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.block.unit_number, "A101");
        assert_eq!(record.block.owner_name, "Juan Perez");
        assert_eq!(record.financials.current_fee, 0.0);
        assert_eq!(record.financials.total_debt, 500_000.0);
        assert_eq!(record.analysis.months_overdue, 0.0);
        assert_eq!(record.analysis.risk_status, RiskStatus::AlDia);
    }

    #[test]
    fn close_markers_open_separate_blocks() {
        let rows = vec![
            text("LOCAL: A1"),
            text("Copropietario: Ana"),
            text("detalle"),
            text("LOCAL: A2"),
            text("Copropietario: Luis"),
            row(&[Cell::from("Cuota administracion"), Cell::from(200_000.0)]),
            row(&[Cell::from("Total a pagar"), Cell::from(650_000.0)]),
        ];

        let records = analyze_rows(&rows, &ExtractionConfig::default());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].block.start_index, 0);
        assert_eq!(records[0].financials, FinancialFields::default());
        assert_eq!(records[0].analysis.action_class, ActionClass::Ad);
        assert_eq!(records[1].block.start_index, 3);
        assert_eq!(records[1].financials.current_fee, 200_000.0);
        assert_eq!(records[1].block.unit_number, "A2");
        assert_eq!(records[1].block.owner_name, "Luis");
        assert_eq!(records[1].analysis.months_overdue, 2.25);
        assert_eq!(records[1].analysis.action_class, ActionClass::Ab);
    }

    #[test]
    fn markers_two_rows_apart_do_not_share_figures() {
        let rows = vec![
            text("LOCAL: A1"),
            text("Copropietario: Ana"),
            text("LOCAL: A2"),
            text("Copropietario: Luis"),
            row(&[Cell::from("Cuota administracion"), Cell::from(200_000.0)]),
            row(&[Cell::from("Total a pagar"), Cell::from(650_000.0)]),
        ];

        let records = analyze_rows(&rows, &ExtractionConfig::default());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].financials.total_debt, 0.0);
        assert_eq!(records[0].financials.current_fee, 0.0);
        assert_eq!(records[0].analysis.risk_status, RiskStatus::AlDia);
        assert_eq!(records[1].block.start_index, 2);
        assert_eq!(records[1].financials.total_debt, 650_000.0);
        assert_eq!(records[1].analysis.months_overdue, 2.25);
    }

    #[test]
    fn block_without_labels_still_emits_record() {
        let rows = vec![text("OF: 9")];
        let records = analyze_rows(&rows, &ExtractionConfig::default());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].block.owner_name, "N/D");
        assert_eq!(records[0].financials, FinancialFields::default());
    }

    #[test]
    fn missing_workbook_becomes_error_report() {
        let result = analyze_workbook(
            Path::new("/definitely/not/here.xls"),
            &ExtractionConfig::default(),
        );
        assert!(matches!(result, Err(ToolError::MissingInput(_))));

        let report = Report::from(result);
        let json = serde_json::to_value(&report).expect("report serialised");
        assert_eq!(
            json,
            serde_json::json!({ "error": "File not found: /definitely/not/here.xls" })
        );
    }

    #[test]
    fn successful_report_is_a_plain_array() {
        let report = Report::Units(Vec::new());
        let json = serde_json::to_string(&report).expect("report serialised");
        assert_eq!(json, "[]");
    }
}
