use tracing::trace;

use crate::config::{Accumulate, ExtractionConfig, FieldRule};
use crate::extract::locator::{contains_marker_label, match_unit_marker};
use crate::extract::money::parse_amount;
use crate::model::{Cell, FinancialFields, Row, row_text};

/// Why a block's window stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEnd {
    /// A terminal label matched on this row.
    Terminal(usize),
    /// The next unit's marker row was reached at this index.
    Guard(usize),
    /// The lookahead or the sheet ran out.
    Exhausted,
}

/// Result of scanning one block's window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowScan {
    pub fields: FinancialFields,
    pub end: WindowEnd,
}

/// Scans the rows following `start_index` and collects the labelled amounts.
///
/// The window covers `start_index + 1 .. start_index + lookahead`. A row that
/// opens another unit closes the window at any distance. A bare marker label
/// without a code closes it only when it lies further than `guard_after` rows
/// from the start. Fields whose label never shows up stay at `0.0`.
pub fn extract_fields(rows: &[Row], start_index: usize, config: &ExtractionConfig) -> WindowScan {
    let window_end = start_index.saturating_add(config.lookahead).min(rows.len());
    let mut fields = FinancialFields::default();

    for index in (start_index + 1)..window_end {
        let row = &rows[index];
        let text = row_text(row);

        let opens_unit = match_unit_marker(&text).is_some();
        let past_guard = index - start_index > config.guard_after;
        if opens_unit || (past_guard && contains_marker_label(&text)) {
            trace!(row = index, "window closed by next unit marker");
            return WindowScan {
                fields,
                end: WindowEnd::Guard(index),
            };
        }

        let (next, closed) = scan_row(fields, &config.fields, &text, row);
        fields = next;
        if closed {
            return WindowScan {
                fields,
                end: WindowEnd::Terminal(index),
            };
        }
    }

    WindowScan {
        fields,
        end: WindowEnd::Exhausted,
    }
}

/// Applies every rule to one row. Returns the updated fields and whether a
/// terminal label was seen.
fn scan_row(
    mut fields: FinancialFields,
    rules: &[FieldRule],
    text: &str,
    row: &[Cell],
) -> (FinancialFields, bool) {
    let values = numeric_values(row);
    let mut closed = false;

    for rule in rules.iter().filter(|rule| rule.matches(text)) {
        if let Some(value) = rule.selection.select(&values) {
            let merged = match rule.accumulate {
                Accumulate::Replace => value,
                Accumulate::Sum => fields.get(rule.field) + value,
            };
            trace!(field = ?rule.field, value, "field matched");
            fields.set(rule.field, merged);
        }
        closed |= rule.terminal;
    }

    (fields, closed)
}

/// Amounts of the cells that already hold numbers, in column order.
fn numeric_values(row: &[Cell]) -> Vec<f64> {
    row.iter()
        .filter(|cell| cell.as_number().is_some())
        .map(|cell| parse_amount(Some(cell)))
        .collect()
}
