use std::path::Path;

use calamine::{DataType, Range, Reader, open_workbook_auto};
use tracing::debug;

use crate::error::{Result, ToolError};
use crate::model::{Cell, Row};

/// Reads the first worksheet of a statement workbook (`.xls`, `.xlsx`,
/// `.xlsb` or `.ods`) as a grid of cells.
///
/// The first `header_rows` rows are dropped; statement exports carry a column
/// header there that never holds unit data.
pub fn read_rows(path: &Path, header_rows: usize) -> Result<Vec<Row>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ToolError::EmptyWorkbook)?
        .map_err(ToolError::from)?;

    let rows = range_to_rows(&range, header_rows);
    debug!(row_count = rows.len(), "first worksheet loaded");
    Ok(rows)
}

fn range_to_rows(range: &Range<DataType>, header_rows: usize) -> Vec<Row> {
    range
        .rows()
        .skip(header_rows)
        .map(|row| row.iter().map(to_cell).collect())
        .collect()
}

fn to_cell(value: &DataType) -> Cell {
    match value {
        DataType::Empty | DataType::Error(_) => Cell::Empty,
        DataType::Float(value) => Cell::Number(*value),
        DataType::Int(value) => Cell::Number(*value as f64),
        DataType::String(value) => Cell::Text(value.clone()),
        other => Cell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_calamine_cells() {
        assert_eq!(to_cell(&DataType::Empty), Cell::Empty);
        assert_eq!(to_cell(&DataType::Int(7)), Cell::Number(7.0));
        assert_eq!(to_cell(&DataType::Float(1.5)), Cell::Number(1.5));
        assert_eq!(
            to_cell(&DataType::String("LOCAL: A1".into())),
            Cell::from("LOCAL: A1")
        );
        assert_eq!(to_cell(&DataType::Bool(true)), Cell::from("true"));
    }

    #[test]
    fn header_rows_are_skipped() {
        let mut range = Range::new((0, 0), (2, 1));
        range.set_value((0, 0), DataType::String("Columna".into()));
        range.set_value((1, 0), DataType::String("LOCAL: A1".into()));
        range.set_value((2, 1), DataType::Float(10.0));

        let rows = range_to_rows(&range, 1);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![Cell::from("LOCAL: A1"), Cell::Empty]);
        assert_eq!(rows[1], vec![Cell::Empty, Cell::Number(10.0)]);
    }
}
