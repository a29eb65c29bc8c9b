use std::path::Path;

use rust_xlsxwriter::{Table, Workbook, Worksheet};

use crate::error::Result;
use crate::extract::money::format_amount;
use crate::model::UnitRecord;
use crate::summary::PortfolioSummary;

/// Sheet holding one row per classified unit.
pub const ANALYSIS_SHEET: &str = "Analisis";
/// Sheet holding the portfolio summary.
pub const SUMMARY_SHEET: &str = "Resumen";

const ANALYSIS_COLUMNS: [&str; 11] = [
    "Local/Oficina",
    "Propietario",
    "Saldo anterior",
    "Cuota actual",
    "Intereses de mora",
    "Otros",
    "Total a pagar",
    "Deuda vencida",
    "Edad vencida",
    "Estado",
    "Tipo de carta",
];

/// Writes the master analysis table and its summary to an `.xlsx` file.
pub fn write_report(path: &Path, records: &[UnitRecord], summary: &PortfolioSummary) -> Result<()> {
    let mut workbook = Workbook::new();

    let analysis = workbook.add_worksheet();
    analysis.set_name(ANALYSIS_SHEET)?;
    write_analysis(analysis, records)?;

    let resumen = workbook.add_worksheet();
    resumen.set_name(SUMMARY_SHEET)?;
    write_summary(resumen, summary)?;

    workbook.save(path)?;
    Ok(())
}

fn write_analysis(worksheet: &mut Worksheet, records: &[UnitRecord]) -> Result<()> {
    for (col_idx, header) in ANALYSIS_COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col_idx as u16, *header)?;
    }

    for (row_idx, record) in records.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        let financials = &record.financials;
        let analysis = &record.analysis;

        worksheet.write_string(row, 0, &record.block.unit_number)?;
        worksheet.write_string(row, 1, &record.block.owner_name)?;
        let amounts = [
            financials.prev_balance,
            financials.current_fee,
            financials.interest,
            financials.adjustments,
            financials.total_debt,
            analysis.overdue_amount,
            analysis.months_overdue,
        ];
        for (offset, amount) in amounts.iter().enumerate() {
            worksheet.write_number(row, (offset + 2) as u16, *amount)?;
        }
        worksheet.write_string(row, 9, analysis.risk_status.as_str())?;
        worksheet.write_string(row, 10, analysis.action_class.code())?;
    }

    let col_end = (ANALYSIS_COLUMNS.len() as u16).saturating_sub(1);
    let row_end = if records.is_empty() {
        1
    } else {
        records.len() as u32
    };
    let mut table = Table::new();
    table.set_autofilter(true);
    worksheet.add_table(0, 0, row_end, col_end, &table)?;
    Ok(())
}

fn write_summary(worksheet: &mut Worksheet, summary: &PortfolioSummary) -> Result<()> {
    let mut lines: Vec<(String, String)> = vec![
        ("Total unidades".into(), summary.total_units.to_string()),
        ("Cartera total".into(), format_amount(summary.total_debt)),
        ("Deuda vencida".into(), format_amount(summary.total_overdue)),
        (
            "Cartas a generar".into(),
            summary.letters_to_generate.to_string(),
        ),
    ];
    lines.extend(summary.by_action_class.iter().map(|(class, count)| {
        (
            format!("{} ({})", class.code(), class.letter_name()),
            count.to_string(),
        )
    }));
    lines.extend(
        summary
            .by_risk_status
            .iter()
            .map(|(status, count)| (status.as_str().to_string(), count.to_string())),
    );

    for (row_idx, (label, value)) in lines.iter().enumerate() {
        worksheet.write_string(row_idx as u32, 0, label)?;
        worksheet.write_string(row_idx as u32, 1, value)?;
    }
    Ok(())
}
