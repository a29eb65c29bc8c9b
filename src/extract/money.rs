use tracing::trace;

use crate::model::Cell;

/// Normalises a cell into an amount.
///
/// Numbers pass through. Text loses its currency sign, whitespace, commas and
/// dots before being read as a whole number, so `"$150.000"` and `"150,000"`
/// both yield `150000.0`. Dots are always thousands separators here, never a
/// decimal point. Anything unreadable becomes `0.0`.
pub fn parse_amount(cell: Option<&Cell>) -> f64 {
    match cell {
        None | Some(Cell::Empty) => 0.0,
        Some(Cell::Number(value)) if value.is_nan() => 0.0,
        Some(Cell::Number(value)) => *value,
        Some(Cell::Text(text)) => parse_amount_text(text),
    }
}

/// Text half of [`parse_amount`].
pub fn parse_amount_text(text: &str) -> f64 {
    let digits: String = text
        .chars()
        .filter(|ch| !matches!(ch, '$' | ',' | '.') && !ch.is_whitespace())
        .collect();

    match digits.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            trace!(text, "unreadable amount coerced to zero");
            0.0
        }
    }
}

/// Renders an amount the way statements print it: `$1,234,567`, no decimals.
pub fn format_amount(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}
