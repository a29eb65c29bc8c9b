use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

use crate::model::{Row, UNRESOLVED_OWNER, UnitBlock, row_text};

lazy_static! {
    /// Co-owner label; the name runs up to the date label or the end of the row.
    static ref OWNER_PATTERN: Regex = Regex::new(r"Copropietario:\s*(.+?)(?:Fecha:|$)").unwrap();
}

/// Reads the co-owner name from the row right after the block's marker row.
///
/// Only that single row is examined. When it is missing, does not carry the
/// label, or the name is blank, the placeholder `N/D` is returned.
pub fn extract_owner(rows: &[Row], start_index: usize) -> String {
    let Some(row) = rows.get(start_index + 1) else {
        return UNRESOLVED_OWNER.to_string();
    };

    let text = row_text(row);
    match parse_owner(&text) {
        Some(owner) => owner.to_string(),
        None => {
            if text.contains("Copropietario:") {
                warn!(row = start_index + 1, "co-owner label without a name");
            }
            UNRESOLVED_OWNER.to_string()
        }
    }
}

/// Fills in `block.owner_name` from the grid.
pub fn resolve_owner(block: &mut UnitBlock, rows: &[Row]) {
    block.owner_name = extract_owner(rows, block.start_index);
}

fn parse_owner(text: &str) -> Option<&str> {
    OWNER_PATTERN
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str().trim())
        .filter(|name| !name.is_empty())
}
