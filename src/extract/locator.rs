use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::model::{Row, UnitBlock, row_text};

/// Labels that introduce a billable unit code.
pub const MARKER_LABELS: [&str; 2] = ["LOCAL:", "OF:"];

lazy_static! {
    /// Unit marker followed by its (possibly missing) code.
    static ref UNIT_MARKER_PATTERN: Regex = Regex::new(r"(?:LOCAL|OF):\s*([A-Z0-9]*)").unwrap();
}

/// Returns the first non-empty unit code announced in `text`. Markers with no
/// code after them are skipped.
pub fn match_unit_marker(text: &str) -> Option<&str> {
    UNIT_MARKER_PATTERN
        .captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .map(|code| code.as_str())
        .find(|code| !code.is_empty())
}

/// True when `text` carries any marker label, with or without a code.
pub fn contains_marker_label(text: &str) -> bool {
    MARKER_LABELS.iter().any(|label| text.contains(label))
}

/// Walks the rows in order and yields a block for every marker row.
///
/// The locator only opens blocks; where a block's window ends is decided by
/// the field extractor.
pub struct BlockLocator<'a> {
    rows: &'a [Row],
    position: usize,
}

impl<'a> BlockLocator<'a> {
    pub fn new(rows: &'a [Row]) -> Self {
        Self { rows, position: 0 }
    }
}

impl Iterator for BlockLocator<'_> {
    type Item = UnitBlock;

    fn next(&mut self) -> Option<Self::Item> {
        while self.position < self.rows.len() {
            let index = self.position;
            self.position += 1;

            let text = row_text(&self.rows[index]);
            if let Some(code) = match_unit_marker(&text) {
                debug!(unit = code, row = index, "unit block opened");
                return Some(UnitBlock::new(code, index));
            }
        }
        None
    }
}

/// Convenience wrapper returning every block in the grid.
pub fn locate_blocks(rows: &[Row]) -> Vec<UnitBlock> {
    BlockLocator::new(rows).collect()
}
