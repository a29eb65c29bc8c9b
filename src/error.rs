use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the failures that can stop a statement workbook from
/// being analysed or its reports from being written.
///
/// Problems inside the grid itself (unparseable amounts, missing labels) are
/// never represented here: they degrade to default values instead.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Raised when the user provides a path that does not exist.
    #[error("File not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// Raised when the workbook does not contain a first sheet to scan.
    #[error("workbook has no worksheets")]
    EmptyWorkbook,

    /// Raised when an extraction configuration fails validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
