pub mod excel_write;
pub mod workbook;
