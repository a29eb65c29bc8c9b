//! Core library for the cartera-tools command line application.
//!
//! Statement workbooks exported by the billing system are read as a plain grid
//! ([`io::workbook`]), segmented into unit blocks and mined for labelled
//! amounts ([`extract`]), and each unit is then classified by delinquency
//! ([`classify`]). [`analyze`] wires these steps together; [`summary`] and
//! [`io::excel_write`] build the portfolio-level outputs.

pub mod analyze;
pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod io;
pub mod model;
pub mod summary;

pub use error::{Result, ToolError};
