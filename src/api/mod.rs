//! Output formatting for triangulation runs

pub mod report;

pub use report::{render, CsvFormatter, GenerationSummary, JsonFormatter, ReportFormat, RunReport, TextFormatter};
