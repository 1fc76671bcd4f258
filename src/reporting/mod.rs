//! Validation report output

pub mod report_writer;

pub use report_writer::{write_json_report, write_report};
