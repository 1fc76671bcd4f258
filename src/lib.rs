//! Attendance Report Validator Library
//!
//! Extracts text from rendered attendance-report PDFs and decides whether
//! each report carries the content its consumers rely on.

pub mod core;
pub mod reporting;
pub mod samples;
pub mod scanner;

pub use crate::core::validator;
pub use crate::reporting::report_writer;
pub use crate::scanner::file_scanner;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::core::checks::{Check, CheckResults};
    pub use crate::core::extractor::{ExtractError, LopdfExtractor, TextExtractor};
    pub use crate::core::history::VerdictHistory;
    pub use crate::core::policy::ReportKind;
    pub use crate::core::validator::{validate_report, ReportValidator, ValidatorOptions};
    pub use crate::core::verdict::Verdict;
    pub use crate::reporting::report_writer::{write_json_report, write_report};
    pub use crate::samples::report_generator::{SampleError, SampleReport};
    pub use crate::scanner::file_scanner::{collect_inputs, collect_pdf_files};
}
