//! Validation verdicts

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::checks::{Check, CheckResults};
use super::policy::ReportKind;

/// Result of validating one document
///
/// Either every check ran, or text extraction failed and no check ran.
/// `overall_pass` is always derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Checked(CheckResults),
    Failed { error: String },
}

impl Verdict {
    pub fn overall_pass(&self) -> bool {
        match self {
            Verdict::Checked(results) => ReportKind::of(results).passes(results),
            Verdict::Failed { .. } => false,
        }
    }

    pub fn checks(&self) -> Option<&CheckResults> {
        match self {
            Verdict::Checked(results) => Some(results),
            Verdict::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Verdict::Checked(_) => None,
            Verdict::Failed { error } => Some(error),
        }
    }

    pub fn report_kind(&self) -> Option<ReportKind> {
        self.checks().map(ReportKind::of)
    }

    /// Required checks that failed; empty for error verdicts
    pub fn unmet_checks(&self) -> Vec<Check> {
        match self {
            Verdict::Checked(results) => ReportKind::of(results).unmet_checks(results),
            Verdict::Failed { .. } => Vec::new(),
        }
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Verdict::Checked(results) => {
                let mut map = serializer.serialize_map(Some(Check::ALL.len() + 1))?;
                for (check, passed) in results.iter() {
                    map.serialize_entry(check.key(), &passed)?;
                }
                map.serialize_entry("overall_pass", &self.overall_pass())?;
                map.end()
            }
            Verdict::Failed { error } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("error", error)?;
                map.serialize_entry("overall_pass", &false)?;
                map.end()
            }
        }
    }
}
