//! Which checks a report must satisfy to pass

use super::checks::{Check, CheckResults};

/// Report variant, decided by the no-data check
///
/// A report for a period with no attendance records legitimately omits the
/// employee block and the attendance table, so those checks are not
/// required for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Standard,
    Empty,
}

const STANDARD_REQUIRED: &[Check] = &[
    Check::HeaderKintaiSystem,
    Check::YearMonthFormat,
    Check::EmployeeInfo,
    Check::AttendanceData,
    Check::FooterApproval,
    Check::FooterPageNumber,
];

const EMPTY_REQUIRED: &[Check] = &[
    Check::HeaderKintaiSystem,
    Check::YearMonthFormat,
    Check::FooterApproval,
    Check::FooterPageNumber,
];

impl ReportKind {
    pub fn of(results: &CheckResults) -> Self {
        if results.no_data_message {
            ReportKind::Empty
        } else {
            ReportKind::Standard
        }
    }

    /// Checks that must all hold for this kind of report to pass
    pub fn required_checks(self) -> &'static [Check] {
        match self {
            ReportKind::Standard => STANDARD_REQUIRED,
            ReportKind::Empty => EMPTY_REQUIRED,
        }
    }

    pub fn passes(self, results: &CheckResults) -> bool {
        self.required_checks().iter().all(|&check| results.get(check))
    }

    /// Required checks that did not hold
    pub fn unmet_checks(self, results: &CheckResults) -> Vec<Check> {
        self.required_checks()
            .iter()
            .copied()
            .filter(|&check| !results.get(check))
            .collect()
    }
}
