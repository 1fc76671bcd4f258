//! Content checks run against the extracted document text
//!
//! Every check is a total function over `&str`: it never fails and never
//! panics, including on empty input.

use lazy_static::lazy_static;
use regex::Regex;

/// Label-sized run of replacement glyphs left behind when a renderer emits
/// CJK labels with a font the extractor cannot decode
pub const PLACEHOLDER_LABEL: &str = "■■■";

/// The "no data" message as it appears after the same mis-decoding
pub const PLACEHOLDER_NO_DATA: &str = "■■■■■";

const APPROVAL_KEYWORDS: &[&str] = &["承認", "承認欄", "承認者", "approval", "承認欄:"];
const NO_DATA_KEYWORDS: &[&str] = &["データなし", "データがありません", "No data"];

lazy_static! {
    static ref YEAR_MONTH: Regex = Regex::new(r"\b\d{4}-\d{2}\b").expect("year-month pattern");
    static ref EMPLOYEE_NAME: Regex =
        Regex::new(r"社員名\s*[:：]\s*[一-龯々ぁ-んァ-ヶー]{2,4}").expect("employee name pattern");
    static ref EMPLOYEE_NAME_LENIENT: Regex =
        Regex::new(r"(?:社員名|■■■)\s*[:：]\s*[一-龯々ぁ-んァ-ヶー■]{2,4}")
            .expect("lenient employee name pattern");
    static ref EMPLOYEE_CODE: Regex = Regex::new(r"[A-Za-z]{2,4}\d{3,6}").expect("employee code pattern");
    static ref TIME_OF_DAY: Regex = Regex::new(r"\d{1,2}:\d{2}").expect("time pattern");
    static ref DAY_MONTH: Regex = Regex::new(r"\d{1,2}/\d{1,2}").expect("date pattern");
    static ref PAGE_NUMBER: [Regex; 3] = [
        Regex::new(r"ページ\s*\d+").expect("localized page pattern"),
        Regex::new(r"Page\s*\d+").expect("page pattern"),
        Regex::new(r"\d+\s*/\s*\d+").expect("page fraction pattern"),
    ];
}

/// One of the seven named content checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Check {
    HeaderKintaiSystem,
    YearMonthFormat,
    EmployeeInfo,
    AttendanceData,
    FooterApproval,
    FooterPageNumber,
    NoDataMessage,
}

impl Check {
    /// All checks in report order
    pub const ALL: [Check; 7] = [
        Check::HeaderKintaiSystem,
        Check::YearMonthFormat,
        Check::EmployeeInfo,
        Check::AttendanceData,
        Check::FooterApproval,
        Check::FooterPageNumber,
        Check::NoDataMessage,
    ];

    /// Key used in serialized verdicts
    pub fn key(self) -> &'static str {
        match self {
            Check::HeaderKintaiSystem => "header_kintai_system",
            Check::YearMonthFormat => "year_month_format",
            Check::EmployeeInfo => "employee_info",
            Check::AttendanceData => "attendance_data",
            Check::FooterApproval => "footer_approval",
            Check::FooterPageNumber => "footer_page_number",
            Check::NoDataMessage => "no_data_message",
        }
    }

    /// Short human-readable label for console output
    pub fn label(self) -> &'static str {
        match self {
            Check::HeaderKintaiSystem => "Header (KintaiSystem)",
            Check::YearMonthFormat => "Year-month format",
            Check::EmployeeInfo => "Employee info",
            Check::AttendanceData => "Attendance data",
            Check::FooterApproval => "Approval field",
            Check::FooterPageNumber => "Page number",
            Check::NoDataMessage => "No-data message",
        }
    }

    /// Evaluate this check against document text
    pub fn evaluate(self, text: &str, accept_placeholders: bool) -> bool {
        match self {
            Check::HeaderKintaiSystem => has_kintai_header(text),
            Check::YearMonthFormat => has_year_month(text),
            Check::EmployeeInfo => has_employee_info(text, accept_placeholders),
            Check::AttendanceData => has_attendance_data(text),
            Check::FooterApproval => has_approval_footer(text, accept_placeholders),
            Check::FooterPageNumber => has_page_number(text),
            Check::NoDataMessage => has_no_data_message(text, accept_placeholders),
        }
    }
}

/// Outcome of all seven checks for one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckResults {
    pub header_kintai_system: bool,
    pub year_month_format: bool,
    pub employee_info: bool,
    pub attendance_data: bool,
    pub footer_approval: bool,
    pub footer_page_number: bool,
    pub no_data_message: bool,
}

impl CheckResults {
    /// Run every check against `text`. No check is skipped.
    pub fn evaluate(text: &str, accept_placeholders: bool) -> Self {
        Self {
            header_kintai_system: Check::HeaderKintaiSystem.evaluate(text, accept_placeholders),
            year_month_format: Check::YearMonthFormat.evaluate(text, accept_placeholders),
            employee_info: Check::EmployeeInfo.evaluate(text, accept_placeholders),
            attendance_data: Check::AttendanceData.evaluate(text, accept_placeholders),
            footer_approval: Check::FooterApproval.evaluate(text, accept_placeholders),
            footer_page_number: Check::FooterPageNumber.evaluate(text, accept_placeholders),
            no_data_message: Check::NoDataMessage.evaluate(text, accept_placeholders),
        }
    }

    pub fn get(&self, check: Check) -> bool {
        match check {
            Check::HeaderKintaiSystem => self.header_kintai_system,
            Check::YearMonthFormat => self.year_month_format,
            Check::EmployeeInfo => self.employee_info,
            Check::AttendanceData => self.attendance_data,
            Check::FooterApproval => self.footer_approval,
            Check::FooterPageNumber => self.footer_page_number,
            Check::NoDataMessage => self.no_data_message,
        }
    }

    /// Iterate `(check, outcome)` pairs in report order
    pub fn iter(&self) -> impl Iterator<Item = (Check, bool)> + '_ {
        Check::ALL.into_iter().map(move |check| (check, self.get(check)))
    }
}

/// The system name must appear verbatim (case-sensitive)
pub fn has_kintai_header(text: &str) -> bool {
    text.contains("KintaiSystem")
}

/// A standalone `yyyy-MM` token, e.g. `2025-09`
pub fn has_year_month(text: &str) -> bool {
    YEAR_MONTH.is_match(text)
}

/// Both an employee name after its label and an employee-code token
pub fn has_employee_info(text: &str, accept_placeholders: bool) -> bool {
    let has_name = if accept_placeholders {
        EMPLOYEE_NAME_LENIENT.is_match(text)
    } else {
        EMPLOYEE_NAME.is_match(text)
    };
    has_name && EMPLOYEE_CODE.is_match(text)
}

/// Both a `H:MM` time and a `D/D` date somewhere in the text
pub fn has_attendance_data(text: &str) -> bool {
    TIME_OF_DAY.is_match(text) && DAY_MONTH.is_match(text)
}

/// An approval field label, or its placeholder followed by a colon
pub fn has_approval_footer(text: &str, accept_placeholders: bool) -> bool {
    APPROVAL_KEYWORDS.iter().any(|keyword| text.contains(keyword))
        || (accept_placeholders && text.contains(&format!("{}:", PLACEHOLDER_LABEL)))
}

/// A page marker such as `ページ 1`, `Page 1` or `1/2`
pub fn has_page_number(text: &str) -> bool {
    PAGE_NUMBER.iter().any(|pattern| pattern.is_match(text))
}

/// The message printed on reports for a period without records
pub fn has_no_data_message(text: &str, accept_placeholders: bool) -> bool {
    NO_DATA_KEYWORDS.iter().any(|keyword| text.contains(keyword))
        || (accept_placeholders && text.contains(PLACEHOLDER_NO_DATA))
}
