//! Attendance report validation logic

use std::path::Path;

use super::checks::CheckResults;
use super::extractor::{join_pages, ExtractError, LopdfExtractor, TextExtractor};
use super::history::VerdictHistory;
use super::verdict::Verdict;

/// Validator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Accept runs of `■` in place of labels and the no-data message.
    ///
    /// Some renderers emit CJK text with a font the extractor cannot map
    /// back to Unicode, leaving only replacement glyphs. Turn this off when
    /// the producer embeds fonts with proper Unicode mappings.
    pub accept_placeholders: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            accept_placeholders: true,
        }
    }
}

/// Validates rendered attendance reports
pub struct ReportValidator<E = LopdfExtractor> {
    extractor: E,
    options: ValidatorOptions,
}

impl ReportValidator<LopdfExtractor> {
    pub fn new() -> Self {
        Self::with_options(ValidatorOptions::default())
    }

    pub fn with_options(options: ValidatorOptions) -> Self {
        Self::with_extractor(LopdfExtractor, options)
    }
}

impl Default for ReportValidator<LopdfExtractor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: TextExtractor> ReportValidator<E> {
    pub fn with_extractor(extractor: E, options: ValidatorOptions) -> Self {
        Self { extractor, options }
    }

    pub fn options(&self) -> ValidatorOptions {
        self.options
    }

    /// Extract the document text: all pages in order, each followed by a newline
    pub fn document_text(&self, path: &Path) -> Result<String, ExtractError> {
        let pages = self.extractor.extract_pages(path)?;
        Ok(join_pages(&pages))
    }

    /// Validate the PDF at `path`
    ///
    /// Never fails: extraction problems (missing file, corrupt or
    /// unsupported PDF) produce [`Verdict::Failed`].
    pub fn validate(&self, path: &Path) -> Verdict {
        tracing::info!(path = %path.display(), "validating report");
        self.validate_extracted(path, self.document_text(path))
    }

    /// Turn the outcome of [`document_text`](Self::document_text) for `path`
    /// into a verdict, without extracting again
    pub fn validate_extracted(
        &self,
        path: &Path,
        extracted: Result<String, ExtractError>,
    ) -> Verdict {
        let text = match extracted {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "report validation failed");
                return Verdict::Failed {
                    error: e.to_string(),
                };
            }
        };
        tracing::debug!(path = %path.display(), text = %text, "document text");

        let verdict = self.validate_text(&text);
        tracing::info!(
            path = %path.display(),
            overall_pass = verdict.overall_pass(),
            "report validation complete"
        );
        verdict
    }

    /// Run all checks on already extracted document text
    pub fn validate_text(&self, text: &str) -> Verdict {
        Verdict::Checked(CheckResults::evaluate(text, self.options.accept_placeholders))
    }

    /// Validate and record the verdict in `history`
    pub fn validate_recorded(&self, path: &Path, history: &VerdictHistory) -> Verdict {
        let verdict = self.validate(path);
        history.record(path, verdict.clone());
        verdict
    }
}

/// Validate a report with the default extractor and options
pub fn validate_report(path: &Path) -> Verdict {
    ReportValidator::new().validate(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::checks::Check;
    use crate::core::policy::ReportKind;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::path::PathBuf;

    /// Serves fixed page texts by path
    struct StaticExtractor(HashMap<PathBuf, Vec<String>>);

    impl StaticExtractor {
        fn single(path: &str, pages: &[&str]) -> Self {
            let pages = pages.iter().map(|p| p.to_string()).collect();
            Self(HashMap::from([(PathBuf::from(path), pages)]))
        }
    }

    impl TextExtractor for StaticExtractor {
        fn extract_pages(&self, path: &Path) -> Result<Vec<String>, ExtractError> {
            self.0.get(path).cloned().ok_or_else(|| ExtractError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        }
    }

    fn validator(pages: &[&str]) -> ReportValidator<StaticExtractor> {
        ReportValidator::with_extractor(
            StaticExtractor::single("report.pdf", pages),
            ValidatorOptions::default(),
        )
    }

    #[test]
    fn test_valid_report_passes_every_check() {
        let v = validator(&[
            "KintaiSystem\n対象年月: 2025-09\n社員名: 田中太郎\n社員コード: EMP001",
            "01/01 09:00 18:00\n承認欄: ____\nページ: 2/2",
        ]);
        let verdict = v.validate(Path::new("report.pdf"));

        let expected = CheckResults {
            header_kintai_system: true,
            year_month_format: true,
            employee_info: true,
            attendance_data: true,
            footer_approval: true,
            footer_page_number: true,
            no_data_message: false,
        };
        assert_eq!(verdict, Verdict::Checked(expected));
        assert!(verdict.overall_pass());
        assert_eq!(verdict.report_kind(), Some(ReportKind::Standard));
    }

    #[test]
    fn test_no_data_report_uses_relaxed_rule() {
        let v = validator(&["KintaiSystem\n対象年月: 2025-09\nデータなし\n承認欄: ____\nPage 1"]);
        let verdict = v.validate(Path::new("report.pdf"));
        let checks = verdict.checks().unwrap();

        assert!(checks.no_data_message);
        assert!(!checks.employee_info);
        assert!(!checks.attendance_data);
        assert!(verdict.overall_pass());
        assert_eq!(verdict.report_kind(), Some(ReportKind::Empty));
    }

    #[test]
    fn test_malformed_year_month_fails() {
        let v = validator(&[
            "KintaiSystem 対象年月: 202509 社員名: 田中太郎 EMP001 01/01 09:00 承認欄 ページ 1",
        ]);
        let verdict = v.validate(Path::new("report.pdf"));
        assert!(!verdict.checks().unwrap().year_month_format);
        assert!(!verdict.overall_pass());
        assert_eq!(verdict.unmet_checks(), vec![Check::YearMonthFormat]);
    }

    #[test]
    fn test_missing_header_fails() {
        let v = validator(&[
            "勤怠レポート 2025-09 社員名: 田中太郎 EMP001 01/01 09:00 承認欄 ページ 1",
        ]);
        let verdict = v.validate(Path::new("report.pdf"));
        assert!(!verdict.checks().unwrap().header_kintai_system);
        assert!(!verdict.overall_pass());
    }

    #[test]
    fn test_extraction_failure_becomes_error_verdict() {
        let v = validator(&["KintaiSystem"]);
        let verdict = v.validate(Path::new("other.pdf"));
        assert!(verdict.error().is_some());
        assert!(verdict.checks().is_none());
        assert!(!verdict.overall_pass());
    }

    #[test]
    fn test_pages_are_newline_separated() {
        // Without the page separator "2025-09" would run into the next page's text
        let v = validator(&["KintaiSystem 2025-09", "承認"]);
        assert_eq!(
            v.document_text(Path::new("report.pdf")).unwrap(),
            "KintaiSystem 2025-09\n承認\n"
        );
    }

    #[test]
    fn test_validate_recorded_stores_latest() {
        let v = validator(&["KintaiSystem"]);
        let history = VerdictHistory::new();
        let path = Path::new("report.pdf");

        let verdict = v.validate_recorded(path, &history);
        assert_eq!(history.get(path), Some(verdict));
    }

    #[test]
    fn test_validate_extracted_matches_validate() {
        let v = validator(&["KintaiSystem 2025-09", "データなし 承認 Page 1"]);
        let path = Path::new("report.pdf");

        let text = v.document_text(path);
        assert_eq!(v.validate_extracted(path, text), v.validate(path));

        let missing = Path::new("other.pdf");
        let verdict = v.validate_extracted(missing, v.document_text(missing));
        assert_eq!(verdict, v.validate(missing));
        assert!(verdict.error().is_some());
    }

    #[test]
    fn test_placeholder_shim_can_be_disabled() {
        let pages = ["KintaiSystem 2025-09 ■■■■■ ■■■: ____ 1/1"];
        let lenient = validator(&pages).validate(Path::new("report.pdf"));
        assert!(lenient.overall_pass());

        let strict = ReportValidator::with_extractor(
            StaticExtractor::single("report.pdf", &pages),
            ValidatorOptions {
                accept_placeholders: false,
            },
        )
        .validate(Path::new("report.pdf"));
        assert!(!strict.overall_pass());
        let checks = strict.checks().unwrap();
        assert!(!checks.no_data_message);
        assert!(!checks.footer_approval);
    }
}
