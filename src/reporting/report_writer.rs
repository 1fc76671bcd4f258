//! Report writing functionality

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::policy::ReportKind;
use crate::core::verdict::Verdict;

#[derive(Serialize)]
struct ReportEntry<'a> {
    path: &'a Path,
    verdict: &'a Verdict,
}

/// Write validation results to a text file
///
/// # Arguments
/// * `output_path` - Path to output file
/// * `results` - Verdict per validated document
pub fn write_report(output_path: &Path, results: &[(PathBuf, Verdict)]) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create report {}", output_path.display()))?;
    let mut file = BufWriter::new(file);

    // Write header with timestamp
    let now = std::time::SystemTime::now();
    writeln!(file, "Attendance Report Validation")?;
    writeln!(file, "============================")?;
    writeln!(file, "Generated: {:?}", now)?;
    writeln!(file)?;

    let passed: Vec<_> = results.iter().filter(|(_, v)| v.overall_pass()).collect();
    let errors: Vec<_> = results.iter().filter(|(_, v)| v.error().is_some()).collect();
    let failed: Vec<_> = results
        .iter()
        .filter(|(_, v)| !v.overall_pass() && v.error().is_none())
        .collect();

    writeln!(file, "Summary Statistics:")?;
    writeln!(file, "-------------------")?;
    writeln!(file, "  Total files checked: {}", results.len())?;
    writeln!(file, "  Passed: {}", passed.len())?;
    writeln!(file, "  Failed checks: {}", failed.len())?;
    writeln!(file, "  Extraction errors: {}", errors.len())?;

    if !results.is_empty() {
        let pass_pct = (passed.len() as f64 / results.len() as f64) * 100.0;
        writeln!(file, "  Pass rate: {:.2}%", pass_pct)?;
    }

    writeln!(file)?;

    if !failed.is_empty() {
        writeln!(file, "Failed Reports:")?;
        writeln!(file, "---------------")?;
        for (path, verdict) in &failed {
            let unmet: Vec<_> = verdict.unmet_checks().iter().map(|c| c.key()).collect();
            writeln!(file, "  {}", path.display())?;
            writeln!(file, "    unmet: {}", unmet.join(", "))?;
        }
        writeln!(file)?;
    }

    if !errors.is_empty() {
        writeln!(file, "Unreadable Files:")?;
        writeln!(file, "-----------------")?;
        for (path, verdict) in &errors {
            writeln!(file, "  {}", path.display())?;
            writeln!(file, "    error: {}", verdict.error().unwrap_or_default())?;
        }
        writeln!(file)?;
    }

    writeln!(file, "Passed Reports:")?;
    writeln!(file, "---------------")?;
    writeln!(file, "  Total: {}", passed.len())?;
    writeln!(file)?;
    for (path, verdict) in &passed {
        let kind = match verdict.report_kind() {
            Some(ReportKind::Empty) => " (no data)",
            _ => "",
        };
        writeln!(file, "  {}{}", path.display(), kind)?;
    }

    file.flush()?;
    Ok(())
}

/// Write verdicts as a JSON array of `{ "path", "verdict" }` objects
pub fn write_json_report(output_path: &Path, results: &[(PathBuf, Verdict)]) -> Result<()> {
    let entries: Vec<_> = results
        .iter()
        .map(|(path, verdict)| ReportEntry { path, verdict })
        .collect();

    let file = File::create(output_path)
        .with_context(|| format!("Failed to create JSON report {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &entries).context("Failed to write JSON report")?;
    writer.flush()?;
    Ok(())
}
