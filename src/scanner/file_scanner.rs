//! PDF file scanning and collection

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Collect all PDF files from a directory
///
/// # Arguments
/// * `dir` - Directory to scan
/// * `recursive` - Whether to scan subdirectories recursively
///
/// # Returns
/// PDF file paths, sorted
pub fn collect_pdf_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut pdf_files = Vec::new();

    if recursive {
        for entry in WalkDir::new(dir).follow_links(false) {
            let entry = entry?;
            if entry.file_type().is_file() && is_pdf(entry.path()) {
                pdf_files.push(entry.path().to_path_buf());
            }
        }
    } else {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory {}", dir.display()))?;
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_file() && is_pdf(&entry.path()) {
                pdf_files.push(entry.path());
            }
        }
    }

    pdf_files.sort();
    Ok(pdf_files)
}

/// Expand command-line inputs into a list of files to validate
///
/// Directories are scanned for PDFs; any other path is taken as given, so a
/// missing file still gets validated and reported as an error verdict.
/// A file named more than once is kept only at its first position.
pub fn collect_inputs(inputs: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(collect_pdf_files(input, recursive)?);
        } else {
            files.push(input.clone());
        }
    }

    let mut seen = HashSet::new();
    files.retain(|path| seen.insert(path.clone()));
    Ok(files)
}
