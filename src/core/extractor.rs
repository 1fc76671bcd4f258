//! PDF text extraction

use std::fs::File;
use std::io::{self, Read};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Why the text of a document could not be extracted
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("not a PDF file (missing %PDF- header): {0:?}")]
    NotPdf(PathBuf),

    #[error("failed to parse PDF {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("PDF parser panicked on {0:?}")]
    Panic(PathBuf),
}

/// Page-ordered text extraction
///
/// Implementations return one string per page, first page first.
pub trait TextExtractor: Send + Sync {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, ExtractError>;
}

/// Extractor backed by `lopdf`
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

impl TextExtractor for LopdfExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, ExtractError> {
        check_header(path)?;

        // lopdf can panic on malformed input
        let path_clone = path.to_path_buf();
        match panic::catch_unwind(AssertUnwindSafe(|| load_page_texts(&path_clone))) {
            Ok(result) => result,
            Err(_panic) => Err(ExtractError::Panic(path.to_path_buf())),
        }
    }
}

/// Cheap rejection of non-PDF input before the full parse
fn check_header(path: &Path) -> Result<(), ExtractError> {
    let io_err = |source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let mut header = Vec::with_capacity(5);
    file.take(5).read_to_end(&mut header).map_err(io_err)?;

    if header != b"%PDF-" {
        return Err(ExtractError::NotPdf(path.to_path_buf()));
    }
    Ok(())
}

fn load_page_texts(path: &Path) -> Result<Vec<String>, ExtractError> {
    let parse_err = |e: lopdf::Error| ExtractError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let doc = lopdf::Document::load(path).map_err(parse_err)?;

    // get_pages() is keyed by 1-based page number, so iteration is in page order
    let pages = doc.get_pages();
    let mut texts = Vec::with_capacity(pages.len());
    for &page_number in pages.keys() {
        texts.push(doc.extract_text(&[page_number]).map_err(parse_err)?);
    }

    tracing::debug!(path = %path.display(), pages = texts.len(), "extracted page text");
    Ok(texts)
}

/// Join page texts into the document text: every page followed by a newline
pub fn join_pages(pages: &[String]) -> String {
    let mut text = String::with_capacity(pages.iter().map(|p| p.len() + 1).sum());
    for page in pages {
        text.push_str(page);
        text.push('\n');
    }
    text
}
