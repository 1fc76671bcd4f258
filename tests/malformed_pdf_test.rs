//! Integration tests for malformed PDF handling
//!
//! Malformed input must always come back as a failing verdict, never as a
//! panic escaping `validate`.

use kintai_report_validator::prelude::*;
use std::io::Write;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;

/// Helper to create a test PDF file with given content
fn create_test_file(content: &[u8]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

fn assert_fails(content: &[u8], what: &str) {
    let temp_file = create_test_file(content);
    let verdict = validate_report(temp_file.path());
    assert!(!verdict.overall_pass(), "{} should not pass", what);
}

/// Test PDF with corrupted header
#[test]
fn test_corrupted_header() {
    let test_cases = vec![
        b"PDF-1.7\nKintaiSystem 2025-01\n%%EOF".as_slice(), // Missing %
        b"$PDF-1.7\nKintaiSystem 2025-01\n%%EOF".as_slice(), // Wrong character
        b"%pdf-1.7\nKintaiSystem 2025-01\n%%EOF".as_slice(), // Lowercase
        b"%PD-1.7\nKintaiSystem 2025-01\n%%EOF".as_slice(),  // Missing F
    ];

    for (idx, content) in test_cases.iter().enumerate() {
        let temp_file = create_test_file(content);
        let verdict = validate_report(temp_file.path());
        assert!(
            verdict.error().is_some(),
            "Test case {} should be an extraction error (corrupted header)",
            idx
        );
        assert!(!verdict.overall_pass());
    }
}

/// Test files too short to hold a header
#[test]
fn test_files_below_minimum_size() {
    let test_cases = vec![
        b"".as_slice(),
        b"%".as_slice(),
        b"%P".as_slice(),
        b"%PD".as_slice(),
        b"%PDF".as_slice(),
    ];

    for (idx, content) in test_cases.iter().enumerate() {
        let temp_file = create_test_file(content);
        let verdict = validate_report(temp_file.path());
        assert!(
            verdict.error().is_some(),
            "Test case {} (size {}) should be an extraction error",
            idx,
            content.len()
        );
    }
}

/// Report text in a file that is not a parseable PDF still fails
#[test]
fn test_plain_text_report_is_not_accepted() {
    assert_fails(
        "%PDF-1.7\nKintaiSystem\n2025-01\n社員名: 田中太郎 EMP001\n01/01 09:00\n承認欄\nページ: 1/1\n%%EOF"
            .as_bytes(),
        "unparseable report text",
    );
}

/// Test PDF with corrupted object structure
#[test]
fn test_corrupted_object_structure() {
    let test_cases = vec![
        // Unclosed dictionary
        b"%PDF-1.7\n1 0 obj\n<<\nendobj\n%%EOF".as_slice(),
        // Invalid object reference
        b"%PDF-1.7\n1 0 obj\n<< /Type /Catalog /Pages 999 0 R >>\nendobj\n%%EOF".as_slice(),
        // Malformed object number
        b"%PDF-1.7\nA B obj\n<<>>\nendobj\n%%EOF".as_slice(),
        // Missing endobj
        b"%PDF-1.7\n1 0 obj\n<<>>\n%%EOF".as_slice(),
    ];

    for (idx, content) in test_cases.iter().enumerate() {
        assert_fails(content, &format!("corrupted structure case {}", idx));
    }
}

/// Test PDF with incorrect object offsets in xref
#[test]
fn test_incorrect_xref_offsets() {
    let content = b"%PDF-1.7\n\
        1 0 obj\n\
        << /Type /Catalog >>\n\
        endobj\n\
        xref\n\
        0 2\n\
        0000000000 65535 f\n\
        9999999999 00000 n\n\
        trailer\n\
        << /Size 2 /Root 1 0 R >>\n\
        startxref\n\
        50\n\
        %%EOF";

    assert_fails(content, "PDF with bad xref offsets");
}

/// Test PDF with circular references (if not caught, could cause infinite loop)
#[test]
fn test_circular_references() {
    let content = b"%PDF-1.7\n\
        1 0 obj\n\
        << /Type /Catalog /Pages 2 0 R >>\n\
        endobj\n\
        2 0 obj\n\
        << /Type /Pages /Kids [3 0 R] /Count 1 >>\n\
        endobj\n\
        3 0 obj\n\
        << /Type /Page /Parent 2 0 R /Contents 3 0 R >>\n\
        endobj\n\
        %%EOF";

    let temp_file = create_test_file(content);

    let start = Instant::now();
    let verdict = validate_report(temp_file.path());
    let elapsed = start.elapsed();

    assert!(!verdict.overall_pass());
    assert!(
        elapsed < Duration::from_secs(5),
        "Validation should not hang on circular references (took {:?})",
        elapsed
    );
}

/// Test PDF with extremely nested structures
#[test]
fn test_deeply_nested_structures() {
    let mut content = Vec::from(b"%PDF-1.7\n1 0 obj\n".as_slice());
    content.extend(std::iter::repeat(b'[').take(100));
    content.extend(std::iter::repeat(b']').take(100));
    content.extend_from_slice(b"\nendobj\n%%EOF");

    let temp_file = create_test_file(&content);

    let start = Instant::now();
    let verdict = validate_report(temp_file.path());
    let elapsed = start.elapsed();

    assert!(!verdict.overall_pass());
    assert!(
        elapsed < Duration::from_secs(5),
        "Validation should handle deep nesting (took {:?})",
        elapsed
    );
}

/// Test PDF with compression that might fail
#[test]
fn test_corrupted_compressed_stream() {
    let content = b"%PDF-1.7\n\
        1 0 obj\n\
        << /Length 20 /Filter /FlateDecode >>\n\
        stream\n\
        INVALID ZLIB DATA!\n\
        endstream\n\
        endobj\n\
        %%EOF";

    assert_fails(content, "PDF with a corrupted stream");
}

/// Test handling of files that claim to be PDFs but aren't
#[test]
fn test_fake_pdf_extensions() {
    let mut content = Vec::from(b"\xFF\xD8\xFF\xE0".as_slice());
    content.extend_from_slice(b"\x00\x10JFIF");

    let temp_file = create_test_file(&content);
    let verdict = validate_report(temp_file.path());
    assert!(
        verdict.error().is_some(),
        "JPEG file should not be read as a PDF"
    );
}
