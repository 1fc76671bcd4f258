//! Sample attendance reports for demonstrations and tests
//!
//! Each variant renders a single A4 page. Text is set in the predefined
//! `STSong-Light` CID font with the `UniGB-UCS2-H` CMap, so strings are
//! written as UTF-16BE and both the Latin and the Japanese labels survive
//! text extraction.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, StringFormat};
use thiserror::Error;

const FONT_NAME: &str = "F1";
const FONT_SIZE: i64 = 12;
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const LEFT_MARGIN: i64 = 72;
const TOP_BASELINE: i64 = 770;
const LINE_HEIGHT: i64 = 20;

#[derive(Error, Debug)]
pub enum SampleError {
    #[error("failed to encode page content: {0}")]
    Encode(String),

    #[error("failed to write sample report {path:?}: {message}")]
    Write { path: PathBuf, message: String },
}

/// The report variants the validator is expected to tell apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SampleReport {
    /// Complete report: header, period, employee, attendance table, footer
    Valid,
    /// Period without attendance records
    NoData,
    /// Period written as `202509` instead of `yyyy-MM`
    InvalidFormat,
    /// No `KintaiSystem` header
    MissingHeader,
    /// No approval field and no page number
    MissingFooter,
}

impl SampleReport {
    pub const ALL: [SampleReport; 5] = [
        SampleReport::Valid,
        SampleReport::NoData,
        SampleReport::InvalidFormat,
        SampleReport::MissingHeader,
        SampleReport::MissingFooter,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SampleReport::Valid => "valid",
            SampleReport::NoData => "no_data",
            SampleReport::InvalidFormat => "invalid_format",
            SampleReport::MissingHeader => "missing_header",
            SampleReport::MissingFooter => "missing_footer",
        }
    }

    /// Default file name used by the demo
    pub fn file_name(self) -> String {
        format!("test_{}.pdf", self.name())
    }

    /// Whether the validator should accept this variant
    pub fn expected_pass(self) -> bool {
        matches!(self, SampleReport::Valid | SampleReport::NoData)
    }

    /// Text lines of the report, top to bottom
    pub fn lines(self, year_month: &str) -> Vec<String> {
        let header = "KintaiSystem".to_string();
        let period = format!("対象年月: {}", year_month);
        let employee = [
            "社員名: 田中太郎".to_string(),
            "社員コード: EMP001".to_string(),
        ];
        let footer = [
            "承認欄: _________________".to_string(),
            "ページ: 1/1".to_string(),
        ];

        let mut lines = Vec::new();
        match self {
            SampleReport::Valid => {
                lines.push(header);
                lines.push(period);
                lines.extend(employee);
                lines.extend(
                    [
                        "日付  出勤時間  退勤時間  勤務時間",
                        "01/01  09:00  18:00  8:00",
                        "01/02  09:15  18:15  8:00",
                        "01/03  09:00  17:30  8:30",
                    ]
                    .map(String::from),
                );
                lines.extend(footer);
            }
            SampleReport::NoData => {
                lines.push(header);
                lines.push(period);
                lines.push("データなし".to_string());
                lines.extend(footer);
            }
            SampleReport::InvalidFormat => {
                lines.push(header);
                lines.push("対象年月: 202509".to_string());
                lines.extend(employee);
                lines.extend(footer);
            }
            SampleReport::MissingHeader => {
                lines.push("勤怠レポート".to_string());
                lines.push(period);
                lines.extend(footer);
            }
            SampleReport::MissingFooter => {
                lines.push(header);
                lines.push(period);
                lines.extend(employee);
            }
        }
        lines
    }

    /// Render this variant to `path`
    pub fn write(self, path: &Path, year_month: &str) -> Result<(), SampleError> {
        let mut doc = render(&self.lines(year_month))?;

        let write_err = |message: String| SampleError::Write {
            path: path.to_path_buf(),
            message,
        };
        let file = File::create(path).map_err(|e| write_err(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        doc.save_to(&mut writer).map_err(|e| write_err(e.to_string()))?;
        writer.flush().map_err(|e| write_err(e.to_string()))?;

        tracing::debug!(path = %path.display(), variant = self.name(), "wrote sample report");
        Ok(())
    }
}

impl fmt::Display for SampleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Build a one-page document with one text object per line
fn render(lines: &[String]) -> Result<Document, SampleError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let descriptor_id = doc.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => "STSong-Light",
        "Flags" => 6,
        "FontBBox" => vec![(-25).into(), (-254).into(), 1000.into(), 880.into()],
        "ItalicAngle" => 0,
        "Ascent" => 880,
        "Descent" => -120,
        "CapHeight" => 880,
        "StemV" => 93,
    });
    let cid_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType0",
        "BaseFont" => "STSong-Light",
        "CIDSystemInfo" => dictionary! {
            "Registry" => Object::string_literal("Adobe"),
            "Ordering" => Object::string_literal("GB1"),
            "Supplement" => 4,
        },
        "FontDescriptor" => descriptor_id,
        "DW" => 1000,
    });
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => "STSong-Light-UniGB-UCS2-H",
        "Encoding" => "UniGB-UCS2-H",
        "DescendantFonts" => vec![cid_font_id.into()],
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_NAME => font_id,
        },
    });

    let mut operations = Vec::with_capacity(lines.len() * 5);
    for (index, line) in lines.iter().enumerate() {
        let baseline = TOP_BASELINE - LINE_HEIGHT * index as i64;
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![FONT_NAME.into(), FONT_SIZE.into()],
        ));
        operations.push(Operation::new(
            "Td",
            vec![LEFT_MARGIN.into(), baseline.into()],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(utf16_be(line), StringFormat::Hexadecimal)],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    let content = Content { operations };
    let encoded = content
        .encode()
        .map_err(|e| SampleError::Encode(e.to_string()))?;
    let content_id = doc.add_object(lopdf::Stream::new(dictionary! {}, encoded));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    Ok(doc)
}

fn utf16_be(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_be_bytes).collect()
}
