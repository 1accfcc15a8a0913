use crate::calc::CgpaResult;
use anyhow::{anyhow, Context};
use chrono::{DateTime, SecondsFormat, Utc};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const PDF_FILE_NAME: &str = "cgpa_result_text.pdf";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonExport {
    #[serde(flatten)]
    pub result: CgpaResult,
    pub generated_at: String,
}

#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

#[derive(Debug, Clone)]
pub struct RenderedJson {
    pub file_name: String,
    pub content: String,
}

pub fn json_file_name(at: DateTime<Utc>) -> String {
    format!("cgpa-results-{}.json", at.format("%Y-%m-%d"))
}

pub fn render_json(result: &CgpaResult, at: DateTime<Utc>) -> anyhow::Result<RenderedJson> {
    let doc = JsonExport {
        result: result.clone(),
        generated_at: at.to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    let content = serde_json::to_string_pretty(&doc).context("failed to serialize result")?;
    Ok(RenderedJson {
        file_name: json_file_name(at),
        content,
    })
}

// Layout in millimetres from the top-left corner of an A4 page.
const PAGE_WIDTH_MM: f64 = 210.0;
const PAGE_HEIGHT_MM: f64 = 297.0;
const PT_PER_MM: f64 = 72.0 / 25.4;
const LEFT_MM: f64 = 20.0;
const TITLE_Y_MM: f64 = 20.0;
const SUMMARY_Y_MM: f64 = 40.0;
const LINE_HEIGHT_MM: f64 = 10.0;
const SUBJECTS_LABEL_Y_MM: f64 = 105.0;
const TABLE_Y_MM: f64 = 115.0;
const CONTINUATION_TABLE_Y_MM: f64 = 20.0;
const TABLE_BOTTOM_MM: f64 = 280.0;
const COLUMNS_MM: [f64; 5] = [20.0, 70.0, 100.0, 130.0, 160.0];
const COLUMN_HEADERS: [&str; 5] = ["Name", "Credits", "Marks", "Grade", "Points"];
const TITLE_SIZE: i64 = 18;
const BODY_SIZE: i64 = 12;
// No font metrics are embedded; Helvetica averages about half an em per glyph.
const AVG_GLYPH_EM: f64 = 0.5;

#[derive(Clone, Copy)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

struct PageBuilder {
    ops: Vec<Operation>,
}

impl PageBuilder {
    fn new() -> Self {
        Self { ops: Vec::new() }
    }

    fn text(&mut self, font: Font, size: i64, x_mm: f64, y_mm: f64, text: &str) {
        let x = x_mm * PT_PER_MM;
        let y = (PAGE_HEIGHT_MM - y_mm) * PT_PER_MM;
        self.ops.push(Operation::new("BT", vec![]));
        self.ops.push(Operation::new(
            "Tf",
            vec![font.resource().into(), size.into()],
        ));
        self.ops
            .push(Operation::new("Td", vec![(x as f32).into(), (y as f32).into()]));
        self.ops.push(Operation::new(
            "Tj",
            vec![Object::string_literal(pdf_text(text))],
        ));
        self.ops.push(Operation::new("ET", vec![]));
    }

    fn centered(&mut self, font: Font, size: i64, center_mm: f64, y_mm: f64, text: &str) {
        let width_mm = text.chars().count() as f64 * size as f64 * AVG_GLYPH_EM / PT_PER_MM;
        self.text(font, size, center_mm - width_mm / 2.0, y_mm, text);
    }

    fn table_header(&mut self, y_mm: f64) {
        for (x, label) in COLUMNS_MM.iter().zip(COLUMN_HEADERS) {
            self.text(Font::Bold, BODY_SIZE, *x, y_mm, label);
        }
    }
}

/// Standard Type1 fonts only cover Latin-1; anything else prints as '?'.
fn pdf_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if (c as u32) < 0x100 { c as u8 } else { b'?' })
        .collect()
}

fn summary_lines(result: &CgpaResult) -> [String; 6] {
    [
        format!("CGPA: {}", result.cgpa),
        format!("Grade: {}", result.grade),
        format!("Overall Percentage: {}%", result.overall_percentage),
        format!("Total Credits: {}", result.total_credits),
        format!("Total Marks Obtained: {}", result.total_marks_obtained),
        format!("Total Max Marks: {}", result.total_max_marks),
    ]
}

fn layout_pages(result: &CgpaResult) -> Vec<PageBuilder> {
    let mut pages = Vec::new();
    let mut page = PageBuilder::new();

    page.centered(Font::Bold, TITLE_SIZE, PAGE_WIDTH_MM / 2.0, TITLE_Y_MM, "CGPA Result");
    for (i, line) in summary_lines(result).iter().enumerate() {
        let y = SUMMARY_Y_MM + LINE_HEIGHT_MM * i as f64;
        page.text(Font::Regular, BODY_SIZE, LEFT_MM, y, line);
    }
    page.text(Font::Regular, BODY_SIZE, LEFT_MM, SUBJECTS_LABEL_Y_MM, "Subjects:");
    page.table_header(TABLE_Y_MM);

    let mut y = TABLE_Y_MM;
    for subject in &result.subjects {
        y += LINE_HEIGHT_MM;
        if y > TABLE_BOTTOM_MM {
            pages.push(page);
            page = PageBuilder::new();
            page.table_header(CONTINUATION_TABLE_Y_MM);
            y = CONTINUATION_TABLE_Y_MM + LINE_HEIGHT_MM;
        }
        let cells = [
            subject.name.clone(),
            subject.credits.to_string(),
            format!("{}/{}", subject.marks, subject.total_marks),
            subject.grade.clone(),
            subject.grade_points.to_string(),
        ];
        for (x, cell) in COLUMNS_MM.iter().zip(cells.iter()) {
            page.text(Font::Regular, BODY_SIZE, *x, y, cell);
        }
    }
    pages.push(page);
    pages
}

/// Renders the tabular result report. Content streams are left uncompressed.
pub fn render_pdf(result: &CgpaResult) -> anyhow::Result<RenderedPdf> {
    let mut doc = Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in layout_pages(result) {
        let content = Content {
            operations: page.ops,
        };
        let encoded = content
            .encode()
            .map_err(|e| anyhow!("failed to encode page content: {e}"))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len();
    let media_box: Vec<Object> = vec![
        Object::Integer(0),
        Object::Integer(0),
        ((PAGE_WIDTH_MM * PT_PER_MM) as f32).into(),
        ((PAGE_HEIGHT_MM * PT_PER_MM) as f32).into(),
    ];
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| anyhow!("failed to write pdf: {e}"))?;
    Ok(RenderedPdf { bytes, page_count })
}

pub fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.to_string_lossy()))?;
    }
    std::fs::write(path, bytes)
        .with_context(|| format!("failed to write {}", path.to_string_lossy()))
}
