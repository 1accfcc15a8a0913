#[path = "../src/calc.rs"]
mod calc;
#[path = "../src/export.rs"]
mod export;
#[path = "../src/grades.rs"]
mod grades;

use calc::{calculate_cgpa, Subject};
use chrono::{TimeZone, Utc};
use export::JsonExport;

fn subject(name: &str, grade: &str, credits: f64, marks: f64, total_marks: f64) -> Subject {
    Subject {
        id: format!("subject-{}", name),
        name: name.to_string(),
        marks,
        total_marks,
        credits,
        grade: grade.to_string(),
        grade_points: 0.0,
        percentage: calc::percentage(marks, total_marks),
    }
}

fn contains(haystack: &[u8], needle: &str) -> bool {
    haystack
        .windows(needle.len())
        .any(|w| w == needle.as_bytes())
}

#[test]
fn json_export_round_trips_the_result() {
    let result = calculate_cgpa(&[
        subject("Mathematics", "O", 3.0, 45.0, 50.0),
        subject("English", "B", 2.0, 33.0, 50.0),
    ]);
    let at = Utc.with_ymd_and_hms(2025, 3, 9, 14, 5, 7).unwrap();
    let rendered = export::render_json(&result, at).expect("render json");

    assert_eq!(rendered.file_name, "cgpa-results-2025-03-09.json");
    assert!(rendered.content.contains("\n  \"cgpa\": 8.4"));

    let parsed: JsonExport = serde_json::from_str(&rendered.content).expect("parse export");
    assert_eq!(parsed.result, result);
    assert_eq!(parsed.generated_at, "2025-03-09T14:05:07.000Z");

    let raw: serde_json::Value = serde_json::from_str(&rendered.content).expect("parse raw");
    for key in [
        "cgpa",
        "grade",
        "overallPercentage",
        "totalCredits",
        "totalMarksObtained",
        "totalMaxMarks",
        "totalGradePoints",
        "subjects",
        "generatedAt",
    ] {
        assert!(raw.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(raw["subjects"][0]["gradePoints"], serde_json::json!(10.0));
}

#[test]
fn pdf_export_lays_out_summary_and_table() {
    let result = calculate_cgpa(&[
        subject("Mathematics", "O", 3.0, 45.0, 50.0),
        subject("English (Core)", "B", 2.0, 33.0, 50.0),
    ]);
    let rendered = export::render_pdf(&result).expect("render pdf");

    assert!(rendered.bytes.starts_with(b"%PDF-1.5"));
    assert_eq!(rendered.page_count, 1);
    for text in [
        "CGPA Result",
        "CGPA: 8.4",
        "Grade: N/A",
        "Overall Percentage: 78%",
        "Total Credits: 5",
        "Total Marks Obtained: 78",
        "Total Max Marks: 100",
        "Subjects:",
        "Name",
        "Credits",
        "Points",
        "45/50",
        "Helvetica-Bold",
    ] {
        assert!(contains(&rendered.bytes, text), "pdf missing {:?}", text);
    }

    let doc = lopdf::Document::load_mem(&rendered.bytes).expect("reload pdf");
    assert_eq!(doc.get_pages().len(), 1);
}

#[test]
fn long_subject_lists_continue_on_new_pages() {
    let subjects: Vec<Subject> = (0..40)
        .map(|i| subject(&format!("Elective {}", i), "A", 2.0, 40.0, 50.0))
        .collect();
    let result = calculate_cgpa(&subjects);
    let rendered = export::render_pdf(&result).expect("render pdf");

    // 16 rows fit under the first header, 26 under each continuation header.
    assert_eq!(rendered.page_count, 2);
    let doc = lopdf::Document::load_mem(&rendered.bytes).expect("reload pdf");
    assert_eq!(doc.get_pages().len(), 2);
    assert!(contains(&rendered.bytes, "Elective 39"));
}

#[test]
fn empty_result_still_renders_a_report() {
    let rendered = export::render_pdf(&calc::CgpaResult::empty()).expect("render pdf");
    assert_eq!(rendered.page_count, 1);
    assert!(contains(&rendered.bytes, "CGPA: 0"));
}
