#[path = "../src/calc.rs"]
mod calc;
#[path = "../src/form.rs"]
mod form;
#[path = "../src/grades.rs"]
mod grades;

use form::{create_subject, update_subject, FormValue, SubjectDraft, SubjectField};
use serde_json::json;

fn draft(value: serde_json::Value) -> SubjectDraft {
    serde_json::from_value(value).expect("parse draft")
}

#[test]
fn create_derives_grade_points_and_percentage() {
    let subject = create_subject(&draft(json!({
        "name": "Physics",
        "marks": "45",
        "totalMarks": "50",
        "credits": "4",
        "grade": " a+ "
    })))
    .expect("create subject");

    assert!(subject.id.starts_with("subject-"));
    assert_eq!(subject.name, "Physics");
    assert_eq!(subject.marks, 45.0);
    assert_eq!(subject.total_marks, 50.0);
    assert_eq!(subject.credits, 4.0);
    assert_eq!(subject.grade, "A+");
    assert_eq!(subject.grade_points, 9.0);
    assert_eq!(subject.percentage, 90.0);
}

#[test]
fn create_accepts_numbers_and_defaults_total_marks() {
    let subject = create_subject(&draft(json!({
        "name": "English",
        "marks": 72,
        "credits": 3
    })))
    .expect("create subject");
    assert_eq!(subject.total_marks, 100.0);
    assert_eq!(subject.percentage, 72.0);
    assert_eq!(subject.grade, "");
    assert_eq!(subject.grade_points, 0.0);
}

#[test]
fn create_rejects_missing_required_fields() {
    let missing_name = create_subject(&draft(json!({ "marks": "1", "credits": "3" })));
    assert_eq!(missing_name.err(), Some("name"));

    let blank_marks = create_subject(&draft(json!({ "name": "X", "marks": "  ", "credits": "3" })));
    assert_eq!(blank_marks.err(), Some("marks"));

    let blank_total = create_subject(&draft(json!({
        "name": "X", "marks": "3", "totalMarks": "", "credits": "3"
    })));
    assert_eq!(blank_total.err(), Some("totalMarks"));

    let missing_credits = create_subject(&draft(json!({ "name": "X", "marks": "3" })));
    assert_eq!(missing_credits.err(), Some("credits"));
}

#[test]
fn malformed_numbers_degrade_to_zero() {
    let subject = create_subject(&draft(json!({
        "name": "Chemistry",
        "marks": "forty",
        "totalMarks": "50 marks",
        "credits": "3.5cr",
        "grade": "b"
    })))
    .expect("create subject");
    assert_eq!(subject.marks, 0.0);
    assert_eq!(subject.total_marks, 50.0);
    assert_eq!(subject.credits, 3.5);
    assert_eq!(subject.percentage, 0.0);

    let zero_total = create_subject(&draft(json!({
        "name": "Chemistry",
        "marks": "12",
        "totalMarks": "0",
        "credits": "3"
    })))
    .expect("create subject");
    assert_eq!(zero_total.percentage, 0.0);
}

#[test]
fn update_recomputes_percentage_and_keeps_grade() {
    let original = create_subject(&draft(json!({
        "name": "Algorithms",
        "marks": "40",
        "totalMarks": "50",
        "credits": "4",
        "grade": "A"
    })))
    .expect("create subject");

    let marks_edit = update_subject(&original, SubjectField::Marks, &FormValue::Text("45".into()));
    assert_eq!(marks_edit.percentage, 90.0);
    assert_eq!(marks_edit.grade, "A");
    assert_eq!(marks_edit.grade_points, 8.0);
    assert_eq!(original.marks, 40.0);

    let total_edit = update_subject(&marks_edit, SubjectField::TotalMarks, &FormValue::Number(60.0));
    assert_eq!(total_edit.percentage, 75.0);

    let credits_edit = update_subject(&total_edit, SubjectField::Credits, &FormValue::Text("x".into()));
    assert_eq!(credits_edit.credits, 0.0);
    assert!(!credits_edit.is_valid());

    let grade_edit = update_subject(&total_edit, SubjectField::Grade, &FormValue::Text("o".into()));
    assert_eq!(grade_edit.grade, "O");
    assert_eq!(grade_edit.grade_points, 10.0);

    let name_edit = update_subject(&total_edit, SubjectField::Name, &FormValue::Text("".into()));
    assert_eq!(name_edit.name, "");
    assert!(!name_edit.is_valid());
}

#[test]
fn field_names_follow_the_wire_format() {
    assert_eq!(SubjectField::parse("totalMarks"), Some(SubjectField::TotalMarks));
    assert_eq!(SubjectField::parse("total_marks"), None);
    assert_eq!(SubjectField::parse("gradePoints"), None);
}
