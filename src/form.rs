use crate::calc::{self, Subject};
use crate::grades;
use serde::Deserialize;
use uuid::Uuid;

pub const DEFAULT_TOTAL_MARKS: &str = "100";

/// Raw text of the "add subject" row. Numbers arrive as strings or JSON numbers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubjectDraft {
    pub name: Option<FormValue>,
    pub marks: Option<FormValue>,
    pub total_marks: Option<FormValue>,
    pub credits: Option<FormValue>,
    pub grade: Option<FormValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Number(f64),
    Text(String),
}

impl FormValue {
    pub fn as_text(&self) -> String {
        match self {
            FormValue::Number(n) => n.to_string(),
            FormValue::Text(s) => s.clone(),
        }
    }

    pub fn as_number(&self) -> f64 {
        match self {
            FormValue::Number(n) if n.is_finite() => *n,
            FormValue::Number(_) => 0.0,
            FormValue::Text(s) => coerce_number(s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectField {
    Name,
    Marks,
    TotalMarks,
    Credits,
    Grade,
}

impl SubjectField {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "name" => Some(Self::Name),
            "marks" => Some(Self::Marks),
            "totalMarks" => Some(Self::TotalMarks),
            "credits" => Some(Self::Credits),
            "grade" => Some(Self::Grade),
            _ => None,
        }
    }
}

/// Leading-prefix float parse with `parseFloat(x) || 0` semantics.
pub fn coerce_number(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return 0.0;
    }
    // Optional exponent, only taken when it has digits.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    match s[..end].parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

fn non_empty(v: &Option<FormValue>) -> Option<&FormValue> {
    v.as_ref().filter(|v| match v {
        FormValue::Text(s) => !s.trim().is_empty(),
        FormValue::Number(_) => true,
    })
}

/// Builds a subject from the add row. Returns the name of the first missing
/// required field on failure.
pub fn create_subject(draft: &SubjectDraft) -> Result<Subject, &'static str> {
    let name = non_empty(&draft.name).ok_or("name")?;
    let marks = non_empty(&draft.marks).ok_or("marks")?;
    let default_total = FormValue::Text(DEFAULT_TOTAL_MARKS.to_string());
    let total_marks = match &draft.total_marks {
        None => &default_total,
        Some(_) => non_empty(&draft.total_marks).ok_or("totalMarks")?,
    };
    let credits = non_empty(&draft.credits).ok_or("credits")?;

    let marks = marks.as_number();
    let total_marks = total_marks.as_number();
    let grade = draft
        .grade
        .as_ref()
        .map(|g| grades::normalize_symbol(&g.as_text()))
        .unwrap_or_default();

    Ok(Subject {
        id: format!("subject-{}", Uuid::new_v4()),
        name: name.as_text(),
        marks,
        total_marks,
        credits: credits.as_number(),
        grade_points: grades::grade_points(&grade),
        grade,
        percentage: calc::percentage(marks, total_marks),
    })
}

/// Applies one edited cell to a copy of `subject`.
pub fn update_subject(subject: &Subject, field: SubjectField, value: &FormValue) -> Subject {
    let mut updated = subject.clone();
    match field {
        SubjectField::Name => updated.name = value.as_text(),
        SubjectField::Credits => updated.credits = value.as_number(),
        SubjectField::Grade => {
            updated.grade = grades::normalize_symbol(&value.as_text());
            updated.grade_points = grades::grade_points(&updated.grade);
        }
        SubjectField::Marks | SubjectField::TotalMarks => {
            if field == SubjectField::Marks {
                updated.marks = value.as_number();
            } else {
                updated.total_marks = value.as_number();
            }
            updated.percentage = calc::percentage(updated.marks, updated.total_marks);
        }
    }
    updated
}
