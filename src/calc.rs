use crate::grades;
use serde::{Deserialize, Serialize};

pub const OVERALL_GRADE: &str = "N/A";

/// 2-decimal rounding with halves rounded up, matching the UI:
/// `Math.round(100*x) / 100`
pub fn round_off_2_decimals(x: f64) -> f64 {
    ((100.0 * x) + 0.5).floor() / 100.0
}

pub fn percentage(marks: f64, total_marks: f64) -> f64 {
    if total_marks > 0.0 && marks.is_finite() {
        round_off_2_decimals(marks / total_marks * 100.0)
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub marks: f64,
    pub total_marks: f64,
    pub credits: f64,
    pub grade: String,
    pub grade_points: f64,
    pub percentage: f64,
}

impl Subject {
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && !self.grade.is_empty() && self.credits > 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CgpaResult {
    pub cgpa: f64,
    pub total_credits: f64,
    pub total_grade_points: f64,
    pub subjects: Vec<Subject>,
    pub grade: String,
    pub overall_percentage: f64,
    pub total_marks_obtained: f64,
    pub total_max_marks: f64,
}

impl CgpaResult {
    /// Result for a subject list with nothing to aggregate.
    pub fn empty() -> Self {
        Self {
            cgpa: 0.0,
            total_credits: 0.0,
            total_grade_points: 0.0,
            subjects: Vec::new(),
            grade: OVERALL_GRADE.to_string(),
            overall_percentage: 0.0,
            total_marks_obtained: 0.0,
            total_max_marks: 0.0,
        }
    }
}

/// Credit-weighted grade point average over the valid subjects.
///
/// The input is left untouched; the returned subjects are copies whose
/// `grade_points` were re-resolved from the grade table.
pub fn calculate_cgpa(subjects: &[Subject]) -> CgpaResult {
    let valid: Vec<Subject> = subjects
        .iter()
        .filter(|s| s.is_valid())
        .map(|s| Subject {
            grade_points: grades::grade_points(&s.grade),
            ..s.clone()
        })
        .collect();

    if valid.is_empty() {
        return CgpaResult::empty();
    }

    let mut total_credits = 0.0;
    let mut total_grade_points = 0.0;
    let mut total_marks_obtained = 0.0;
    let mut total_max_marks = 0.0;
    for s in &valid {
        total_credits += s.credits;
        total_grade_points += s.grade_points * s.credits;
        total_marks_obtained += s.marks;
        total_max_marks += s.total_marks;
    }

    let overall_percentage = if total_max_marks > 0.0 {
        total_marks_obtained / total_max_marks * 100.0
    } else {
        0.0
    };

    CgpaResult {
        cgpa: round_off_2_decimals(total_grade_points / total_credits),
        total_credits,
        total_grade_points,
        subjects: valid,
        grade: OVERALL_GRADE.to_string(),
        overall_percentage: round_off_2_decimals(overall_percentage),
        total_marks_obtained,
        total_max_marks,
    }
}
