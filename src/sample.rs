use crate::calc::Subject;
use crate::grades;
use rand::seq::SliceRandom;
use rand::Rng;

pub const SAMPLE_SUBJECT_NAMES: [&str; 9] = [
    "Mathematics",
    "Physics",
    "Chemistry",
    "Computer Science",
    "English",
    "Data Structures",
    "Algorithms",
    "Database Systems",
    "Operating Systems",
];

pub const SAMPLE_SIZE: usize = 6;

/// Placeholder subjects standing in for mark sheet extraction. Marks are not
/// extracted, so marks, totals and percentages stay at 0.
pub fn generate_sample_subjects<R: Rng + ?Sized>(rng: &mut R) -> Vec<Subject> {
    SAMPLE_SUBJECT_NAMES
        .iter()
        .take(SAMPLE_SIZE)
        .enumerate()
        .map(|(i, name)| {
            let grade = grades::SAMPLE_GRADES
                .choose(rng)
                .copied()
                .unwrap_or(grades::SAMPLE_GRADES[0]);
            Subject {
                id: format!("subject-{i}"),
                name: name.to_string(),
                marks: 0.0,
                total_marks: 0.0,
                credits: f64::from(rng.gen_range(3u8..=5)),
                grade: grade.to_string(),
                grade_points: grades::grade_points(grade),
                percentage: 0.0,
            }
        })
        .collect()
}
