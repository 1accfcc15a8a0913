/// Letter grade to grade point table, in display order.
pub const GRADE_TABLE: [(&str, f64); 8] = [
    ("O", 10.0),
    ("A+", 9.0),
    ("A", 8.0),
    ("B+", 7.0),
    ("B", 6.0),
    ("C", 5.0),
    ("P", 4.0),
    ("F", 0.0),
];

/// Symbols the sample generator draws from (every passing grade).
pub const SAMPLE_GRADES: [&str; 7] = ["O", "A+", "A", "B+", "B", "C", "P"];

pub fn lookup(symbol: &str) -> Option<f64> {
    GRADE_TABLE
        .iter()
        .find(|(s, _)| *s == symbol)
        .map(|(_, points)| *points)
}

/// Unknown symbols are worth 0 points.
pub fn grade_points(symbol: &str) -> f64 {
    lookup(symbol).unwrap_or(0.0)
}

pub fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}
