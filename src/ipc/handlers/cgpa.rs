use crate::calc::{self, Subject};
use crate::grades;
use crate::ipc::error::ok;
use crate::ipc::helpers::required_param;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_grades_table(req: &Request) -> serde_json::Value {
    let grades: Vec<serde_json::Value> = grades::GRADE_TABLE
        .iter()
        .map(|(symbol, points)| json!({ "grade": symbol, "gradePoints": points }))
        .collect();
    ok(&req.id, json!({ "grades": grades }))
}

fn handle_cgpa_calculate(req: &Request) -> serde_json::Value {
    let subjects: Vec<Subject> = match required_param(req, "subjects") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let result = calc::calculate_cgpa(&subjects);
    ok(&req.id, json!({ "result": result }))
}

pub fn try_handle(_state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "grades.table" => Some(handle_grades_table(req)),
        "cgpa.calculate" => Some(handle_cgpa_calculate(req)),
        _ => None,
    }
}
