use crate::calc::Subject;
use crate::form::{self, FormValue, SubjectDraft, SubjectField};
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{required_param, required_str};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_subjects_create(req: &Request) -> serde_json::Value {
    let draft: SubjectDraft = match required_param(req, "draft") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match form::create_subject(&draft) {
        Ok(subject) => ok(&req.id, json!({ "subject": subject })),
        Err(field) => err(
            &req.id,
            "bad_params",
            format!("{} is required", field),
            Some(json!({ "field": field })),
        ),
    }
}

fn handle_subjects_update(req: &Request) -> serde_json::Value {
    let subject: Subject = match required_param(req, "subject") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let field_name = match required_str(req, "field") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let Some(field) = SubjectField::parse(&field_name) else {
        return err(
            &req.id,
            "bad_params",
            "field must be one of: name, marks, totalMarks, credits, grade",
            Some(json!({ "field": field_name })),
        );
    };
    let value: FormValue = match required_param(req, "value") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let updated = form::update_subject(&subject, field, &value);
    ok(&req.id, json!({ "subject": updated }))
}

pub fn try_handle(_state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "subjects.create" => Some(handle_subjects_create(req)),
        "subjects.update" => Some(handle_subjects_update(req)),
        _ => None,
    }
}
