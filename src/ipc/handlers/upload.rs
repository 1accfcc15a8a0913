use crate::ipc::error::ok;
use crate::ipc::helpers::{optional_str, required_str};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_upload_start(state: &mut AppState, req: &Request) -> serde_json::Value {
    let file_name = match required_str(req, "fileName") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let status = state
        .uploads
        .start(&file_name, optional_str(req, "mimeType"));
    ok(&req.id, json!(status))
}

fn handle_upload_status(state: &mut AppState, req: &Request) -> serde_json::Value {
    let ticket = req.params.get("ticket").and_then(|v| v.as_u64());
    ok(&req.id, json!(state.uploads.status(ticket)))
}

fn handle_upload_cancel(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!(state.uploads.cancel()))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "upload.start" => Some(handle_upload_start(state, req)),
        "upload.status" => Some(handle_upload_status(state, req)),
        "upload.cancel" => Some(handle_upload_cancel(state, req)),
        _ => None,
    }
}
