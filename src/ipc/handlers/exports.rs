use crate::calc::CgpaResult;
use crate::export;
use crate::ipc::error::{bad_params, err, ok};
use crate::ipc::helpers::{optional_path, required_param};
use crate::ipc::types::{AppState, Request};
use chrono::Utc;
use serde_json::json;

fn export_failed(req: &Request, e: anyhow::Error) -> serde_json::Value {
    tracing::error!(method = %req.method, error = %e, "export failed");
    err(&req.id, "export_failed", format!("{e:#}"), None)
}

fn handle_export_json(req: &Request) -> serde_json::Value {
    let result: CgpaResult = match required_param(req, "result") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let rendered = match export::render_json(&result, Utc::now()) {
        Ok(r) => r,
        Err(e) => return export_failed(req, e),
    };

    let mut out = json!({
        "fileName": rendered.file_name,
        "content": rendered.content,
    });
    if let Some(dir) = optional_path(req, "outDir") {
        let path = dir.join(&rendered.file_name);
        if let Err(e) = export::write_file(&path, rendered.content.as_bytes()) {
            return export_failed(req, e);
        }
        tracing::info!(path = %path.display(), "json export written");
        out["path"] = json!(path.to_string_lossy());
    }
    ok(&req.id, out)
}

fn handle_export_pdf(req: &Request) -> serde_json::Value {
    let result: CgpaResult = match required_param(req, "result") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let path = match (optional_path(req, "outPath"), optional_path(req, "outDir")) {
        (Some(p), _) => p,
        (None, Some(dir)) => dir.join(export::PDF_FILE_NAME),
        (None, None) => return bad_params(&req.id, "missing outPath or outDir"),
    };

    let rendered = match export::render_pdf(&result) {
        Ok(r) => r,
        Err(e) => return export_failed(req, e),
    };
    if let Err(e) = export::write_file(&path, &rendered.bytes) {
        return export_failed(req, e);
    }
    tracing::info!(path = %path.display(), pages = rendered.page_count, "pdf export written");
    ok(
        &req.id,
        json!({
            "path": path.to_string_lossy(),
            "pageCount": rendered.page_count,
            "bytes": rendered.bytes.len(),
        }),
    )
}

pub fn try_handle(_state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "export.json" => Some(handle_export_json(req)),
        "export.pdf" => Some(handle_export_pdf(req)),
        _ => None,
    }
}
