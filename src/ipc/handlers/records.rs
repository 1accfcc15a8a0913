use crate::db::{self, RecordError};
use crate::ipc::error::{bad_params, err, ok};
use crate::ipc::helpers::db_conn;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_records_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(e) => return e,
    };
    let Some(name) = req.params.get("name").and_then(|v| v.as_str()) else {
        return bad_params(&req.id, "missing name");
    };
    let Some(cgpa) = req.params.get("cgpa").and_then(|v| v.as_f64()) else {
        return bad_params(&req.id, "missing cgpa");
    };
    let client_seq = match req.params.get("clientSeq") {
        None | Some(serde_json::Value::Null) => None,
        Some(v) => match v.as_i64() {
            Some(seq) => Some(seq),
            None => return bad_params(&req.id, "clientSeq must be an integer"),
        },
    };

    match db::insert_record(conn, name, cgpa, client_seq) {
        Ok(record) => {
            tracing::info!(seq = record.seq, name = %record.name, cgpa = record.cgpa, "record saved");
            ok(&req.id, json!({ "record": record }))
        }
        Err(RecordError::Stale { name, latest, got }) => {
            tracing::warn!(%name, latest, got, "dropping out-of-order record");
            err(
                &req.id,
                "stale_write",
                format!("clientSeq {} is not after {}", got, latest),
                Some(json!({ "name": name, "latestClientSeq": latest, "clientSeq": got })),
            )
        }
        Err(e @ (RecordError::MissingName | RecordError::InvalidCgpa(_))) => {
            bad_params(&req.id, e.to_string())
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to save record");
            err(
                &req.id,
                "db_insert_failed",
                e.to_string(),
                Some(json!({ "table": "cgpa_records" })),
            )
        }
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "records.create" => Some(handle_records_create(state, req)),
        _ => None,
    }
}
