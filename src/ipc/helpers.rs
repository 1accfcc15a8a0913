use crate::ipc::error::{bad_params, err};
use crate::ipc::types::{AppState, Request};
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::path::PathBuf;

pub fn required_str(req: &Request, key: &str) -> Result<String, serde_json::Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|v| v.to_string())
        .ok_or_else(|| bad_params(&req.id, format!("missing {}", key)))
}

pub fn optional_str<'a>(req: &'a Request, key: &str) -> Option<&'a str> {
    req.params.get(key).and_then(|v| v.as_str())
}

pub fn optional_path(req: &Request, key: &str) -> Option<PathBuf> {
    optional_str(req, key)
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
}

/// Deserializes `params[key]` into `T`, reporting serde's message on failure.
pub fn required_param<T: DeserializeOwned>(
    req: &Request,
    key: &str,
) -> Result<T, serde_json::Value> {
    let Some(raw) = req.params.get(key) else {
        return Err(bad_params(&req.id, format!("missing {}", key)));
    };
    serde_json::from_value(raw.clone()).map_err(|e| {
        err(
            &req.id,
            "bad_params",
            format!("invalid {}: {}", key, e),
            Some(json!({ "param": key })),
        )
    })
}

pub fn db_conn<'a>(state: &'a AppState, req: &Request) -> Result<&'a Connection, serde_json::Value> {
    state
        .db
        .as_ref()
        .ok_or_else(|| err(&req.id, "no_workspace", "select a workspace first", None))
}
