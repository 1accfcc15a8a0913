use std::path::PathBuf;

use rusqlite::Connection;
use serde::Deserialize;

use crate::config::Config;
use crate::upload::UploadSimulator;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub db: Option<Connection>,
    pub uploads: UploadSimulator,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            workspace: None,
            db: None,
            uploads: UploadSimulator::new(config.upload_delay),
        }
    }
}
