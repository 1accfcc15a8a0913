use anyhow::{anyhow, Context};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::metadata::LevelFilter;

pub const ENV_WORKSPACE: &str = "CGPAD_WORKSPACE";
pub const ENV_UPLOAD_DELAY_MS: &str = "CGPAD_UPLOAD_DELAY_MS";
pub const ENV_LOG: &str = "CGPAD_LOG";

pub const DEFAULT_UPLOAD_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
pub struct Config {
    /// Workspace opened before the first request, if any.
    pub workspace: Option<PathBuf>,
    pub upload_delay: Duration,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace: None,
            upload_delay: DEFAULT_UPLOAD_DELAY,
            log_level: LevelFilter::INFO,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(ws) = get(ENV_WORKSPACE) {
            cfg.workspace = Some(PathBuf::from(ws.trim()));
        }
        if let Some(ms) = get(ENV_UPLOAD_DELAY_MS) {
            let ms: u64 = ms
                .trim()
                .parse()
                .with_context(|| format!("{ENV_UPLOAD_DELAY_MS} must be milliseconds, got {ms:?}"))?;
            cfg.upload_delay = Duration::from_millis(ms);
        }
        if let Some(level) = get(ENV_LOG) {
            cfg.log_level = LevelFilter::from_str(level.trim())
                .map_err(|_| anyhow!("{ENV_LOG} must be a log level, got {level:?}"))?;
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = Config::from_lookup(lookup(&[])).expect("config");
        assert!(cfg.workspace.is_none());
        assert_eq!(cfg.upload_delay, DEFAULT_UPLOAD_DELAY);
        assert_eq!(cfg.log_level, LevelFilter::INFO);
    }

    #[test]
    fn values_are_read_and_validated() {
        let cfg = Config::from_lookup(lookup(&[
            (ENV_WORKSPACE, "/tmp/cgpa-ws"),
            (ENV_UPLOAD_DELAY_MS, "25"),
            (ENV_LOG, "debug"),
        ]))
        .expect("config");
        assert_eq!(cfg.workspace, Some(PathBuf::from("/tmp/cgpa-ws")));
        assert_eq!(cfg.upload_delay, Duration::from_millis(25));
        assert_eq!(cfg.log_level, LevelFilter::DEBUG);

        assert!(Config::from_lookup(lookup(&[(ENV_UPLOAD_DELAY_MS, "soon")])).is_err());
        assert!(Config::from_lookup(lookup(&[(ENV_LOG, "loud")])).is_err());
    }
}
