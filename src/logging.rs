use std::{
    fs::{self, File, OpenOptions},
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::app::settings::config_dir;

pub fn default_log_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("skyclock.log"))
}

/// Installs the global subscriber writing to `path`. The terminal belongs to
/// the UI, so nothing is ever written to stdout or stderr.
pub fn init(path: &Path) -> anyhow::Result<()> {
    let file = open_log_file(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| anyhow::anyhow!("installing log subscriber failed: {err}"))
}

fn open_log_file(path: &Path) -> anyhow::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("creating log directory failed")?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {} failed", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_is_created_with_parents() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("skyclock.log");
        open_log_file(&path).expect("open log");
        assert!(path.exists());
    }
}
