//! Per-user directories for imgrate's config and logs.
//!
//! Everything lives under `<base>/.imgrate`, where `<base>` is the OS config
//! directory unless `IMGRATE_CONFIG_HOME` names another one.

use std::{
    fs, io,
    path::PathBuf,
    sync::{LazyLock, Mutex},
};

use directories::BaseDirs;
use thiserror::Error;

/// Folder created under the config base.
pub const APP_DIR_NAME: &str = ".imgrate";
/// Overrides the config base when set.
pub const CONFIG_HOME_ENV: &str = "IMGRATE_CONFIG_HOME";
const LOGS_DIR_NAME: &str = "logs";

static BASE_OVERRIDE: LazyLock<Mutex<Option<PathBuf>>> = LazyLock::new(|| Mutex::new(None));

#[derive(Debug, Error)]
pub enum AppDirError {
    #[error("Could not locate a config directory for imgrate")]
    NoBaseDir,
    #[error("Could not create directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
}

/// `<base>/.imgrate`, created on demand.
pub fn app_root_dir() -> Result<PathBuf, AppDirError> {
    let base = resolve_base().ok_or(AppDirError::NoBaseDir)?;
    ensure_dir(base.join(APP_DIR_NAME))
}

/// `<base>/.imgrate/logs`, created on demand.
pub fn logs_dir() -> Result<PathBuf, AppDirError> {
    ensure_dir(app_root_dir()?.join(LOGS_DIR_NAME))
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf, AppDirError> {
    match fs::create_dir_all(&path) {
        Ok(()) => Ok(path),
        Err(source) => Err(AppDirError::CreateDir { path, source }),
    }
}

fn resolve_base() -> Option<PathBuf> {
    let pinned = BASE_OVERRIDE
        .lock()
        .map(|slot| slot.clone())
        .unwrap_or_default();
    pinned
        .or_else(|| std::env::var_os(CONFIG_HOME_ENV).map(PathBuf::from))
        .or_else(|| BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf()))
}

/// Pins the config base for one test; tests holding a guard run one at a time.
#[cfg(test)]
pub(crate) struct ConfigBaseGuard {
    _serial: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl ConfigBaseGuard {
    pub(crate) fn set(path: impl AsRef<std::path::Path>) -> Self {
        static SERIAL: Mutex<()> = Mutex::new(());
        let serial = SERIAL.lock().unwrap_or_else(|err| err.into_inner());
        set_override(Some(path.as_ref().to_path_buf()));
        Self { _serial: serial }
    }
}

#[cfg(test)]
impl Drop for ConfigBaseGuard {
    fn drop(&mut self) {
        set_override(None);
    }
}

#[cfg(test)]
fn set_override(value: Option<PathBuf>) {
    *BASE_OVERRIDE.lock().unwrap_or_else(|err| err.into_inner()) = value;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn root_is_created_under_pinned_base() {
        let base = tempdir().unwrap();
        let _guard = ConfigBaseGuard::set(base.path());
        let root = app_root_dir().unwrap();
        assert_eq!(root, base.path().join(".imgrate"));
        assert!(root.is_dir());
    }

    #[test]
    fn logs_live_inside_root() {
        let base = tempdir().unwrap();
        let _guard = ConfigBaseGuard::set(base.path());
        let logs = logs_dir().unwrap();
        assert!(logs.ends_with(".imgrate/logs"));
        assert!(logs.is_dir());
    }

    #[test]
    fn blocked_root_reports_path() {
        let base = tempdir().unwrap();
        fs::write(base.path().join(APP_DIR_NAME), b"not a dir").unwrap();
        let _guard = ConfigBaseGuard::set(base.path());
        match app_root_dir() {
            Err(AppDirError::CreateDir { path, .. }) => {
                assert_eq!(path, base.path().join(APP_DIR_NAME))
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
