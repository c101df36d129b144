use imgrate::app_dirs::CONFIG_HOME_ENV;
use std::{
    path::PathBuf,
    sync::{Mutex, OnceLock},
};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Points the config lookup at a test directory for the guard's lifetime.
pub struct ImgrateEnvGuard {
    previous: Option<String>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl ImgrateEnvGuard {
    pub fn set_config_home(path: PathBuf) -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        let previous = std::env::var(CONFIG_HOME_ENV).ok();
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            std::env::set_var(CONFIG_HOME_ENV, path);
        }
        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for ImgrateEnvGuard {
    fn drop(&mut self) {
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            match self.previous.take() {
                Some(value) => std::env::set_var(CONFIG_HOME_ENV, value),
                None => std::env::remove_var(CONFIG_HOME_ENV),
            }
        }
    }
}
