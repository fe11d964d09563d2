use std::path::Path;

use thiserror::Error;

use crate::config::WickConfig;
use crate::core::account::Account;
use crate::core::category::Category;
use crate::core::task::Task;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON persistence keyed the way the browser storage was: one record per
/// account for tasks, one global record for categories, one for the session.
///
/// Reads degrade to defaults (missing file, unparseable content) with a log
/// line; writes rewrite the whole record, last writer wins.
#[derive(Clone)]
pub struct LocalStore {
    config: WickConfig,
}

impl LocalStore {
    pub fn new(config: WickConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WickConfig {
        &self.config
    }

    pub fn read_tasks(&self, account_id: &str) -> Vec<Task> {
        read_json_or(&self.config.tasks_path(account_id), Vec::new)
    }

    pub fn write_tasks(&self, account_id: &str, tasks: &[Task]) -> Result<(), StorageError> {
        write_json(&self.config.tasks_path(account_id), tasks)
    }

    pub fn read_categories(&self) -> Vec<Category> {
        read_json_or(&self.config.categories_path(), Category::defaults)
    }

    pub fn write_categories(&self, categories: &[Category]) -> Result<(), StorageError> {
        write_json(&self.config.categories_path(), categories)
    }

    pub fn read_session(&self) -> Option<Account> {
        let path = self.config.session_path();
        let content = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(account) => Some(account),
            Err(e) => {
                log::error!("Unreadable session file {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn write_session(&self, account: &Account) -> Result<(), StorageError> {
        write_json(&self.config.session_path(), account)
    }

    /// Sign-out: drop the session record. Missing file is fine.
    pub fn clear_session(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(self.config.session_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn read_json_or<T, F>(path: &Path, default: F) -> T
where
    T: serde::de::DeserializeOwned,
    F: FnOnce() -> T,
{
    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                log::error!("Unparseable record {}: {}", path.display(), e);
                default()
            }
        },
        Err(_) => default(),
    }
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StorageError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}
