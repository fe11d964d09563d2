use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("wick")
}

fn default_api_base_url() -> String {
    "https://dummyjson.com".to_string()
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct WickConfig {
    pub data_directory: PathBuf,
    pub api_base_url: String,
    pub debug_logging: bool,
}

impl Default for WickConfig {
    fn default() -> Self {
        Self {
            data_directory: default_data_dir(),
            api_base_url: default_api_base_url(),
            debug_logging: false,
        }
    }
}

impl WickConfig {
    /// Load the config file if present, otherwise fall back to defaults.
    pub fn load() -> Self {
        let path = default_data_dir().join("config.json");
        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Path of the per-account task record. One file per account, whole
    /// record rewritten on every write.
    pub fn tasks_path(&self, account_id: &str) -> PathBuf {
        self.data_directory.join(format!("todos_{}.json", account_id))
    }

    /// Path of the category list, shared by every account on this profile.
    pub fn categories_path(&self) -> PathBuf {
        self.data_directory.join("categories.json")
    }

    /// Path of the active session profile. Its presence is the
    /// authentication gate.
    pub fn session_path(&self) -> PathBuf {
        self.data_directory.join("session.json")
    }

    /// Ensure the data directory exists.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_directory)
    }
}
