//! Platform-specific location of the application data directory.
//!
//! Config, the SQLite database and the JSON counter file all live here:
//! - **Windows**: `%LOCALAPPDATA%\lacodda\tomato`
//! - **macOS**: `~/Library/Application Support/lacodda/tomato`
//! - **Linux**: `~/.local/share/lacodda/tomato`

use anyhow::Result;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

pub const VENDOR_NAME: &str = APP_METADATA_OWNER;
pub const APP_NAME: &str = APP_METADATA_NAME;

#[derive(Debug, Clone)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl DataStorage {
    /// Resolves the directory from the environment on every call, so tests
    /// can point `HOME` / `LOCALAPPDATA` at a temporary directory.
    pub fn new() -> Self {
        Self {
            base_path: platform_data_dir().join(VENDOR_NAME).join(APP_NAME),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Full path of `file_name`; the directory is created on first use.
    pub fn get_path(&self, file_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.base_path)?;
        Ok(self.base_path.join(file_name))
    }
}

fn platform_data_dir() -> PathBuf {
    let env_dir = |name: &str| PathBuf::from(env::var_os(name).unwrap_or_else(|| ".".into()));
    match env::consts::OS {
        "windows" => env_dir("LOCALAPPDATA"),
        "macos" => env_dir("HOME").join("Library").join("Application Support"),
        _ => env_dir("HOME").join(".local").join("share"),
    }
}
