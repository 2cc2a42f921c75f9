use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SyncError};

/// Directory under the home directory shared with the host's own files
pub const APP_DIR: &str = ".fman";
const SETTINGS_FILE: &str = "sync_to_other_pane.json";

pub const DEFAULT_THREADS: u32 = 32;
/// robocopy accepts /MT:1 through /MT:128
pub const MAX_THREADS: u32 = 128;

fn default_robocopy_path() -> String {
    "robocopy".to_string()
}

fn default_threads() -> u32 {
    DEFAULT_THREADS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the two sync logs go. None means ~/.fman
    pub log_dir: Option<String>,
    #[serde(default = "default_robocopy_path")]
    pub robocopy_path: String,
    /// Value passed to /MT
    #[serde(default = "default_threads")]
    pub threads: u32,
    /// Run even when the host is not on Windows (robocopy must still resolve)
    pub allow_non_windows: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_dir: None,
            robocopy_path: default_robocopy_path(),
            threads: DEFAULT_THREADS,
            allow_non_windows: false,
        }
    }
}

impl Settings {
    /// ~/.fman
    pub fn app_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(APP_DIR))
    }

    /// ~/.fman/sync_to_other_pane.json
    pub fn config_path() -> Option<PathBuf> {
        Self::app_dir().map(|d| d.join(SETTINGS_FILE))
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load() -> Self {
        match Self::load_with_error() {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("using default settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings, reporting parse errors. A missing file yields defaults.
    pub fn load_with_error() -> Result<Self> {
        let path = Self::config_path().ok_or(SyncError::NoHomeDir)?;
        Self::load_from(path)
    }

    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path).map_err(|source| SyncError::SettingsIo {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SyncError::Settings { path, source })
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().ok_or(SyncError::NoHomeDir)?;
        self.save_to(path)
    }

    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| SyncError::SettingsIo {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| SyncError::Settings {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| SyncError::SettingsIo { path, source })
    }

    /// Resolved log directory
    pub fn log_dir(&self) -> Result<PathBuf> {
        match &self.log_dir {
            Some(dir) => Ok(expand_home(dir)),
            None => Self::app_dir().ok_or(SyncError::NoHomeDir),
        }
    }

    /// Thread count clamped to what robocopy accepts
    pub fn effective_threads(&self) -> u32 {
        self.threads.clamp(1, MAX_THREADS)
    }

    /// Whether the commands may run on this platform
    pub fn platform_supported(&self) -> bool {
        cfg!(windows) || self.allow_non_windows
    }
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest.trim_start_matches(['/', '\\']));
        }
    }
    PathBuf::from(path)
}
