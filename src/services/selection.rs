use std::fmt;

use crate::config::Settings;
use crate::host::PaneHost;

/// A selected filesystem entry of the active pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedEntry {
    pub path: String,
    pub is_dir: bool,
}

impl SelectedEntry {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_dir: false,
        }
    }

    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_dir: true,
        }
    }
}

/// Everything a command needs from the host to build invocations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    pub entries: Vec<SelectedEntry>,
    /// Directory shown by the other pane
    pub target_root: String,
    /// Index of the other pane, for reloading
    pub target_pane: usize,
}

/// Reasons a command refuses to run. Shown to the user as an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    UnsupportedPlatform,
    NothingSelected,
    NoOtherPane,
}

impl fmt::Display for Refusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Refusal::UnsupportedPlatform => "This plugin only works on Windows",
            Refusal::NothingSelected => "No elements selected",
            Refusal::NoOtherPane => "No other pane available",
        };
        f.write_str(msg)
    }
}

/// Index of the pane opposite `active`, given `count` panes
pub fn opposite_pane(active: usize, count: usize) -> Option<usize> {
    if count < 2 {
        return None;
    }
    if active == 0 {
        Some(1)
    } else {
        Some(0)
    }
}

/// Gather the selection and the destination from the host
pub fn read_selection<H: PaneHost + ?Sized>(
    host: &H,
    settings: &Settings,
) -> Result<SyncRequest, Refusal> {
    if !settings.platform_supported() {
        return Err(Refusal::UnsupportedPlatform);
    }

    let paths = host.selected_paths();
    if paths.is_empty() {
        return Err(Refusal::NothingSelected);
    }

    let panes = host.panes();
    let target_pane =
        opposite_pane(host.active_pane(), panes.len()).ok_or(Refusal::NoOtherPane)?;
    let target_root = panes[target_pane].path.clone();

    let entries = paths
        .into_iter()
        .map(|path| {
            let is_dir = host.is_directory(&path);
            SelectedEntry { path, is_dir }
        })
        .collect();

    Ok(SyncRequest { entries, target_root, target_pane })
}
