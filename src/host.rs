//! What the plugin needs from the file manager hosting it.
//!
//! The host owns the panes and the status bar; every command receives it as
//! `&mut dyn Host` for the duration of one invocation.

use std::path::Path;

/// One side of the dual-pane view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneInfo {
    /// Human readable directory the pane shows
    pub path: String,
}

/// Status bar access
pub trait StatusBar {
    fn show_status_message(&mut self, message: &str);

    fn clear_status_message(&mut self) {}
}

/// Pane, selection and dialog access
pub trait PaneHost {
    /// All panes in window order
    fn panes(&self) -> Vec<PaneInfo>;

    /// Index into `panes()` of the pane the command was invoked from
    fn active_pane(&self) -> usize;

    /// Selected entries of the active pane as human readable paths
    fn selected_paths(&self) -> Vec<String>;

    fn is_directory(&self, path: &str) -> bool {
        Path::new(path).is_dir()
    }

    /// Modal alert
    fn show_alert(&mut self, message: &str);

    /// Ask a pane to re-read its directory
    fn reload_pane(&mut self, _index: usize) {}
}

pub trait Host: PaneHost + StatusBar {}

impl<T: PaneHost + StatusBar> Host for T {}
