use std::path::Path;

use crate::host::StatusBar;
use crate::services::sync_log::RunMode;

/// Per-item progress line, `index` is 1-based
pub fn progress_message(mode: RunMode, index: usize, total: usize, name: &str) -> String {
    match mode {
        RunMode::DryRun => format!("Processing element {} of {}: {}", index, total, name),
        RunMode::Real => format!("Copying {} of {}: {}", index, total, name),
    }
}

/// Line shown once every entry has been handled
pub fn finished_message(mode: RunMode, count: usize, log_path: &Path) -> String {
    match mode {
        RunMode::DryRun => format!("Robocopy commands logged to {}", log_path.display()),
        RunMode::Real => format!("Synced {} element(s), log: {}", count, log_path.display()),
    }
}

/// Pushes progress for one run to the host status bar
#[derive(Debug, Clone, Copy)]
pub struct StatusReporter {
    mode: RunMode,
    total: usize,
}

impl StatusReporter {
    pub fn new(mode: RunMode, total: usize) -> Self {
        Self { mode, total }
    }

    pub fn item<B: StatusBar + ?Sized>(&self, bar: &mut B, index: usize, name: &str) {
        bar.show_status_message(&progress_message(self.mode, index, self.total, name));
    }

    pub fn finished<B: StatusBar + ?Sized>(&self, bar: &mut B, log_path: &Path) {
        bar.show_status_message(&finished_message(self.mode, self.total, log_path));
    }
}
