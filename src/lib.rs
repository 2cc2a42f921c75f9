//! Sync the selected entries of one file-manager pane into the other pane
//! with robocopy.
//!
//! The host registers the commands returned by [`commands`] and invokes
//! them with access to its panes and status bar through [`Host`].

pub mod commands;
pub mod config;
pub mod error;
pub mod host;
pub mod services;
pub mod utils;

pub use commands::{commands, run_sync, PluginCommand, RunSummary, SyncToOtherPane};
pub use config::Settings;
pub use error::{Result, SyncError};
pub use host::{Host, PaneHost, PaneInfo, StatusBar};
pub use services::command_builder::{build_invocation, SyncInvocation};
pub use services::executor::{Outcome, ProcessOutcome, ProcessRunner, SystemRunner};
pub use services::selection::{Refusal, SelectedEntry, SyncRequest};
pub use services::sync_log::{CapturedOutput, LogRecord, RunMode, SyncLog};
