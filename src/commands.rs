//! The two commands the plugin registers with the host.

use crate::config::Settings;
use crate::error::Result;
use crate::host::Host;
use crate::services::command_builder::build_all;
use crate::services::executor::{Executor, Outcome, ProcessRunner, SystemRunner};
use crate::services::selection::{read_selection, Refusal};
use crate::services::status::StatusReporter;
use crate::services::sync_log::{RunMode, SyncLog};

pub const DRY_RUN_COMMAND: &str = "sync_selected_files_to_other_pane_dry_run_for_windows";
pub const REAL_RUN_COMMAND: &str = "sync_selected_files_to_other_pane_for_windows";

const DRY_RUN_ALIASES: &[&str] = &["Sync selected files to other pane - dry run"];
const REAL_RUN_ALIASES: &[&str] = &["Sync selected files to other pane"];

/// A command the host can list and invoke
pub trait PluginCommand {
    fn name(&self) -> &'static str;

    /// Titles shown in the host's command palette
    fn aliases(&self) -> &'static [&'static str];

    fn invoke(&mut self, host: &mut dyn Host) -> Result<RunSummary>;
}

/// What a command did, returned to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub mode: RunMode,
    /// Set when the command alerted instead of running
    pub refusal: Option<Refusal>,
    pub outcomes: Vec<Outcome>,
}

/// Sync the active pane's selection into the other pane
pub struct SyncToOtherPane {
    mode: RunMode,
    settings: Settings,
    runner: Box<dyn ProcessRunner>,
}

impl SyncToOtherPane {
    pub fn new(mode: RunMode, settings: Settings) -> Self {
        Self { mode, settings, runner: Box::new(SystemRunner) }
    }

    pub fn dry_run(settings: Settings) -> Self {
        Self::new(RunMode::DryRun, settings)
    }

    pub fn real(settings: Settings) -> Self {
        Self::new(RunMode::Real, settings)
    }

    /// Replace how processes are spawned
    pub fn with_runner(mut self, runner: Box<dyn ProcessRunner>) -> Self {
        self.runner = runner;
        self
    }
}

impl PluginCommand for SyncToOtherPane {
    fn name(&self) -> &'static str {
        match self.mode {
            RunMode::DryRun => DRY_RUN_COMMAND,
            RunMode::Real => REAL_RUN_COMMAND,
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self.mode {
            RunMode::DryRun => DRY_RUN_ALIASES,
            RunMode::Real => REAL_RUN_ALIASES,
        }
    }

    fn invoke(&mut self, host: &mut dyn Host) -> Result<RunSummary> {
        run_sync(host, self.mode, &self.settings, self.runner.as_mut())
    }
}

/// Both commands, with settings read from ~/.fman
pub fn commands() -> Vec<Box<dyn PluginCommand>> {
    let settings = Settings::load();
    vec![
        Box::new(SyncToOtherPane::dry_run(settings.clone())),
        Box::new(SyncToOtherPane::real(settings)),
    ]
}

/// Read the selection, build one invocation per entry and process them in order.
///
/// Refusals (nothing selected, no other pane, wrong platform) alert the host
/// and return normally. Spawn and log failures are returned to the host.
pub fn run_sync<H, R>(
    host: &mut H,
    mode: RunMode,
    settings: &Settings,
    runner: &mut R,
) -> Result<RunSummary>
where
    H: Host + ?Sized,
    R: ProcessRunner + ?Sized,
{
    let request = match read_selection(&*host, settings) {
        Ok(request) => request,
        Err(refusal) => {
            log::info!("sync refused: {}", refusal);
            host.show_alert(&refusal.to_string());
            return Ok(RunSummary { mode, refusal: Some(refusal), outcomes: Vec::new() });
        }
    };

    let log = SyncLog::new(settings.log_dir()?);
    let invocations = build_all(&request.entries, &request.target_root, settings);
    let reporter = StatusReporter::new(mode, invocations.len());
    let mut executor = Executor::new(&log, runner);
    let mut outcomes = Vec::with_capacity(invocations.len());

    log::info!(
        "{:?} of {} element(s) into {}",
        mode,
        invocations.len(),
        request.target_root
    );

    for (i, invocation) in invocations.iter().enumerate() {
        reporter.item(host, i + 1, invocation.display_name());
        let outcome = executor.execute(mode, invocation)?;
        if mode == RunMode::Real {
            host.reload_pane(request.target_pane);
        }
        outcomes.push(outcome);
    }

    host.clear_status_message();
    reporter.finished(host, &log.path(mode));
    Ok(RunSummary { mode, refusal: None, outcomes })
}
