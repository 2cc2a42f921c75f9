use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::error::{Result, SyncError};

pub const DRY_RUN_LOG: &str = "sync_commands_dry_run.log";
pub const REAL_RUN_LOG: &str = "sync_commands.log";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Which of the two logs a run writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    DryRun,
    Real,
}

impl RunMode {
    pub fn log_file_name(self) -> &'static str {
        match self {
            RunMode::DryRun => DRY_RUN_LOG,
            RunMode::Real => REAL_RUN_LOG,
        }
    }
}

/// stdout/stderr of a finished robocopy process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogRecord {
    /// Command text, plus output and exit code when it actually ran
    Command {
        timestamp: DateTime<Local>,
        command: String,
        output: Option<CapturedOutput>,
        exit_code: Option<i32>,
    },
    /// The command could not be started
    Error {
        timestamp: DateTime<Local>,
        message: String,
    },
}

impl LogRecord {
    pub fn dry_run(command: impl Into<String>) -> Self {
        LogRecord::Command {
            timestamp: Local::now(),
            command: command.into(),
            output: None,
            exit_code: None,
        }
    }

    /// `started` is when the process was launched, not when it exited
    pub fn completed(
        started: DateTime<Local>,
        command: impl Into<String>,
        output: CapturedOutput,
        exit_code: i32,
    ) -> Self {
        LogRecord::Command {
            timestamp: started,
            command: command.into(),
            output: Some(output),
            exit_code: Some(exit_code),
        }
    }

    pub fn error(started: DateTime<Local>, message: impl Into<String>) -> Self {
        LogRecord::Error {
            timestamp: started,
            message: message.into(),
        }
    }

    /// Text appended to the log file, always newline terminated
    pub fn render(&self) -> String {
        match self {
            LogRecord::Command { timestamp, command, output, exit_code } => {
                let ts = timestamp.format(TIMESTAMP_FORMAT);
                let mut text = format!("[{}] {}\n", ts, command);
                if let Some(output) = output {
                    for block in [&output.stdout, &output.stderr] {
                        let block = block.trim_end();
                        if !block.is_empty() {
                            text.push_str(block);
                            text.push('\n');
                        }
                    }
                }
                if let Some(code) = exit_code {
                    text.push_str(&format!("[{}] Exit Code: {}\n", ts, code));
                }
                text
            }
            LogRecord::Error { timestamp, message } => {
                format!("[{}] Error: {}\n", timestamp.format(TIMESTAMP_FORMAT), message)
            }
        }
    }
}

/// Append-only writer for the dry-run and real-run logs
#[derive(Debug, Clone)]
pub struct SyncLog {
    dir: PathBuf,
}

impl SyncLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self, mode: RunMode) -> PathBuf {
        self.dir.join(mode.log_file_name())
    }

    /// Append one record. The file is opened and closed on every call.
    pub fn append(&self, mode: RunMode, record: &LogRecord) -> Result<()> {
        let path = self.path(mode);
        let log_err = |source: std::io::Error| SyncError::Log { path: path.clone(), source };

        fs::create_dir_all(&self.dir).map_err(|source| SyncError::Log {
            path: self.dir.clone(),
            source,
        })?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(log_err)?;
        file.write_all(record.render().as_bytes()).map_err(log_err)?;
        file.flush().map_err(log_err)?;
        Ok(())
    }
}
