use std::io;
use std::process::{Command, Stdio};

use chrono::Local;

use crate::error::{Result, SyncError};
use crate::services::command_builder::SyncInvocation;
use crate::services::sync_log::{CapturedOutput, LogRecord, RunMode, SyncLog};

/// CREATE_NO_WINDOW: keep robocopy from flashing a console
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Exit code recorded when the process ended without one
const NO_EXIT_CODE: i32 = -1;

/// Result of one finished process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub output: CapturedOutput,
    pub exit_code: i32,
}

/// Spawns the sync tool and waits for it
pub trait ProcessRunner {
    fn run(&mut self, invocation: &SyncInvocation) -> io::Result<ProcessOutcome>;
}

/// Runs invocations as real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&mut self, invocation: &SyncInvocation) -> io::Result<ProcessOutcome> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(invocation.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            cmd.creation_flags(CREATE_NO_WINDOW);
        }

        let output = cmd.output()?;
        Ok(ProcessOutcome {
            output: CapturedOutput {
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            },
            exit_code: output.status.code().unwrap_or(NO_EXIT_CODE),
        })
    }
}

/// What happened to one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Written to the dry-run log, nothing spawned
    DryLogged { command: String },
    /// Ran to completion. Any exit code, robocopy uses non-zero for success too
    Completed { command: String, exit_code: i32 },
}

impl Outcome {
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Outcome::DryLogged { .. } => None,
            Outcome::Completed { exit_code, .. } => Some(*exit_code),
        }
    }
}

/// Processes built invocations one at a time.
///
/// Dry runs only log. Real runs block on the child process, then log its
/// output and exit code. A spawn failure is logged and returned as
/// [`SyncError::Spawn`].
pub struct Executor<'a, R: ProcessRunner + ?Sized> {
    log: &'a SyncLog,
    runner: &'a mut R,
}

impl<'a, R: ProcessRunner + ?Sized> Executor<'a, R> {
    pub fn new(log: &'a SyncLog, runner: &'a mut R) -> Self {
        Self { log, runner }
    }

    pub fn execute(&mut self, mode: RunMode, invocation: &SyncInvocation) -> Result<Outcome> {
        let command = invocation.command_line();
        match mode {
            RunMode::DryRun => {
                self.log.append(mode, &LogRecord::dry_run(command.clone()))?;
                log::debug!("dry run logged: {}", command);
                Ok(Outcome::DryLogged { command })
            }
            RunMode::Real => {
                log::info!("executing: {}", command);
                let started = Local::now();
                let outcome = match self.runner.run(invocation) {
                    Ok(outcome) => outcome,
                    Err(source) => {
                        let record = LogRecord::error(started, format!("{}: {}", command, source));
                        if let Err(e) = self.log.append(mode, &record) {
                            log::warn!("could not record spawn failure: {}", e);
                        }
                        return Err(SyncError::Spawn {
                            program: invocation.program.clone(),
                            source,
                        });
                    }
                };
                log::debug!("{} exited with {}", invocation.program, outcome.exit_code);
                let exit_code = outcome.exit_code;
                let record =
                    LogRecord::completed(started, command.clone(), outcome.output, exit_code);
                self.log.append(mode, &record)?;
                Ok(Outcome::Completed { command, exit_code })
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::services::command_builder::build_invocation;
    use crate::services::selection::SelectedEntry;
    use chrono::{NaiveDateTime, Timelike};
    use std::collections::VecDeque;
    use std::fs;
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;

    /// Replays scripted results and remembers what it was asked to run
    #[derive(Default)]
    pub(crate) struct ScriptedRunner {
        pub results: VecDeque<io::Result<ProcessOutcome>>,
        pub ran: Vec<String>,
    }

    impl ScriptedRunner {
        pub fn exits(codes: &[i32]) -> Self {
            Self {
                results: codes
                    .iter()
                    .map(|&code| {
                        Ok(ProcessOutcome {
                            output: CapturedOutput {
                                stdout: format!("robocopy output {}", code),
                                stderr: String::new(),
                            },
                            exit_code: code,
                        })
                    })
                    .collect(),
                ran: Vec::new(),
            }
        }
    }

    impl ProcessRunner for ScriptedRunner {
        fn run(&mut self, invocation: &SyncInvocation) -> io::Result<ProcessOutcome> {
            self.ran.push(invocation.command_line());
            self.results
                .pop_front()
                .unwrap_or_else(|| Err(io::Error::new(io::ErrorKind::Other, "no scripted result")))
        }
    }

    fn invocation(path: &str) -> SyncInvocation {
        build_invocation(&SelectedEntry::file(path), r"D:\dest", &Settings::default())
    }

    #[test]
    fn test_dry_run_never_spawns() {
        let tmp = TempDir::new().unwrap();
        let log = SyncLog::new(tmp.path());
        let mut runner = ScriptedRunner::default();

        let outcome = Executor::new(&log, &mut runner)
            .execute(RunMode::DryRun, &invocation(r"C:\s\a.txt"))
            .unwrap();

        assert!(matches!(outcome, Outcome::DryLogged { .. }));
        assert_eq!(outcome.exit_code(), None);
        assert!(runner.ran.is_empty());
        assert!(!log.path(RunMode::Real).exists());
        let content = fs::read_to_string(log.path(RunMode::DryRun)).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_nonzero_exit_is_logged_not_raised() {
        let tmp = TempDir::new().unwrap();
        let log = SyncLog::new(tmp.path());
        let mut runner = ScriptedRunner::exits(&[3]);

        let outcome = Executor::new(&log, &mut runner)
            .execute(RunMode::Real, &invocation(r"C:\s\a.txt"))
            .unwrap();

        assert_eq!(outcome.exit_code(), Some(3));
        let content = fs::read_to_string(log.path(RunMode::Real)).unwrap();
        assert!(content.contains("robocopy output 3"));
        assert!(content.trim_end().ends_with("Exit Code: 3"));
        assert!(!log.path(RunMode::DryRun).exists());
    }

    #[test]
    fn test_spawn_failure_is_logged_and_propagated() {
        let tmp = TempDir::new().unwrap();
        let log = SyncLog::new(tmp.path());
        let mut runner = ScriptedRunner::default();
        runner
            .results
            .push_back(Err(io::Error::new(io::ErrorKind::NotFound, "program not found")));

        let err = Executor::new(&log, &mut runner)
            .execute(RunMode::Real, &invocation(r"C:\s\a.txt"))
            .unwrap_err();

        assert!(matches!(err, SyncError::Spawn { ref program, .. } if program == "robocopy"));
        let content = fs::read_to_string(log.path(RunMode::Real)).unwrap();
        assert!(content.contains("Error: robocopy"));
        assert!(content.contains("program not found"));
    }

    /// Takes a while to "copy", then exits 0
    struct SlowRunner(Duration);

    impl ProcessRunner for SlowRunner {
        fn run(&mut self, _invocation: &SyncInvocation) -> io::Result<ProcessOutcome> {
            thread::sleep(self.0);
            Ok(ProcessOutcome {
                output: CapturedOutput::default(),
                exit_code: 0,
            })
        }
    }

    fn logged_times(content: &str) -> Vec<NaiveDateTime> {
        content
            .lines()
            .filter_map(|line| line.strip_prefix('[')?.split_once(']'))
            .map(|(ts, _)| NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap())
            .collect()
    }

    #[test]
    fn test_real_run_record_is_stamped_with_start_time() {
        let tmp = TempDir::new().unwrap();
        let log = SyncLog::new(tmp.path());
        let mut runner = SlowRunner(Duration::from_millis(2100));

        let before = Local::now().naive_local().with_nanosecond(0).unwrap();
        Executor::new(&log, &mut runner)
            .execute(RunMode::Real, &invocation(r"C:\s\a.txt"))
            .unwrap();
        let finished = Local::now().naive_local().with_nanosecond(0).unwrap();

        let content = fs::read_to_string(log.path(RunMode::Real)).unwrap();
        let times = logged_times(&content);
        assert_eq!(times.len(), 2);
        assert_eq!(times[0], times[1]);
        assert!(times[0] >= before);
        assert!(times[0] <= before + chrono::Duration::seconds(1));
        assert!(times[0] < finished);
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_reports_real_exit_code() {
        let settings = Settings { robocopy_path: "false".to_string(), ..Settings::default() };
        let inv = build_invocation(&SelectedEntry::file("/tmp/a.txt"), "/tmp", &settings);

        let outcome = SystemRunner.run(&inv).unwrap();
        assert_eq!(outcome.exit_code, 1);
    }

    #[test]
    fn test_system_runner_missing_program() {
        let settings = Settings {
            robocopy_path: "definitely-not-a-real-sync-tool-4f2a".to_string(),
            ..Settings::default()
        };
        let inv = build_invocation(&SelectedEntry::dir(r"C:\s\sub"), r"D:\dest", &settings);

        let err = SystemRunner.run(&inv).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
