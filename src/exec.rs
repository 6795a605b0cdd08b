use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::time::Instant;

use tracing::trace;

use crate::errors::BenchError;
use crate::types::{Execution, Timing, TimingMode};

/// Runs a benchmark command once.
///
/// The seam between the harness and the operating system. Tests substitute
/// an implementation that counts calls and returns canned timings.
pub trait Executor {
    fn execute(&mut self, command: &str, workdir: &Path) -> Result<Execution, BenchError>;

    fn timing_mode(&self) -> TimingMode;
}

/// Spawns commands through the system shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellExecutor {
    mode: TimingMode,
}

impl ShellExecutor {
    pub fn new(mode: TimingMode) -> Self {
        ShellExecutor { mode }
    }
}

impl Executor for ShellExecutor {
    fn execute(&mut self, command: &str, workdir: &Path) -> Result<Execution, BenchError> {
        if !workdir.is_dir() {
            return Err(BenchError::WorkdirNotFound {
                path: workdir.to_path_buf(),
            });
        }

        let mut cmd = match self.mode {
            TimingMode::Wall => {
                let mut c = Command::new("sh");
                c.arg("-c").arg(command);
                c
            }
            TimingMode::TimeReport => {
                let mut c = Command::new("bash");
                // Group so a compound command is timed as a whole. A command
                // that ends the shell inside the group (`exec java Fitness`,
                // `...; exit 0`) leaves no report and fails to parse.
                c.arg("-c").arg(format!("time {{ {}\n}}", command));
                // A custom TIMEFORMAT or a comma-decimal locale would change
                // the `0m2.585s` style report
                c.env_remove("TIMEFORMAT")
                    .env_remove("LC_ALL")
                    .env("LC_NUMERIC", "C");
                c
            }
        };
        cmd
            .current_dir(workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        trace!(command, workdir = %workdir.display(), mode = ?self.mode, "spawning");

        let start = Instant::now();
        let output = cmd.output().map_err(|source| BenchError::LaunchError {
            command: command.to_string(),
            source,
        })?;
        let elapsed = start.elapsed();

        check_status(command, &output)?;

        let timing = match self.mode {
            TimingMode::Wall => Timing::Elapsed(elapsed),
            TimingMode::TimeReport => Timing::Report(combined_output(&output)),
        };
        Ok(Execution { timing })
    }

    fn timing_mode(&self) -> TimingMode {
        self.mode
    }
}

fn check_status(command: &str, output: &Output) -> Result<(), BenchError> {
    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let last_line = stderr
        .lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("")
        .to_string();

    Err(BenchError::ExecutionError {
        command: command.to_string(),
        status: output.status.to_string(),
        stderr: last_line,
    })
}

/// stdout followed by stderr, the way `time` output ends up after `2>&1`.
fn combined_output(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    text
}
