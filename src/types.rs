use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

/// A labelled shell command and the directory it has to run in.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub label: String,
    pub command: String,
    pub workdir: PathBuf,
}

impl Target {
    pub fn new(label: &str, command: &str, workdir: impl Into<PathBuf>) -> Self {
        Target {
            label: label.to_string(),
            command: command.to_string(),
            workdir: workdir.into(),
        }
    }
}

/// How the duration of a single run is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimingMode {
    /// Measure elapsed wall-clock time around the child process
    #[default]
    Wall,
    /// Run under the shell `time` keyword and parse its report
    TimeReport,
}

/// Result of one successful command execution.
#[derive(Debug, Clone)]
pub struct Execution {
    pub timing: Timing,
}

#[derive(Debug, Clone)]
pub enum Timing {
    /// Measured by the harness.
    Elapsed(Duration),
    /// Combined stdout/stderr text containing a `time` report.
    Report(String),
}

/// Everything known about one benchmarked target after all repetitions.
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub label: String,
    pub command: String,
    pub workdir: PathBuf,
    pub timing: TimingMode,
    pub repetitions: usize,
    pub samples: Vec<f64>,
    pub average_secs: f64,
    pub started_at: DateTime<Utc>,
}

/// Wraps a string in single quotes, escaping internal single quotes as `'\''`.
pub fn shell_escape_single_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(c);
        }
    }
    out.push('\'');
    out
}
