use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum BenchError {
    #[error("Working directory {path} does not exist")]
    WorkdirNotFound { path: PathBuf },

    #[error("Failed to launch `{command}`: {source}")]
    LaunchError {
        command: String,
        source: std::io::Error,
    },

    #[error("`{command}` exited abnormally ({status}){}", stderr_suffix(.stderr))]
    ExecutionError {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("No timing of the form <minutes>m<seconds>s found in output: {excerpt:?}")]
    ParseError { excerpt: String },

    #[error("Cannot average an empty sample set")]
    EmptySampleSet,

    #[error("Failed to read target file {path}: {source}")]
    ConfigReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse target file {path}: {detail}")]
    ConfigParseError { path: PathBuf, detail: String },
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}
