use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::BenchError;
use crate::types::Target;

pub const DEFAULT_REPETITIONS: usize = 25;

/// The Clojure and Java fitness benchmarks, laid out under `root` as
/// `clojure/fitness.clj` and `java/Fitness.class`, with `clojure.jar` two
/// levels above the Clojure directory.
pub fn builtin_targets(root: &Path) -> Vec<Target> {
    vec![
        Target::new(
            "Clojure",
            "java -cp ../../clojure.jar clojure.lang.Repl fitness.clj",
            root.join("clojure"),
        ),
        Target::new("Java", "java Fitness", root.join("java")),
    ]
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TargetFile {
    #[serde(default, rename = "target")]
    targets: Vec<TargetEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TargetEntry {
    label: String,
    command: String,
    workdir: Option<PathBuf>,
}

/// Load targets from a TOML file of `[[target]]` tables.
///
/// Relative working directories resolve against the file's own directory, so
/// a target file can sit next to the programs it benchmarks.
pub fn load_targets(path: &Path) -> Result<Vec<Target>, BenchError> {
    let contents = std::fs::read_to_string(path).map_err(|source| BenchError::ConfigReadError {
        path: path.to_path_buf(),
        source,
    })?;
    parse_targets(&contents, path)
}

fn parse_targets(contents: &str, path: &Path) -> Result<Vec<Target>, BenchError> {
    let file: TargetFile = toml::from_str(contents).map_err(|e| BenchError::ConfigParseError {
        path: path.to_path_buf(),
        detail: e.message().to_string(),
    })?;

    if file.targets.is_empty() {
        return Err(BenchError::ConfigParseError {
            path: path.to_path_buf(),
            detail: "no [[target]] entries".to_string(),
        });
    }

    let base = path.parent().unwrap_or_else(|| Path::new("."));

    file.targets
        .into_iter()
        .map(|entry| {
            if entry.label.trim().is_empty() || entry.command.trim().is_empty() {
                return Err(BenchError::ConfigParseError {
                    path: path.to_path_buf(),
                    detail: "target label and command must not be empty".to_string(),
                });
            }
            let workdir = match entry.workdir {
                Some(dir) if dir.is_absolute() => dir,
                Some(dir) => base.join(dir),
                None => base.to_path_buf(),
            };
            Ok(Target {
                label: entry.label,
                command: entry.command,
                workdir,
            })
        })
        .collect()
}
