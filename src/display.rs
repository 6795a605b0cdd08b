use owo_colors::{OwoColorize, Stream, Style};
use serde::Serialize;

use crate::types::{BenchReport, TimingMode, shell_escape_single_quote};

fn style_label() -> Style {
    Style::new().cyan().bold()
}

/// `"<Label>: <average>"` for one finished target.
pub fn format_line(report: &BenchReport) -> String {
    let label = report
        .label
        .if_supports_color(Stream::Stdout, |s| s.style(style_label()))
        .to_string();
    format!("{}: {}\n", label, format_seconds(report.average_secs))
}

pub fn format_plain(reports: &[BenchReport]) -> String {
    reports.iter().map(format_line).collect()
}

pub fn format_seconds(secs: f64) -> String {
    format!("{:.5}", secs)
}

/// JSON output format.
#[derive(Serialize)]
struct JsonReport<'a> {
    label: &'a str,
    command: &'a str,
    workdir: String,
    timing: TimingMode,
    repetitions: usize,
    samples: &'a [f64],
    average_secs: f64,
    started_at: String,
    reproduce: String,
}

pub fn format_json(reports: &[BenchReport]) -> String {
    let json_reports: Vec<JsonReport> = reports
        .iter()
        .map(|report| {
            let workdir = report.workdir.to_string_lossy().to_string();
            let reproduce = format!(
                "cd {} && {}",
                shell_escape_single_quote(&workdir),
                report.command
            );
            JsonReport {
                label: &report.label,
                command: &report.command,
                workdir,
                timing: report.timing,
                repetitions: report.repetitions,
                samples: &report.samples,
                average_secs: report.average_secs,
                started_at: report.started_at.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
                reproduce,
            }
        })
        .collect();

    let mut out =
        serde_json::to_string_pretty(&json_reports).unwrap_or_else(|_| "[]".to_string());
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use std::path::PathBuf;

    fn make_report(label: &str, workdir: &str, samples: &[f64]) -> BenchReport {
        let average_secs = samples.iter().sum::<f64>() / samples.len() as f64;
        BenchReport {
            label: label.to_string(),
            command: "java Fitness".to_string(),
            workdir: PathBuf::from(workdir),
            timing: TimingMode::Wall,
            repetitions: samples.len(),
            samples: samples.to_vec(),
            average_secs,
            started_at: fixed_now(),
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-02-18T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    // The label may carry ANSI codes when the test runner owns a terminal,
    // so only the uncoloured parts are compared exactly.

    #[test]
    fn line_has_label_and_average() {
        let report = make_report("Java", "/bench/java", &[2.5, 2.67048]);
        let line = format_line(&report);
        assert!(line.contains("Java"));
        assert!(line.ends_with(": 2.58524\n"), "got {line:?}");
    }

    #[test]
    fn seconds_have_five_decimals() {
        assert_eq!(format_seconds(2.0), "2.00000");
        assert_eq!(format_seconds(10.553481), "10.55348");
    }

    #[test]
    fn plain_keeps_report_order() {
        let reports = vec![
            make_report("Clojure", "/bench/clojure", &[10.0]),
            make_report("Java", "/bench/java", &[2.0]),
        ];
        let out = format_plain(&reports);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Clojure") && lines[0].ends_with(": 10.00000"));
        assert!(lines[1].contains("Java") && lines[1].ends_with(": 2.00000"));
    }

    #[test]
    fn plain_empty() {
        assert_eq!(format_plain(&[]), "");
    }

    #[test]
    fn json_fields() {
        let reports = vec![make_report("Java", "/bench/java", &[1.0, 3.0])];
        let out = format_json(&reports);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();

        let arr = parsed.as_array().unwrap();
        assert_eq!(arr.len(), 1);
        let r = &arr[0];
        assert_eq!(r["label"], "Java");
        assert_eq!(r["command"], "java Fitness");
        assert_eq!(r["workdir"], "/bench/java");
        assert_eq!(r["timing"], "wall");
        assert_eq!(r["repetitions"], 2);
        assert_eq!(r["samples"], serde_json::json!([1.0, 3.0]));
        assert_eq!(r["average_secs"], 2.0);
        assert_eq!(r["started_at"], "2026-02-18T00:00:00Z");
        assert_eq!(r["reproduce"], "cd '/bench/java' && java Fitness");
    }

    #[test]
    fn json_reproduce_escapes_quotes() {
        let reports = vec![make_report("Java", "/tmp/it's here", &[1.0])];
        let parsed: serde_json::Value = serde_json::from_str(&format_json(&reports)).unwrap();
        assert_eq!(
            parsed[0]["reproduce"],
            "cd '/tmp/it'\\''s here' && java Fitness"
        );
    }

    #[test]
    fn json_empty_array() {
        assert_eq!(format_json(&[]), "[]\n");
    }
}
