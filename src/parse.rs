use crate::errors::BenchError;

const EXCERPT_CHARS: usize = 80;

/// Parse the first `<minutes>m<seconds>s` timing in `text` into seconds.
///
/// This is the format the shell `time` keyword prints (`real\t0m2.585s`).
/// The seconds part must contain a decimal point. Minutes are folded in, so
/// `1m5.000s` yields `65.0`.
pub fn parse_time_report(text: &str) -> Result<f64, BenchError> {
    let bytes = text.as_bytes();

    for start in 0..bytes.len() {
        if !bytes[start].is_ascii_digit() {
            continue;
        }
        // Only try at the start of a digit run, so "10m" is never read as "0m"
        if start > 0 && bytes[start - 1].is_ascii_digit() {
            continue;
        }
        if let Some(secs) = match_duration_at(text, start) {
            return Ok(secs);
        }
    }

    Err(BenchError::ParseError {
        excerpt: excerpt(text),
    })
}

/// Matches `\d+m\d+\.\d+s` at byte offset `start`.
fn match_duration_at(text: &str, start: usize) -> Option<f64> {
    let bytes = text.as_bytes();

    let minutes_end = digit_run_end(bytes, start);
    if bytes.get(minutes_end) != Some(&b'm') {
        return None;
    }

    let secs_start = minutes_end + 1;
    let whole_end = digit_run_end(bytes, secs_start);
    if whole_end == secs_start || bytes.get(whole_end) != Some(&b'.') {
        return None;
    }

    let frac_start = whole_end + 1;
    let frac_end = digit_run_end(bytes, frac_start);
    if frac_end == frac_start || bytes.get(frac_end) != Some(&b's') {
        return None;
    }

    let minutes: f64 = text[start..minutes_end].parse().ok()?;
    let seconds: f64 = text[secs_start..frac_end].parse().ok()?;
    Some(minutes * 60.0 + seconds)
}

fn digit_run_end(bytes: &[u8], from: usize) -> usize {
    let mut end = from;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    end
}

fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= EXCERPT_CHARS {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(EXCERPT_CHARS).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_secs(text: &str, expected: f64) {
        let got = parse_time_report(text).unwrap();
        assert!(
            (got - expected).abs() < 1e-9,
            "parse_time_report({:?}) = {}, expected {}",
            text,
            got,
            expected
        );
    }

    #[test]
    fn bare_duration() {
        assert_secs("0m2.585s", 2.585);
    }

    #[test]
    fn bash_time_report() {
        let report = "\nreal\t0m2.585s\nuser\t0m4.120s\nsys\t0m0.210s\n";
        assert_secs(report, 2.585);
    }

    #[test]
    fn report_after_program_output() {
        let output = "Loading fitness.clj\n1000 evaluations done\n\nreal\t0m10.553s\nuser\t0m11.002s\nsys\t0m0.400s\n";
        assert_secs(output, 10.553);
    }

    #[test]
    fn nonzero_minutes_are_converted() {
        assert_secs("real\t1m5.000s", 65.0);
        assert_secs("real\t12m0.500s", 720.5);
    }

    #[test]
    fn minutes_are_not_split_mid_number() {
        // "10m" must not be read as "0m" with a dropped leading digit
        assert_secs("real 10m1.000s", 601.0);
    }

    #[test]
    fn skips_malformed_candidates() {
        assert_secs("0m5s then 0ms then 0m1.250s", 1.25);
    }

    #[test]
    fn missing_report_fails() {
        let err = parse_time_report("Error: Could not find or load main class Fitness").unwrap_err();
        assert!(matches!(err, BenchError::ParseError { .. }));
        assert!(err.to_string().contains("Could not find"));
    }

    #[test]
    fn empty_text_fails() {
        assert!(matches!(
            parse_time_report(""),
            Err(BenchError::ParseError { .. })
        ));
    }

    #[test]
    fn seconds_without_fraction_fail() {
        assert!(parse_time_report("0m2s").is_err());
        assert!(parse_time_report("0m.5s").is_err());
        assert!(parse_time_report("0m2.s").is_err());
    }

    #[test]
    fn long_output_excerpt_is_truncated() {
        let noise = "x".repeat(500);
        match parse_time_report(&noise) {
            Err(BenchError::ParseError { excerpt }) => {
                assert!(excerpt.ends_with("..."));
                assert_eq!(excerpt.chars().count(), EXCERPT_CHARS + 3);
            }
            other => panic!("expected ParseError, got {:?}", other),
        }
    }
}
