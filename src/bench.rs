use chrono::Utc;
use tracing::{debug, info};

use crate::errors::BenchError;
use crate::exec::Executor;
use crate::parse::parse_time_report;
use crate::types::{BenchReport, Target, Timing};

/// Upper bound on up-front sample storage; larger runs grow as they go.
const PREALLOC_SAMPLES: usize = 1024;

/// Run `target` once and return how long it took, in seconds.
pub fn measure_once<E: Executor + ?Sized>(
    executor: &mut E,
    target: &Target,
) -> Result<f64, BenchError> {
    let execution = executor.execute(&target.command, &target.workdir)?;
    match execution.timing {
        Timing::Elapsed(elapsed) => Ok(elapsed.as_secs_f64()),
        Timing::Report(text) => parse_time_report(&text),
    }
}

/// Run `target` exactly `repetitions` times, one after another.
///
/// The first failing run aborts collection; no partial sample set is returned.
pub fn collect_samples<E: Executor + ?Sized>(
    executor: &mut E,
    target: &Target,
    repetitions: usize,
) -> Result<Vec<f64>, BenchError> {
    let mut samples = Vec::with_capacity(repetitions.min(PREALLOC_SAMPLES));
    for run in 0..repetitions {
        let secs = measure_once(executor, target)?;
        debug!(label = %target.label, run, secs, "sample");
        samples.push(secs);
    }
    Ok(samples)
}

/// Mean duration of `repetitions` sequential runs of `target`.
pub fn benchmark<E: Executor + ?Sized>(
    executor: &mut E,
    target: &Target,
    repetitions: usize,
) -> Result<f64, BenchError> {
    let samples = collect_samples(executor, target, repetitions)?;
    average(&samples)
}

pub fn average(samples: &[f64]) -> Result<f64, BenchError> {
    if samples.is_empty() {
        return Err(BenchError::EmptySampleSet);
    }
    Ok(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Benchmark `target` and keep the individual samples alongside the mean.
pub fn run_target<E: Executor + ?Sized>(
    executor: &mut E,
    target: &Target,
    repetitions: usize,
) -> Result<BenchReport, BenchError> {
    let started_at = Utc::now();
    let samples = collect_samples(executor, target, repetitions)?;
    let average_secs = average(&samples)?;

    info!(
        label = %target.label,
        repetitions,
        average_secs,
        "target finished"
    );

    Ok(BenchReport {
        label: target.label.clone(),
        command: target.command.clone(),
        workdir: target.workdir.clone(),
        timing: executor.timing_mode(),
        repetitions,
        samples,
        average_secs,
        started_at,
    })
}
