//! Per-sampler timing loops.
//!
//! Each sampler runs in its own plain OS thread at a fixed cadence,
//! self-correcting for however long the sample itself took: an iteration
//! that finishes early sleeps out the remainder of the interval, one that
//! overruns starts the next iteration immediately. The loop re-checks the
//! liveness condition and the stop flag at the top of every iteration and
//! never cancels mid-iteration.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use log::{info, warn};

use crate::channel::CommandChannel;
use crate::liveness::Liveness;
use crate::probes::StatusProbes;
use crate::sampler::Sampler;
use crate::sink::CsvSink;

/// One sampler paired with its output file.
pub struct SamplerJob {
    pub sampler: Box<dyn Sampler>,
    pub sink: CsvSink,
}

/// How one sampler's loop ended.
#[derive(Debug, Clone)]
pub struct LoopOutcome {
    pub sampler: String,
    pub rows_written: u64,
    /// Set when the loop ended on a channel or sink error rather than on
    /// liveness/stop.
    pub error: Option<String>,
}

/// Drive one sampler until the target dies, the stop flag is set, or the
/// sampling path errors. Errors here are scoped to this loop alone.
pub fn run_sampler_loop(
    sampler: &mut dyn Sampler,
    channel: &dyn CommandChannel,
    probes: &StatusProbes,
    liveness: &dyn Liveness,
    sink: &CsvSink,
    interval: Duration,
    stop: &AtomicBool,
) -> LoopOutcome {
    let name = sampler.name().to_string();
    let mut rows_written = 0u64;
    let mut error = None;

    info!("[{name}] sampling every {interval:?}");

    while !stop.load(Ordering::SeqCst) && liveness.is_alive() {
        let started = Instant::now();

        match sampler.sample_once(channel, probes) {
            Ok(records) => {
                if !records.is_empty() {
                    if let Err(err) = sink.append(&records) {
                        error = Some(err.to_string());
                        break;
                    }
                    rows_written += records.len() as u64;
                }
            }
            Err(err) => {
                error = Some(err.to_string());
                break;
            }
        }

        let elapsed = started.elapsed();
        if elapsed < interval {
            thread::sleep(interval - elapsed);
        }
    }

    match &error {
        Some(err) => warn!("[{name}] stopped after {rows_written} row(s): {err}"),
        None => info!("[{name}] finished, {rows_written} row(s)"),
    }

    LoopOutcome {
        sampler: name,
        rows_written,
        error,
    }
}

/// Spawn one thread per job, drive every loop to completion, and collect the
/// outcomes. The jobs share the channel, probes, liveness check, interval,
/// and stop flag but nothing mutable.
pub fn run_all(
    jobs: Vec<SamplerJob>,
    channel: Arc<dyn CommandChannel>,
    probes: StatusProbes,
    liveness: Arc<dyn Liveness>,
    interval: Duration,
    stop: Arc<AtomicBool>,
) -> Vec<LoopOutcome> {
    let mut outcomes = Vec::with_capacity(jobs.len());
    let mut handles = Vec::with_capacity(jobs.len());

    for job in jobs {
        let name = job.sampler.name().to_string();
        let channel = Arc::clone(&channel);
        let probes = probes.clone();
        let liveness = Arc::clone(&liveness);
        let stop = Arc::clone(&stop);

        let spawned = thread::Builder::new()
            .name(format!("sampler-{name}"))
            .spawn(move || {
                let SamplerJob { mut sampler, sink } = job;
                run_sampler_loop(
                    sampler.as_mut(),
                    channel.as_ref(),
                    &probes,
                    liveness.as_ref(),
                    &sink,
                    interval,
                    &stop,
                )
            });

        match spawned {
            Ok(handle) => handles.push((name, handle)),
            Err(err) => outcomes.push(LoopOutcome {
                sampler: name,
                rows_written: 0,
                error: Some(format!("failed to spawn thread: {err}")),
            }),
        }
    }

    for (name, handle) in handles {
        match handle.join() {
            Ok(outcome) => outcomes.push(outcome),
            Err(_) => outcomes.push(LoopOutcome {
                sampler: name,
                rows_written: 0,
                error: Some("sampler thread panicked".to_string()),
            }),
        }
    }

    outcomes
}
