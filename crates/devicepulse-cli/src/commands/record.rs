//! `devicepulse record` — the orchestrator: build the sampler set, write
//! headers, run one sampling loop per metric, and leave a session summary
//! behind.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use devicepulse_core::{
    ActivityLiveness, CsvSink, Liveness, Sampler, SamplerJob, SessionMeta, StatusProbes,
    default_samplers, full_header, run_all,
    session::{iso8601_now, new_session_id},
};

pub fn run(
    package: &str,
    serial: Option<&str>,
    adb: &str,
    output: &str,
    interval: &str,
    tags: &[String],
    note: Option<&str>,
) {
    let Some(interval) = super::parse_interval(interval) else {
        eprintln!("Error: invalid interval '{interval}' (expected e.g. \"500ms\", \"1s\")");
        std::process::exit(1);
    };

    let channel = super::make_channel(adb, serial);
    let liveness = ActivityLiveness::new(Arc::clone(&channel), package);
    let probes = StatusProbes::new(Arc::clone(&channel), package);

    if !liveness.is_alive() {
        eprintln!(
            "Warning: {package} has no active component — recording will stop immediately. \
             Start the app first."
        );
    }

    let output_dir = PathBuf::from(output);
    if let Err(err) = fs::create_dir_all(&output_dir) {
        eprintln!("Error creating {}: {err}", output_dir.display());
        std::process::exit(1);
    }

    // Parse tags
    let mut tag_map = HashMap::new();
    for tag in tags {
        if let Some((k, v)) = tag.split_once(':') {
            tag_map.insert(k.to_string(), v.to_string());
        } else {
            eprintln!("Warning: ignoring malformed tag '{tag}' (expected key:value)");
        }
    }

    // Build the sampler set; a failed setup skips that metric only.
    let mut jobs = Vec::new();
    for (name, built) in default_samplers(channel.as_ref(), package) {
        match built {
            Ok(sampler) => {
                let sink = CsvSink::new(output_dir.join(format!("{name}_stats.csv")));
                if let Err(err) = sink.write_header(&full_header(sampler.as_ref())) {
                    eprintln!("Error writing header for {name}: {err}");
                    std::process::exit(1);
                }
                jobs.push(SamplerJob { sampler, sink });
            }
            Err(err) => {
                eprintln!("Warning: skipping {name} sampler: {err}");
            }
        }
    }
    if jobs.is_empty() {
        eprintln!("Error: no samplers could be constructed");
        std::process::exit(1);
    }

    // Set up Ctrl+C: the flag is re-checked at the top of every loop
    // iteration, so an interrupted run still joins and finalizes.
    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    let sampler_names: Vec<String> = jobs
        .iter()
        .map(|job| job.sampler.name().to_string())
        .collect();

    println!("Recording telemetry");
    println!("  Package:   {package}");
    if let Some(serial) = serial {
        println!("  Device:    {serial}");
    }
    println!("  Samplers:  {}", sampler_names.join(", "));
    println!("  Interval:  {}ms", interval.as_millis());
    println!("  Output:    {}", output_dir.display());
    println!("  Stops when the app dies, or on Ctrl+C.");
    println!();

    let started_at = iso8601_now();
    let started = Instant::now();

    let outcomes = run_all(
        jobs,
        Arc::clone(&channel),
        probes,
        Arc::new(liveness),
        interval,
        stop,
    );

    let mut meta = SessionMeta {
        version: 1,
        id: new_session_id(),
        package: package.to_string(),
        serial: serial.map(str::to_string),
        started_at,
        ended_at: iso8601_now(),
        duration_ms: started.elapsed().as_millis() as u64,
        interval_ms: interval.as_millis() as u64,
        samplers: sampler_names,
        rows_per_sampler: HashMap::new(),
        errors: HashMap::new(),
        tags: tag_map,
        note: note.map(str::to_string),
        devicepulse_version: devicepulse_core::VERSION.to_string(),
    };
    meta.apply_outcomes(&outcomes);

    println!("Recording finished after {:.1}s", started.elapsed().as_secs_f64());
    for outcome in &outcomes {
        match &outcome.error {
            Some(err) => println!(
                "  {:<12} {} row(s), stopped early: {err}",
                outcome.sampler, outcome.rows_written
            ),
            None => println!("  {:<12} {} row(s)", outcome.sampler, outcome.rows_written),
        }
    }

    match meta.write(&output_dir) {
        Ok(path) => println!("Session summary written to {}", path.display()),
        Err(err) => eprintln!("Error writing session summary: {err}"),
    }
}
