//! # devicepulse-core
//!
//! **Per-app performance telemetry over adb.**
//!
//! `devicepulse-core` samples runtime telemetry (memory, CPU, battery, frame
//! rate, network quality, thermal zones) from a single application running on
//! an adb-attached device. Each metric is a [`Sampler`] that shells out to a
//! diagnostic command, parses the textual output into structured rows, and is
//! driven by its own fixed-cadence timing loop until the target application
//! no longer has an active component.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::sync::atomic::AtomicBool;
//! use std::time::Duration;
//! use devicepulse_core::{
//!     AdbChannel, ActivityLiveness, CommandChannel, CsvSink, Liveness,
//!     SamplerJob, StatusProbes, default_samplers, full_header, run_all,
//! };
//!
//! let channel: Arc<dyn CommandChannel> = Arc::new(AdbChannel::new("adb", None));
//! let probes = StatusProbes::new(Arc::clone(&channel), "com.example.app");
//! let liveness: Arc<dyn Liveness> =
//!     Arc::new(ActivityLiveness::new(Arc::clone(&channel), "com.example.app"));
//!
//! let mut jobs = Vec::new();
//! for (name, built) in default_samplers(channel.as_ref(), "com.example.app") {
//!     let sampler = built.expect("sampler setup");
//!     let sink = CsvSink::new(format!("{name}_stats.csv"));
//!     sink.write_header(&full_header(sampler.as_ref())).expect("header");
//!     jobs.push(SamplerJob { sampler, sink });
//! }
//!
//! let stop = Arc::new(AtomicBool::new(false));
//! let outcomes = run_all(jobs, channel, probes, liveness, Duration::from_secs(1), stop);
//! for outcome in outcomes {
//!     println!("{}: {} row(s)", outcome.sampler, outcome.rows_written);
//! }
//! ```
//!
//! ## Architecture
//!
//! Channel → Sampler (parse) → Record (+ status snapshot) → CSV sink
//!
//! One plain OS thread per sampler, no shared mutable state between loops.
//! Status probes (camera service, screen-capture service, app foreground,
//! display power) are computed fresh each tick and stamped onto every row of
//! that tick. A loop ends when the liveness check fails, the stop flag is
//! set, or its own command channel errors; other loops are unaffected.

pub mod channel;
pub mod liveness;
pub mod probes;
pub mod sampler;
pub mod samplers;
pub mod scheduler;
pub mod session;
pub mod sink;

pub use channel::{AdbChannel, ChannelError, CommandChannel};
pub use liveness::{ActivityLiveness, Liveness};
pub use probes::{StatusProbes, StatusSnapshot};
pub use sampler::{Record, Sampler, SamplerError, STATUS_COLUMNS, TIMESTAMP_COLUMN, full_header};
pub use samplers::{
    BatterySampler, CpuSampler, FrameRateSampler, MemorySampler, NetworkSampler, ThermalSampler,
    default_samplers,
};
pub use scheduler::{LoopOutcome, SamplerJob, run_all, run_sampler_loop};
pub use session::SessionMeta;
pub use sink::CsvSink;

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
