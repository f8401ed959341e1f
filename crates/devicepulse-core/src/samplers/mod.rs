//! The concrete metric samplers.
//!
//! Six samplers make up the default set; each one owns its diagnostic
//! command and parsing rule and nothing else. The command strings target
//! the stock Android diagnostic surface (`dumpsys`, `top`, `logcat`,
//! `/sys/class/thermal`) and are fixed at construction except for the
//! logcat-backed pair, which embed a timestamp and are rebuilt every tick.

pub mod battery;
pub mod cpu;
pub mod framerate;
pub mod memory;
pub mod network;
pub mod thermal;

pub use battery::BatterySampler;
pub use cpu::CpuSampler;
pub use framerate::FrameRateSampler;
pub use memory::MemorySampler;
pub use network::NetworkSampler;
pub use thermal::ThermalSampler;

use std::time::{SystemTime, UNIX_EPOCH};

use crate::channel::CommandChannel;
use crate::sampler::{Sampler, SamplerError};

/// Construct the default sampler set for one target package, in output-file
/// order. Each entry pairs the sampler name with its construction result so
/// a failed setup (e.g. no thermal zones) can be reported and skipped
/// without affecting the rest of the set.
pub fn default_samplers(
    channel: &dyn CommandChannel,
    package: &str,
) -> Vec<(&'static str, Result<Box<dyn Sampler>, SamplerError>)> {
    vec![
        (
            "memory",
            Ok(Box::new(MemorySampler::new(package)) as Box<dyn Sampler>),
        ),
        (
            "cpu",
            Ok(Box::new(CpuSampler::new(package)) as Box<dyn Sampler>),
        ),
        (
            "fps",
            FrameRateSampler::new().map(|s| Box::new(s) as Box<dyn Sampler>),
        ),
        (
            "network",
            Ok(Box::new(NetworkSampler::new()) as Box<dyn Sampler>),
        ),
        (
            "battery",
            Ok(Box::new(BatterySampler::new()) as Box<dyn Sampler>),
        ),
        (
            "temperature",
            ThermalSampler::new(channel).map(|s| Box::new(s) as Box<dyn Sampler>),
        ),
    ]
}

/// Current Unix time in seconds with millisecond precision, formatted for
/// `logcat -T`.
pub(crate) fn epoch_stamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{:.3}", now.as_secs_f64())
}
