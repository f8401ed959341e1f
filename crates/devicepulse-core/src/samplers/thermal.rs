//! ThermalSampler — reads every thermal zone's current value in one batched
//! device command and emits a single all-zones row per tick.
//!
//! Construction discovers the zone set and its type labels up front (two
//! one-time device queries) and derives the per-tick read command from them.
//! A failed discovery yields an error, never a sampler with an empty or
//! skewed header.

use log::debug;

use crate::channel::CommandChannel;
use crate::sampler::{Sampler, SamplerError};

const THERMAL_ROOT: &str = "/sys/class/thermal";

#[derive(Debug)]
pub struct ThermalSampler {
    command: String,
    header: Vec<String>,
    zone_count: usize,
}

impl ThermalSampler {
    /// Discover the device's thermal zones and build the batched read
    /// command. The `;`-joined `cat` list executes as one device-side shell
    /// line, returning one value per zone per invocation.
    pub fn new(channel: &dyn CommandChannel) -> Result<Self, SamplerError> {
        let zones: Vec<String> = channel
            .run(&format!("shell ls {THERMAL_ROOT}/"))?
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|entry| entry.starts_with("thermal_zone"))
            .collect();
        if zones.is_empty() {
            return Err(SamplerError::NoThermalZones);
        }

        let labels = channel.run(&batched_read(&zones, "type"))?;
        if labels.len() != zones.len() {
            return Err(SamplerError::ZoneLabelMismatch {
                zones: zones.len(),
                labels: labels.len(),
            });
        }

        let header = zones
            .iter()
            .zip(&labels)
            .map(|(zone, label)| format!("{zone} ({})", label.trim()))
            .collect();

        Ok(Self {
            command: batched_read(&zones, "temp"),
            header,
            zone_count: zones.len(),
        })
    }
}

/// `shell cat <root>/<zone>/<leaf>;cat ...` across every zone.
fn batched_read(zones: &[String], leaf: &str) -> String {
    let reads: Vec<String> = zones
        .iter()
        .map(|zone| format!("cat {THERMAL_ROOT}/{zone}/{leaf}"))
        .collect();
    format!("shell {}", reads.join(";"))
}

impl Sampler for ThermalSampler {
    fn name(&self) -> &'static str {
        "temperature"
    }

    fn header(&self) -> Vec<String> {
        self.header.clone()
    }

    fn build_command(&mut self) -> String {
        self.command.clone()
    }

    /// Zone values are integer millidegrees; divide by 1000 for degrees.
    fn parse_line(&self, line: &str) -> Option<Vec<String>> {
        let raw: i64 = line.trim().parse().ok()?;
        Some(vec![(raw as f64 / 1000.0).to_string()])
    }

    /// One row per tick holding every zone's value, in zone order. A tick
    /// whose parsable line count differs from the zone count emits nothing;
    /// a short row would no longer line up with the header.
    fn parse_output(&self, lines: &[String]) -> Vec<Vec<String>> {
        let mut row = Vec::with_capacity(self.zone_count);
        for line in lines {
            if let Some(mut fields) = self.parse_line(line) {
                row.append(&mut fields);
            }
        }
        if row.len() == self.zone_count {
            vec![row]
        } else {
            if !lines.is_empty() {
                debug!(
                    "temperature tick dropped: {} of {} zones readable",
                    row.len(),
                    self.zone_count
                );
            }
            Vec::new()
        }
    }
}
