//! NetworkSampler — tails media statistics log lines and emits per-stream
//! bitrate, packet loss, and the quality limitation reason.
//!
//! Like the frame-rate sampler, the logcat command is rebuilt every tick
//! against the previous tick's timestamp.

use crate::sampler::Sampler;

use super::epoch_stamp;

pub struct NetworkSampler {
    since: Option<String>,
}

impl NetworkSampler {
    pub fn new() -> Self {
        Self { since: None }
    }
}

impl Default for NetworkSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler for NetworkSampler {
    fn name(&self) -> &'static str {
        "network"
    }

    fn header(&self) -> Vec<String> {
        vec![
            "User".to_string(),
            "Media".to_string(),
            "Bitrate".to_string(),
            "PackagesLost".to_string(),
            "PackagesLostFraction".to_string(),
            "QualityLimitationReason".to_string(),
        ]
    }

    fn build_command(&mut self) -> String {
        let now = epoch_stamp();
        let since = self.since.replace(now.clone()).unwrap_or(now);
        format!("logcat -T {since} -d Stats:V *:S")
    }

    /// A stats line splits on `:` into exactly four segments, the third of
    /// which (trimmed) ends with `Stats`; the fourth segment is a
    /// comma-separated `key=value` list with at least four pairs. The
    /// quality limitation reason comes from the fifth pair when the line
    /// carries one, else `None`.
    fn parse_line(&self, line: &str) -> Option<Vec<String>> {
        let segments: Vec<&str> = line.split(':').collect();
        if segments.len() != 4 {
            return None;
        }
        if !segments[2].trim().ends_with("Stats") {
            return None;
        }

        let pairs: Vec<&str> = segments[3].split(',').collect();
        if pairs.len() < 4 {
            return None;
        }

        let (user, media) = pairs[0].split_once('=')?;
        let bitrate = pairs[1].split_once('=')?.1;
        let lost = pairs[2].split_once('=')?.1;
        let fraction = pairs[3].split_once('=')?.1;
        let reason = if pairs.len() >= 5 {
            pairs[4].split_once('=')?.1.trim()
        } else {
            "None"
        };

        Some(vec![
            user.trim().to_string(),
            media.trim().to_string(),
            bitrate.trim().to_string(),
            lost.trim().to_string(),
            fraction.trim().to_string(),
            reason.to_string(),
        ])
    }
}
