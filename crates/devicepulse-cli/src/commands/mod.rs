pub mod record;
pub mod scan;

use std::sync::Arc;
use std::time::Duration;

use devicepulse_core::{AdbChannel, CommandChannel};

/// Build the adb command channel shared by every sampler and probe. Warns
/// (but proceeds) when the adb client itself cannot be launched, so the
/// error surfaces once instead of per sampler.
pub fn make_channel(adb: &str, serial: Option<&str>) -> Arc<dyn CommandChannel> {
    let channel = AdbChannel::new(adb, serial.map(str::to_string));
    if !channel.is_available() {
        eprintln!("Warning: `{adb} version` failed — is adb on PATH?");
    }
    Arc::new(channel)
}

/// Parse an interval string like "500ms", "2s", "1m". Bare numbers are
/// seconds. Returns `None` for malformed or zero intervals.
pub fn parse_interval(s: &str) -> Option<Duration> {
    let s = s.trim();

    let (numeric, multiplier) = if let Some(rest) = s.strip_suffix("ms") {
        (rest, 1u64)
    } else if let Some(rest) = s.strip_suffix('s') {
        (rest, 1000)
    } else if let Some(rest) = s.strip_suffix('m') {
        (rest, 60_000)
    } else {
        // Assume seconds
        (s, 1000)
    };

    let value: u64 = numeric.parse().ok()?;
    if value == 0 {
        return None;
    }
    Some(Duration::from_millis(value * multiplier))
}
