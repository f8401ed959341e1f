//! Sampler contract shared by every metric.
//!
//! A [`Sampler`] owns the diagnostic command for one metric, the rule that
//! turns each output line into metric fields, and the column header of its
//! output stream. The skeleton — run the command, parse, stamp rows with a
//! timestamp and a fresh status snapshot — lives in default trait methods so
//! each concrete sampler only supplies the format-specific parts.

use chrono::Local;
use thiserror::Error;

use crate::channel::{ChannelError, CommandChannel};
use crate::probes::{StatusProbes, StatusSnapshot};

/// Leading column present in every output stream.
pub const TIMESTAMP_COLUMN: &str = "Timestamp";

/// Trailing status columns present in every output stream, in row order.
pub const STATUS_COLUMNS: [&str; 4] = [
    "Camera status",
    "ScreenSharing status",
    "Foreground status",
    "Display status",
];

/// Error raised while constructing a sampler.
///
/// Construction is the only fallible phase outside the sampling loop itself:
/// a sampler either comes up with a complete, valid header and command set or
/// it does not start at all.
#[derive(Debug, Error)]
pub enum SamplerError {
    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error("invalid frame report pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("no thermal zones found on device")]
    NoThermalZones,

    #[error("thermal zone label query returned {labels} labels for {zones} zones")]
    ZoneLabelMismatch { zones: usize, labels: usize },
}

/// One sample row: timestamp, metric fields, then the four status fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub fields: Vec<String>,
}

impl Record {
    /// Assemble a complete row from the tick timestamp, the metric fields,
    /// and the tick's status snapshot.
    pub fn assemble(stamp: &str, metrics: Vec<String>, status: &StatusSnapshot) -> Self {
        let mut fields = Vec::with_capacity(metrics.len() + 5);
        fields.push(stamp.to_string());
        fields.extend(metrics);
        fields.extend(status.as_fields());
        Self { fields }
    }
}

/// Trait that every metric sampler implements.
///
/// `build_command` takes `&mut self` because the logcat-backed samplers
/// regenerate their command each tick, remembering the previous tick's
/// timestamp so every invocation reads only newer log entries.
pub trait Sampler: Send {
    /// Stable sampler name; also the stem of its output file
    /// (`<name>_stats.csv`).
    fn name(&self) -> &'static str;

    /// Metric-specific column names, excluding the leading timestamp column
    /// and the trailing status columns. Stable for the sampler's lifetime.
    fn header(&self) -> Vec<String>;

    /// The diagnostic command to execute this tick.
    fn build_command(&mut self) -> String;

    /// Convert one output line into metric fields, or `None` when the line
    /// is irrelevant or malformed. Never an error: unparsable lines are
    /// skipped, not fatal.
    fn parse_line(&self, line: &str) -> Option<Vec<String>>;

    /// Convert the full command output into zero or more rows of metric
    /// fields, preserving line order. The default applies [`parse_line`] to
    /// each line and drops non-matches; the thermal sampler overrides this
    /// to assemble one all-zones row per tick.
    ///
    /// [`parse_line`]: Sampler::parse_line
    fn parse_output(&self, lines: &[String]) -> Vec<Vec<String>> {
        lines.iter().filter_map(|l| self.parse_line(l)).collect()
    }

    /// Run one sampling tick: build and execute the command, parse the
    /// output, and — if anything parsed — stamp every row with the current
    /// wall-clock time and one shared status snapshot.
    ///
    /// A channel error here is fatal to this sampler's loop only.
    fn sample_once(
        &mut self,
        channel: &dyn CommandChannel,
        probes: &StatusProbes,
    ) -> Result<Vec<Record>, ChannelError> {
        let command = self.build_command();
        let lines = channel.run(&command)?;
        let rows = self.parse_output(&lines);
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        // One snapshot per tick, shared by every row the tick produced.
        let stamp = wall_clock_stamp();
        let status = probes.snapshot();
        Ok(rows
            .into_iter()
            .map(|metrics| Record::assemble(&stamp, metrics, &status))
            .collect())
    }
}

/// The complete column header for a sampler's output file: timestamp, the
/// sampler's own columns, then the four status columns.
pub fn full_header(sampler: &dyn Sampler) -> Vec<String> {
    let mut columns = Vec::with_capacity(sampler.header().len() + 5);
    columns.push(TIMESTAMP_COLUMN.to_string());
    columns.extend(sampler.header());
    columns.extend(STATUS_COLUMNS.iter().map(|c| c.to_string()));
    columns
}

/// Local wall-clock timestamp with second precision, e.g.
/// `2026-08-05 14:03:07`.
pub fn wall_clock_stamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Record assembly tests
    // -----------------------------------------------------------------------

    #[test]
    fn assemble_orders_timestamp_metrics_status() {
        let status = StatusSnapshot {
            camera: true,
            screen_capture: false,
            foreground: true,
            display_on: false,
        };
        let record = Record::assemble(
            "2026-08-05 12:00:00",
            vec!["120.5625".to_string()],
            &status,
        );
        assert_eq!(
            record.fields,
            vec![
                "2026-08-05 12:00:00",
                "120.5625",
                "true",
                "false",
                "true",
                "false"
            ]
        );
    }

    #[test]
    fn assemble_with_no_metrics_is_timestamp_plus_status() {
        let status = StatusSnapshot::default();
        let record = Record::assemble("2026-08-05 12:00:00", Vec::new(), &status);
        assert_eq!(record.fields.len(), 5);
    }

    // -----------------------------------------------------------------------
    // Header tests
    // -----------------------------------------------------------------------

    struct OneColumn;

    impl Sampler for OneColumn {
        fn name(&self) -> &'static str {
            "one"
        }
        fn header(&self) -> Vec<String> {
            vec!["Value".to_string()]
        }
        fn build_command(&mut self) -> String {
            String::new()
        }
        fn parse_line(&self, _line: &str) -> Option<Vec<String>> {
            None
        }
    }

    #[test]
    fn full_header_wraps_metric_columns() {
        let columns = full_header(&OneColumn);
        assert_eq!(
            columns,
            vec![
                "Timestamp",
                "Value",
                "Camera status",
                "ScreenSharing status",
                "Foreground status",
                "Display status"
            ]
        );
    }

    // -----------------------------------------------------------------------
    // Timestamp format tests
    // -----------------------------------------------------------------------

    #[test]
    fn wall_clock_stamp_has_second_precision() {
        let stamp = wall_clock_stamp();
        // "YYYY-MM-DD HH:MM:SS"
        assert_eq!(stamp.len(), 19);
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[10..11], " ");
        assert_eq!(&stamp[13..14], ":");
    }
}
