//! FrameRateSampler — tails frame report log lines and emits received/render
//! fps per user.
//!
//! The logcat command is rebuilt every tick with `-T <epoch>` pinned to the
//! previous tick's timestamp, so each invocation reads only entries newer
//! than the last read. The first tick reads from loop start.

use regex::Regex;

use crate::sampler::{Sampler, SamplerError};

use super::epoch_stamp;

/// Frame report line shape, e.g.
/// `Frame reports(user-7):Frames received = 120,Frames lost = 3,Frame render = 117`.
const FRAME_REPORT_PATTERN: &str =
    r"Frame reports\((.+)\):Frames received = (\d+),Frames lost = (\d+),Frame render = (\d+)";

pub struct FrameRateSampler {
    pattern: Regex,
    since: Option<String>,
}

impl FrameRateSampler {
    pub fn new() -> Result<Self, SamplerError> {
        Ok(Self {
            pattern: Regex::new(FRAME_REPORT_PATTERN)?,
            since: None,
        })
    }
}

impl Sampler for FrameRateSampler {
    fn name(&self) -> &'static str {
        "fps"
    }

    fn header(&self) -> Vec<String> {
        vec![
            "User".to_string(),
            "Received fps".to_string(),
            "Render fps".to_string(),
        ]
    }

    fn build_command(&mut self) -> String {
        let now = epoch_stamp();
        let since = self.since.replace(now.clone()).unwrap_or(now);
        format!("logcat -T {since} -d tag:V *:S")
    }

    /// The lost count is captured (the full pattern anchors the match) but
    /// not emitted; the output schema has no lost-fps column.
    fn parse_line(&self, line: &str) -> Option<Vec<String>> {
        let caps = self.pattern.captures(line)?;
        Some(vec![
            caps.get(1)?.as_str().to_string(),
            caps.get(2)?.as_str().to_string(),
            caps.get(4)?.as_str().to_string(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sampler() -> FrameRateSampler {
        FrameRateSampler::new().unwrap()
    }

    #[test]
    fn report_line_emits_user_received_render() {
        let line = "08-05 14:02:11.482  3021  3100 V tag: Frame reports(user-7):Frames received = 120,Frames lost = 3,Frame render = 117";
        let fields = sampler().parse_line(line).unwrap();
        assert_eq!(
            fields,
            vec![
                "user-7".to_string(),
                "120".to_string(),
                "117".to_string()
            ]
        );
    }

    #[test]
    fn lost_count_is_parsed_but_not_emitted() {
        let line = "Frame reports(a):Frames received = 10,Frames lost = 9,Frame render = 1";
        let fields = sampler().parse_line(line).unwrap();
        assert_eq!(fields.len(), 3);
        assert!(!fields.contains(&"9".to_string()));
    }

    #[test]
    fn unrelated_line_is_no_match() {
        assert!(
            sampler()
                .parse_line("08-05 14:02:11.482 V tag: codec reconfigured")
                .is_none()
        );
    }

    #[test]
    fn partial_report_line_is_no_match() {
        assert!(
            sampler()
                .parse_line("Frame reports(user-7):Frames received = 120")
                .is_none()
        );
    }

    #[test]
    fn command_is_rebuilt_with_previous_tick_timestamp() {
        let mut s = sampler();
        let first = s.build_command();
        let first_stamp = s.since.clone().unwrap();
        assert_eq!(first, format!("logcat -T {first_stamp} -d tag:V *:S"));

        // Tick 2 reads from tick 1's timestamp and remembers its own for
        // tick 3.
        let second = s.build_command();
        let second_stamp = s.since.clone().unwrap();
        assert_eq!(second, format!("logcat -T {first_stamp} -d tag:V *:S"));

        let third = s.build_command();
        assert_eq!(third, format!("logcat -T {second_stamp} -d tag:V *:S"));
    }

    #[test]
    fn header_matches_emitted_field_count() {
        let s = sampler();
        let line = "Frame reports(u):Frames received = 1,Frames lost = 0,Frame render = 1";
        assert_eq!(s.header().len(), s.parse_line(line).unwrap().len());
    }
}
