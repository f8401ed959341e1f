//! BatterySampler — reads the battery service dump and emits the charge
//! level percentage.

use crate::sampler::Sampler;

pub struct BatterySampler {
    command: String,
}

impl BatterySampler {
    pub fn new() -> Self {
        Self {
            command: "shell dumpsys battery".to_string(),
        }
    }
}

impl Default for BatterySampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler for BatterySampler {
    fn name(&self) -> &'static str {
        "battery"
    }

    fn header(&self) -> Vec<String> {
        vec!["Battery Level (%)".to_string()]
    }

    fn build_command(&mut self) -> String {
        self.command.clone()
    }

    /// The dump's `level: N` line; everything after the first colon, trimmed,
    /// is the integer percentage.
    fn parse_line(&self, line: &str) -> Option<Vec<String>> {
        if !line.contains("level") {
            return None;
        }
        let (_, value) = line.split_once(':')?;
        let level: i64 = value.trim().parse().ok()?;
        Some(vec![level.to_string()])
    }
}
