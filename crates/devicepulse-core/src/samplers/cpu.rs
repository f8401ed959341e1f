//! CpuSampler — reads the target's row from a single `top` pass (pre-filtered
//! on the device) and emits the CPU percentage.

use crate::sampler::Sampler;

pub struct CpuSampler {
    command: String,
}

impl CpuSampler {
    pub fn new(package: &str) -> Self {
        // The pipe runs on the device under `adb shell`, so only the
        // process's own row comes back.
        Self {
            command: format!("shell top -n 1 | grep {package}"),
        }
    }
}

impl Sampler for CpuSampler {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn header(&self) -> Vec<String> {
        vec!["CPU Usage (%)".to_string()]
    }

    fn build_command(&mut self) -> String {
        self.command.clone()
    }

    /// In `top`'s process row the ninth whitespace token is the CPU
    /// percentage, with or without a trailing percent sign.
    fn parse_line(&self, line: &str) -> Option<Vec<String>> {
        let token = line.split_whitespace().nth(8)?;
        let cpu: f64 = token.trim_end_matches('%').parse().ok()?;
        Some(vec![cpu.to_string()])
    }
}
