//! MemorySampler — reads the target's `dumpsys meminfo` summary and emits the
//! total PSS in megabytes.

use crate::sampler::Sampler;

pub struct MemorySampler {
    command: String,
}

impl MemorySampler {
    pub fn new(package: &str) -> Self {
        Self {
            command: format!("shell dumpsys meminfo {package}"),
        }
    }
}

impl Sampler for MemorySampler {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn header(&self) -> Vec<String> {
        vec!["Memory Total (MB)".to_string()]
    }

    fn build_command(&mut self) -> String {
        self.command.clone()
    }

    /// The meminfo dump carries one summary line containing `TOTAL`; its
    /// second whitespace token is the total in kilobytes.
    fn parse_line(&self, line: &str) -> Option<Vec<String>> {
        if !line.contains("TOTAL") {
            return None;
        }
        let kb: i64 = line.split_whitespace().nth(1)?.parse().ok()?;
        Some(vec![(kb as f64 / 1024.0).to_string()])
    }
}
