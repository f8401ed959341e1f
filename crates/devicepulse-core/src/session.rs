//! Recording session metadata.
//!
//! One `session.json` is written next to the per-metric CSV files after all
//! sampling loops have joined, so an interrupted or partially-failed run
//! still documents what was recorded, for how long, and what went wrong.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, SecondsFormat};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scheduler::LoopOutcome;

/// Session metadata written to `session.json` at the end of a recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMeta {
    pub version: u32,
    pub id: String,
    pub package: String,
    pub serial: Option<String>,
    pub started_at: String,
    pub ended_at: String,
    pub duration_ms: u64,
    pub interval_ms: u64,
    pub samplers: Vec<String>,
    pub rows_per_sampler: HashMap<String, u64>,
    /// Per-sampler loop failure, keyed by sampler name; empty on a clean run.
    pub errors: HashMap<String, String>,
    pub tags: HashMap<String, String>,
    pub note: Option<String>,
    pub devicepulse_version: String,
}

impl SessionMeta {
    /// Fold the loop outcomes into row counts and errors.
    pub fn apply_outcomes(&mut self, outcomes: &[LoopOutcome]) {
        for outcome in outcomes {
            self.rows_per_sampler
                .insert(outcome.sampler.clone(), outcome.rows_written);
            if let Some(err) = &outcome.error {
                self.errors.insert(outcome.sampler.clone(), err.clone());
            }
        }
    }

    /// Write `session.json` into `dir` and return its path.
    pub fn write(&self, dir: &Path) -> io::Result<PathBuf> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        let path = dir.join("session.json");
        fs::write(&path, json)?;
        Ok(path)
    }
}

/// Fresh random session identifier.
pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// Local-time ISO-8601 timestamp with offset, e.g.
/// `2026-08-05T14:03:07+08:00`.
pub fn iso8601_now() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> SessionMeta {
        SessionMeta {
            version: 1,
            id: new_session_id(),
            package: "com.hongui.test".to_string(),
            serial: None,
            started_at: "2026-08-05T14:00:00+00:00".to_string(),
            ended_at: "2026-08-05T14:05:00+00:00".to_string(),
            duration_ms: 300_000,
            interval_ms: 1_000,
            samplers: vec!["memory".to_string(), "battery".to_string()],
            rows_per_sampler: HashMap::new(),
            errors: HashMap::new(),
            tags: HashMap::new(),
            note: None,
            devicepulse_version: crate::VERSION.to_string(),
        }
    }

    #[test]
    fn apply_outcomes_collects_rows_and_errors() {
        let mut m = meta();
        m.apply_outcomes(&[
            LoopOutcome {
                sampler: "memory".to_string(),
                rows_written: 300,
                error: None,
            },
            LoopOutcome {
                sampler: "battery".to_string(),
                rows_written: 12,
                error: Some("`adb` exited with status Some(1)".to_string()),
            },
        ]);

        assert_eq!(m.rows_per_sampler["memory"], 300);
        assert_eq!(m.rows_per_sampler["battery"], 12);
        assert!(!m.errors.contains_key("memory"));
        assert!(m.errors.contains_key("battery"));
    }

    #[test]
    fn write_produces_parseable_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut m = meta();
        m.apply_outcomes(&[LoopOutcome {
            sampler: "memory".to_string(),
            rows_written: 5,
            error: None,
        }]);

        let path = m.write(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "session.json");

        let parsed: SessionMeta =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.package, "com.hongui.test");
        assert_eq!(parsed.rows_per_sampler["memory"], 5);
        assert_eq!(parsed.version, 1);
    }

    #[test]
    fn serialization_round_trips() {
        let m = meta();
        let json = serde_json::to_string(&m).unwrap();
        let parsed: SessionMeta = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, m.id);
        assert_eq!(parsed.samplers, m.samplers);
        assert_eq!(parsed.interval_ms, 1_000);
    }

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(new_session_id(), new_session_id());
    }

    #[test]
    fn iso8601_now_has_offset() {
        let stamp = iso8601_now();
        assert!(stamp.contains('T'));
        assert!(stamp.contains('+') || stamp.contains('-'));
    }
}
