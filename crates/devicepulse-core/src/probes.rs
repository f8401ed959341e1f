//! Cross-cutting status probes stamped onto every sample row.
//!
//! Three checks — application foreground, display power, and per-service
//! running state — each a parse-a-known-line rule over a diagnostic command's
//! output. A probe that fails in any way (channel error, empty output,
//! unexpected shape) reports `false`; probe trouble must never take down a
//! sampling loop.

use std::sync::Arc;

use log::debug;

use crate::channel::CommandChannel;

/// Short name of the camera service probed on every tick.
pub const CAMERA_SERVICE: &str = "CameraService";

/// Short name of the screen-capture service probed on every tick.
pub const SCREEN_CAPTURE_SERVICE: &str = "CaptureService";

/// The four status booleans captured once per sampling tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub camera: bool,
    pub screen_capture: bool,
    pub foreground: bool,
    pub display_on: bool,
}

impl StatusSnapshot {
    /// Render the snapshot as row fields, in output-column order.
    pub fn as_fields(&self) -> [String; 4] {
        [
            self.camera.to_string(),
            self.screen_capture.to_string(),
            self.foreground.to_string(),
            self.display_on.to_string(),
        ]
    }
}

/// Status probes for one target package, shared by every sampler.
#[derive(Clone)]
pub struct StatusProbes {
    channel: Arc<dyn CommandChannel>,
    package: String,
}

impl StatusProbes {
    pub fn new(channel: Arc<dyn CommandChannel>, package: impl Into<String>) -> Self {
        Self {
            channel,
            package: package.into(),
        }
    }

    /// Capture all four status booleans. Called once per sampling tick; every
    /// row produced by that tick carries the same snapshot.
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            camera: self.service_running(CAMERA_SERVICE),
            screen_capture: self.service_running(SCREEN_CAPTURE_SERVICE),
            foreground: self.app_foreground(),
            display_on: self.display_on(),
        }
    }

    /// Whether the package's `<package>/.<service>` component is currently
    /// running: the service status dump starts with a `SERVICE` line iff the
    /// component is live.
    pub fn service_running(&self, service: &str) -> bool {
        let command = format!(
            "shell dumpsys activity -p {pkg} service {pkg}/.{service}",
            pkg = self.package
        );
        let Some(lines) = self.probe_lines(&command) else {
            return false;
        };
        lines
            .first()
            .is_some_and(|first| first.starts_with("SERVICE"))
    }

    /// Whether the target package holds the focused-application slot in the
    /// window manager dump.
    pub fn app_foreground(&self) -> bool {
        let Some(lines) = self.probe_lines("shell dumpsys window d") else {
            return false;
        };
        lines
            .iter()
            .find(|l| l.contains("mFocusedApp"))
            .is_some_and(|l| l.contains(&self.package))
    }

    /// Whether the display is powered on according to the power manager dump.
    pub fn display_on(&self) -> bool {
        let Some(lines) = self.probe_lines("shell dumpsys power") else {
            return false;
        };
        lines
            .iter()
            .find(|l| l.contains("Display Power"))
            .is_some_and(|l| l.contains("ON"))
    }

    /// Result-with-fallback wrapper around the channel: a failed probe
    /// command is logged and reported as `None`, never propagated.
    fn probe_lines(&self, command: &str) -> Option<Vec<String>> {
        match self.channel.run(command) {
            Ok(lines) => Some(lines),
            Err(err) => {
                debug!("probe `{command}` failed, defaulting to false: {err}");
                None
            }
        }
    }
}
