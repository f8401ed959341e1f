//! Device command channel — runs one diagnostic command, returns its stdout
//! as trimmed text lines.
//!
//! The channel is synchronous and blocking: one invocation is a self-contained
//! request/response with no session state, so concurrent calls from
//! independent sampler threads are safe. No timeout is applied — a hung
//! command blocks its caller.

use std::process::Command;

use thiserror::Error;

/// Error from a single command invocation.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The command binary could not be launched at all.
    #[error("failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran but exited with a non-zero status.
    #[error("`{command}` exited with status {code:?}")]
    NonZeroExit { command: String, code: Option<i32> },
}

/// Executes a device-diagnostic command string and returns its standard
/// output as text lines.
pub trait CommandChannel: Send + Sync {
    /// Run `command` to completion and return its stdout, trimmed and split
    /// into lines. Empty output yields an empty vector.
    fn run(&self, command: &str) -> Result<Vec<String>, ChannelError>;
}

/// Command channel backed by the `adb` client.
///
/// The command string is whitespace-split into adb arguments; shell
/// metacharacters (`|`, `;`) inside a `shell` command are forwarded verbatim
/// and execute on the device, which is how the batched thermal reads and the
/// pre-filtered `top` invocation work.
pub struct AdbChannel {
    adb_path: String,
    serial: Option<String>,
}

impl AdbChannel {
    /// Create a channel for the given adb binary, optionally pinned to one
    /// device serial (`adb -s <serial>`).
    pub fn new(adb_path: impl Into<String>, serial: Option<String>) -> Self {
        Self {
            adb_path: adb_path.into(),
            serial,
        }
    }

    /// Check that the adb client can be launched at all.
    pub fn is_available(&self) -> bool {
        Command::new(&self.adb_path)
            .arg("version")
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

impl CommandChannel for AdbChannel {
    fn run(&self, command: &str) -> Result<Vec<String>, ChannelError> {
        let mut invocation = Command::new(&self.adb_path);
        if let Some(serial) = &self.serial {
            invocation.arg("-s").arg(serial);
        }
        invocation.args(command.split_whitespace());

        let output = invocation.output().map_err(|source| ChannelError::Launch {
            command: command.to_string(),
            source,
        })?;

        if !output.status.success() {
            return Err(ChannelError::NonZeroExit {
                command: command.to_string(),
                code: output.status.code(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout);
        Ok(text.trim().lines().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The tests drive AdbChannel with ordinary binaries in place of adb; the
    // channel only cares about argv construction and exit status.

    #[test]
    fn run_splits_trimmed_stdout_into_lines() {
        let channel = AdbChannel::new("printf", None);
        let lines = channel.run("a\\nb\\n").unwrap();
        assert_eq!(lines, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn run_passes_command_as_separate_args() {
        let channel = AdbChannel::new("echo", None);
        let lines = channel.run("shell dumpsys battery").unwrap();
        assert_eq!(lines, vec!["shell dumpsys battery".to_string()]);
    }

    #[test]
    fn run_prepends_serial_flag() {
        let channel = AdbChannel::new("echo", Some("emulator-5554".to_string()));
        let lines = channel.run("shell dumpsys power").unwrap();
        assert_eq!(lines, vec!["-s emulator-5554 shell dumpsys power".to_string()]);
    }

    #[test]
    fn run_empty_output_is_empty_vec() {
        let channel = AdbChannel::new("true", None);
        let lines = channel.run("").unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn run_missing_binary_is_launch_error() {
        let channel = AdbChannel::new("/nonexistent/adb", None);
        let err = channel.run("shell dumpsys battery").unwrap_err();
        assert!(matches!(err, ChannelError::Launch { .. }));
    }

    #[test]
    fn run_nonzero_exit_is_error() {
        let channel = AdbChannel::new("false", None);
        let err = channel.run("").unwrap_err();
        assert!(matches!(err, ChannelError::NonZeroExit { .. }));
    }

    #[test]
    fn is_available_false_for_missing_binary() {
        let channel = AdbChannel::new("/nonexistent/adb", None);
        assert!(!channel.is_available());
    }
}
