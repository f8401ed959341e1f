//! Liveness check — whether the target application still has an active
//! component. Each sampling loop re-evaluates this at the top of every
//! iteration and stops as soon as it fails.

use std::sync::Arc;

use log::warn;

use crate::channel::CommandChannel;

/// Loop-continuation condition for a sampling loop.
pub trait Liveness: Send + Sync {
    fn is_alive(&self) -> bool;
}

/// Liveness backed by the activity manager dump: the package is alive iff
/// some line of `dumpsys activity -p <pkg> r` mentions both its activity
/// records and the package identifier.
#[derive(Clone)]
pub struct ActivityLiveness {
    channel: Arc<dyn CommandChannel>,
    package: String,
}

impl ActivityLiveness {
    pub fn new(channel: Arc<dyn CommandChannel>, package: impl Into<String>) -> Self {
        Self {
            channel,
            package: package.into(),
        }
    }
}

impl Liveness for ActivityLiveness {
    fn is_alive(&self) -> bool {
        let command = format!("shell dumpsys activity -p {} r", self.package);
        match self.channel.run(&command) {
            Ok(lines) => lines
                .iter()
                .any(|l| l.contains("Activities") && l.contains(&self.package)),
            Err(err) => {
                // A dead adb connection reads as "not alive" so the loop ends
                // cleanly instead of spinning on a broken channel.
                warn!("liveness check failed, stopping: {err}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::ChannelError;

    struct StaticChannel(Vec<&'static str>);

    impl CommandChannel for StaticChannel {
        fn run(&self, _command: &str) -> Result<Vec<String>, ChannelError> {
            Ok(self.0.iter().map(|l| l.to_string()).collect())
        }
    }

    struct FailingChannel;

    impl CommandChannel for FailingChannel {
        fn run(&self, command: &str) -> Result<Vec<String>, ChannelError> {
            Err(ChannelError::NonZeroExit {
                command: command.to_string(),
                code: Some(1),
            })
        }
    }

    #[test]
    fn alive_when_activities_line_names_package() {
        let liveness = ActivityLiveness::new(
            Arc::new(StaticChannel(vec![
                "TASK 10048 id=42",
                "    Activities=[ActivityRecord{aa01 u0 com.hongui.test/.MainActivity t42}]",
            ])),
            "com.hongui.test",
        );
        assert!(liveness.is_alive());
    }

    #[test]
    fn not_alive_when_activities_line_is_other_package() {
        let liveness = ActivityLiveness::new(
            Arc::new(StaticChannel(vec![
                "    Activities=[ActivityRecord{bb02 u0 com.other.app/.Main t7}]",
            ])),
            "com.hongui.test",
        );
        assert!(!liveness.is_alive());
    }

    #[test]
    fn not_alive_on_empty_dump() {
        let liveness =
            ActivityLiveness::new(Arc::new(StaticChannel(vec![])), "com.hongui.test");
        assert!(!liveness.is_alive());
    }

    #[test]
    fn channel_error_reads_as_not_alive() {
        let liveness = ActivityLiveness::new(Arc::new(FailingChannel), "com.hongui.test");
        assert!(!liveness.is_alive());
    }
}
