//! Commands run around a ramp, e.g. to arm a DAW before the fader moves.
//!
//! Hooks belong to the binary, not to the ramp itself. A failing hook is
//! logged and the ramp goes ahead.

use crate::error::RampError;
use crate::transport::CcTransport;
use serde::Deserialize;
use std::process::{Command, ExitStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RunHooks {
    #[serde(default)]
    pub pre_run: Option<String>,
    #[serde(default)]
    pub post_run: Option<String>,
}

impl RunHooks {
    pub fn run_pre(&self) {
        Self::run_logged("pre-run", self.pre_run.as_deref());
    }

    pub fn run_post(&self) {
        Self::run_logged("post-run", self.post_run.as_deref());
    }

    /// Runs the post-run hook at the end of a ramp. With `close_first` the
    /// transport is closed before the hook runs; otherwise it is handed back
    /// still open so the device outlives the hook.
    pub fn finish<T: CcTransport>(&self, transport: T, close_first: bool) -> Option<T> {
        let held: Option<T> = if close_first {
            transport.close();
            None
        } else {
            Some(transport)
        };
        self.run_post();
        held
    }

    fn run_logged(label: &str, command: Option<&str>) {
        let Some(command) = command.map(str::trim).filter(|c| !c.is_empty()) else {
            return;
        };
        log::info!("running {} hook: {}", label, command);
        if let Err(err) = run(command) {
            log::warn!("{} hook failed: {}", label, err);
        }
    }
}

/// Runs `command` through the platform shell and waits for it.
pub fn run(command: &str) -> Result<(), RampError> {
    let status: ExitStatus = shell(command).status().map_err(|e| RampError::Hook {
        command: command.to_string(),
        reason: e.to_string(),
    })?;
    if status.success() {
        Ok(())
    } else {
        Err(RampError::Hook {
            command: command.to_string(),
            reason: format!("exited with {status}"),
        })
    }
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd: Command = Command::new("cmd");
    cmd.args(["/C", command]);
    cmd
}

#[cfg(not(windows))]
fn shell(command: &str) -> Command {
    let mut cmd: Command = Command::new("sh");
    cmd.args(["-c", command]);
    cmd
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn successful_command() {
        assert_eq!(run("true"), Ok(()));
    }

    #[test]
    fn failing_command_is_reported() {
        let err: RampError = run("exit 3").unwrap_err();
        assert!(matches!(err, RampError::Hook { .. }));
    }

    #[test]
    fn hooks_run_in_order() {
        let mut path = std::env::temp_dir();
        path.push(format!("cc_ramp_hooks_{}", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let file: String = path.to_string_lossy().to_string();
        let hooks: RunHooks = RunHooks {
            pre_run: Some(format!("echo pre >> '{file}'")),
            post_run: Some(format!("echo post >> '{file}'")),
        };
        hooks.run_pre();
        hooks.run_post();
        let contents: String = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "pre\npost\n");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn finish_closes_or_holds_the_transport() {
        use crate::event::MidiCcEvent;
        use crate::ramp::RampSpec;
        use crate::transport::RecordingTransport;

        let mut path = std::env::temp_dir();
        path.push(format!("cc_ramp_finish_{}", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let file: String = path.to_string_lossy().to_string();
        let hooks: RunHooks = RunHooks {
            pre_run: None,
            post_run: Some(format!("echo post >> '{file}'")),
        };
        let spec: RampSpec = RampSpec::new(0, 7, 0, 1, 1, 0, 0);

        let mut transport: RecordingTransport = RecordingTransport::new();
        transport.send(&MidiCcEvent::new(&spec, 1)).unwrap();
        let held: Option<RecordingTransport> = hooks.finish(transport, false);
        assert_eq!(held.map(|t| t.values()), Some(vec![1]));

        let closed: Option<RecordingTransport> = hooks.finish(RecordingTransport::new(), true);
        assert!(closed.is_none());

        let contents: String = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "post\npost\n");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn blank_hooks_are_skipped() {
        let hooks: RunHooks = RunHooks {
            pre_run: Some("   ".to_string()),
            post_run: None,
        };
        hooks.run_pre();
        hooks.run_post();
    }
}
