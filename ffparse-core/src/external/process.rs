//! Tool processes backed by `std::process`.
//!
//! Only the channel named by the invocation is piped. The other channel is
//! connected to the null device so that output nobody reads can never fill a
//! pipe and stall the tool.

use super::{Channel, ExitInfo, Invocation, ToolProcess, ToolSpawner};
use crate::error::{CoreError, CoreResult, command_start_error, command_wait_error};
use std::io::{self, Read};
use std::process::{Child, Command, Stdio};

/// A spawned tool process.
pub struct ChildProcess {
    child: Child,
    command: String,
}

impl ChildProcess {
    /// Operating system identifier of the process.
    pub fn id(&self) -> u32 {
        self.child.id()
    }
}

impl ToolProcess for ChildProcess {
    fn take_channel(&mut self, channel: Channel) -> Option<Box<dyn Read + Send>> {
        match channel {
            Channel::Primary => self
                .child
                .stdout
                .take()
                .map(|out| Box::new(out) as Box<dyn Read + Send>),
            Channel::Diagnostic => self
                .child
                .stderr
                .take()
                .map(|err| Box::new(err) as Box<dyn Read + Send>),
        }
    }

    fn has_exited(&mut self) -> CoreResult<bool> {
        self.child
            .try_wait()
            .map(|status| status.is_some())
            .map_err(|e| command_wait_error(self.command.as_str(), e))
    }

    fn wait(&mut self) -> CoreResult<ExitInfo> {
        self.child
            .wait()
            .map(ExitInfo::from)
            .map_err(|e| command_wait_error(self.command.as_str(), e))
    }

    fn kill(&mut self) -> CoreResult<()> {
        match self.child.kill() {
            Ok(()) => Ok(()),
            // Already reaped or exited on its own.
            Err(e) if e.kind() == io::ErrorKind::InvalidInput => Ok(()),
            Err(e) => Err(CoreError::Io(e)),
        }
    }
}

/// Concrete implementation of `ToolSpawner` using `std::process::Command`.
#[derive(Debug, Clone, Default)]
pub struct StdSpawner;

impl ToolSpawner for StdSpawner {
    type Process = ChildProcess;

    fn spawn(&self, invocation: &Invocation) -> CoreResult<Self::Process> {
        let mut cmd = Command::new(invocation.program());
        cmd.args(invocation.get_args()).stdin(Stdio::null());
        match invocation.channel() {
            Channel::Primary => cmd.stdout(Stdio::piped()).stderr(Stdio::null()),
            Channel::Diagnostic => cmd.stdout(Stdio::null()).stderr(Stdio::piped()),
        };

        log::debug!("Executing command: {}", invocation);

        let command = invocation.tool_name();
        match cmd.spawn() {
            Ok(child) => Ok(ChildProcess { child, command }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::error!("Executable not found: {}", invocation.program().display());
                Err(CoreError::ExecutableMissing(
                    invocation.program().display().to_string(),
                ))
            }
            Err(e) => {
                log::error!("Failed to start command '{}': {}", command, e);
                Err(command_start_error(command, e))
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_pipes_only_requested_channel() -> CoreResult<()> {
        let invocation = Invocation::new("sh", Channel::Diagnostic)
            .args(["-c", "echo out; echo err 1>&2"]);
        let mut process = StdSpawner.spawn(&invocation)?;

        assert!(process.take_channel(Channel::Primary).is_none());
        let mut stderr = process
            .take_channel(Channel::Diagnostic)
            .ok_or_else(|| CoreError::ExecutableMissing("sh".into()))?;
        let mut text = String::new();
        stderr.read_to_string(&mut text)?;
        assert_eq!(text, "err\n");

        let exit = process.wait()?;
        assert!(exit.success());
        assert!(process.has_exited()?);
        process.kill()?;
        Ok(())
    }

    #[test]
    fn test_spawn_missing_program() {
        let invocation = Invocation::new("/nonexistent/ffprobe_12345", Channel::Primary);
        let result = StdSpawner.spawn(&invocation);
        assert!(matches!(result, Err(CoreError::ExecutableMissing(_))));
    }
}
