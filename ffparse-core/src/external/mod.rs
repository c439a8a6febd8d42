// ============================================================================
// ffparse-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Spawning ffmpeg/ffprobe and Exposing Their Output Channels
//
// This module encapsulates the interaction with the external command-line
// tools. The parsers never talk to `std::process` directly: they receive a
// `ToolProcess` exposing the two output channels, a "has exited" predicate
// and the usual wait/kill lifecycle.
//
// KEY COMPONENTS:
// - Channel: primary (stdout) or diagnostic (stderr) output
// - Invocation: program, arguments and the channel carrying the content
// - ToolProcess / ToolSpawner: traits for running processes
// - StdSpawner: real processes through std::process
// - ReplaySpawner: replays captured output without spawning anything
//
// DESIGN PHILOSOPHY:
// This module follows the dependency injection pattern, allowing consumers to
// provide their own implementations of the traits for testing or specialized
// behavior.

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ---- External crate imports ----
use serde::Serialize;

// ---- Standard library imports ----
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

// ============================================================================
// SUBMODULES
// ============================================================================

/// Spawner backed by `std::process::Command`
pub mod process;

/// Spawner that replays previously captured tool output
pub mod replay;

pub use process::{ChildProcess, StdSpawner};
pub use replay::{Replay, ReplayProcess, ReplaySpawner};

// ============================================================================
// CHANNELS AND EXIT STATES
// ============================================================================

/// One of the two output channels of a tool process.
///
/// Which channel carries the meaningful content is decided by the caller for
/// each invocation: listings and probe sections go to stdout, while progress
/// and diagnostics go to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Standard output.
    Primary,
    /// Standard error.
    Diagnostic,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Primary => write!(f, "primary (stdout)"),
            Channel::Diagnostic => write!(f, "diagnostic (stderr)"),
        }
    }
}

/// Exit state of a finished tool process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitInfo {
    code: Option<i32>,
}

impl ExitInfo {
    /// An exit with the given code; `None` means the process was terminated
    /// by a signal.
    pub fn from_code(code: Option<i32>) -> Self {
        Self { code }
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<ExitStatus> for ExitInfo {
    fn from(status: ExitStatus) -> Self {
        Self::from_code(status.code())
    }
}

impl fmt::Display for ExitInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => write!(f, "terminated by signal"),
        }
    }
}

// ============================================================================
// INVOCATION
// ============================================================================

/// A single run of an external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<String>,
    channel: Channel,
}

impl Invocation {
    /// Creates an invocation of `program` whose content is read from `channel`.
    pub fn new(program: impl Into<PathBuf>, channel: Channel) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            channel,
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// The file name of the program, used to label log lines and errors.
    pub fn tool_name(&self) -> String {
        self.program
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

// ============================================================================
// PROCESS ABSTRACTION
// ============================================================================

/// Trait representing a running tool process.
pub trait ToolProcess {
    /// Takes ownership of one output channel. Returns `None` when the channel
    /// was not captured or has already been taken.
    fn take_channel(&mut self, channel: Channel) -> Option<Box<dyn Read + Send>>;

    /// Non-blocking check whether the process has terminated.
    fn has_exited(&mut self) -> CoreResult<bool>;

    /// Waits for the process to terminate.
    fn wait(&mut self) -> CoreResult<ExitInfo>;

    /// Terminates the process. Killing an already finished process is not an
    /// error.
    fn kill(&mut self) -> CoreResult<()>;
}

/// Trait representing something that can start a `ToolProcess`.
pub trait ToolSpawner {
    type Process: ToolProcess;

    /// Starts the invocation. Only the invocation's channel needs to be
    /// captured; the other one may be discarded.
    fn spawn(&self, invocation: &Invocation) -> CoreResult<Self::Process>;
}

// ============================================================================
// EXECUTABLE DISCOVERY
// ============================================================================

/// Resolves the executable for `name`.
///
/// A configured path wins when it exists; otherwise `PATH` is searched. Either
/// way a missing executable is reported before anything is spawned.
pub fn locate_executable(name: &str, configured: Option<&Path>) -> CoreResult<PathBuf> {
    if let Some(path) = configured {
        if path.is_file() {
            log::debug!("Using configured {} at {}", name, path.display());
            return Ok(path.to_path_buf());
        }
        log::warn!("Configured {} path does not exist: {}", name, path.display());
        return Err(CoreError::ExecutableMissing(path.display().to_string()));
    }

    match which::which(name) {
        Ok(path) => {
            log::debug!("Found {} on PATH: {}", name, path.display());
            Ok(path)
        }
        Err(e) => {
            log::warn!("Dependency '{}' not found: {}", name, e);
            Err(CoreError::ExecutableMissing(name.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_display_and_name() {
        let invocation = Invocation::new("/usr/local/bin/ffprobe", Channel::Primary)
            .args(["-show_format", "-show_streams"])
            .arg("movie.mkv");
        assert_eq!(
            invocation.to_string(),
            "/usr/local/bin/ffprobe -show_format -show_streams movie.mkv"
        );
        assert_eq!(invocation.tool_name(), "ffprobe");
        assert_eq!(invocation.get_args().len(), 3);
    }

    #[test]
    fn test_exit_info() {
        assert!(ExitInfo::from_code(Some(0)).success());
        assert!(!ExitInfo::from_code(Some(1)).success());
        assert!(!ExitInfo::from_code(None).success());
        assert_eq!(ExitInfo::from_code(Some(1)).to_string(), "exit code 1");
    }

    #[test]
    fn test_locate_missing_configured_path() {
        let result = locate_executable("ffmpeg", Some(Path::new("/surely/not/here/ffmpeg")));
        assert!(matches!(result, Err(CoreError::ExecutableMissing(_))));
    }

    #[test]
    fn test_locate_missing_on_path() {
        let result = locate_executable("ffparse_nonexistent_tool_12345", None);
        assert!(matches!(result, Err(CoreError::ExecutableMissing(name)) if name == "ffparse_nonexistent_tool_12345"));
    }
}
