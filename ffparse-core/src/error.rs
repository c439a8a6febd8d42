// ============================================================================
// ffparse-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Custom Error Types for ffparse-core
//
// This module defines the error types used throughout the ffparse-core
// library. It provides a unified error handling approach with specific error
// variants for process plumbing, listing destructuring and, most importantly,
// the classified errors recognized in the output of a running tool.
//
// KEY COMPONENTS:
// - ErrorKind / ToolError: tagged classified error raised from an output line
// - CoreError: Main error enum with variants for all error categories
// - CoreResult: Type alias for Result with CoreError
// - Helper functions for creating common error types

// ---- Internal crate imports ----
use crate::external::Channel;

// ---- External crate imports ----
use thiserror::Error;

// ---- Standard library imports ----
use std::fmt;
use std::io;

// ============================================================================
// CLASSIFIED TOOL ERRORS
// ============================================================================

/// The kind of a classified error recognized in tool output.
///
/// Dispatch on the kind rather than on the text of the message: the same kind
/// may be produced by several signatures with different trigger texts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The output artifact already exists and overwriting was not requested.
    OutputAlreadyExists,
    /// ffmpeg could not pick an encoder for the requested output format.
    EncoderSelectionFailed,
    /// A duration or timestamp argument could not be parsed by the tool.
    InvalidDuration,
    /// A caller-declared kind outside the built-in taxonomy.
    Custom(String),
}

impl ErrorKind {
    /// Kinds whose message is the whole offending line instead of the trigger.
    fn reports_full_line(&self) -> bool {
        matches!(self, ErrorKind::OutputAlreadyExists)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::OutputAlreadyExists => write!(f, "output already exists"),
            ErrorKind::EncoderSelectionFailed => write!(f, "encoder selection failed"),
            ErrorKind::InvalidDuration => write!(f, "invalid duration"),
            ErrorKind::Custom(name) => write!(f, "{name}"),
        }
    }
}

/// A classified error raised from a single line of tool output.
///
/// The positional arguments are the trigger text followed by the text of each
/// signature sub-pattern that matched, in declaration order. Sub-patterns that
/// did not match contribute nothing, so positions are only stable when every
/// sub-pattern matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolError {
    kind: ErrorKind,
    message: String,
    args: Vec<String>,
}

impl ToolError {
    /// Builds a classified error from the offending line and its captures.
    pub fn new(kind: ErrorKind, line: &str, args: Vec<String>) -> Self {
        let message = match args.first() {
            Some(trigger) if !kind.reports_full_line() => trigger.clone(),
            _ => line.to_string(),
        };
        Self { kind, message, args }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// All positional arguments, trigger text first.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Positional argument at `index` (0 is the trigger text).
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Path named in an already-exists message, e.g. `out.avi` from
    /// `File 'out.avi' already exists.`
    pub fn path(&self) -> Option<&str> {
        if self.kind != ErrorKind::OutputAlreadyExists {
            return None;
        }
        let start = self.message.find('\'')? + 1;
        let end = self.message.rfind('\'')?;
        (end > start).then(|| &self.message[start..end])
    }

    /// Encoder named by an encoder-selection failure (`codec mpeg4` -> `mpeg4`).
    pub fn encoder(&self) -> Option<&str> {
        match self.kind {
            ErrorKind::EncoderSelectionFailed => self.keyword_capture("codec"),
            _ => None,
        }
    }

    /// Output format named by an encoder-selection failure (`format avi` -> `avi`).
    pub fn media_format(&self) -> Option<&str> {
        match self.kind {
            ErrorKind::EncoderSelectionFailed => self.keyword_capture("format"),
            _ => None,
        }
    }

    /// Offending timestamp of an invalid-duration error.
    pub fn duration(&self) -> Option<&str> {
        match self.kind {
            ErrorKind::InvalidDuration => self.arg(1),
            _ => None,
        }
    }
}

impl ToolError {
    /// Value of the `<keyword> <value>` capture, wherever it landed among the
    /// arguments. Captures shift left when an earlier sub-pattern missed.
    fn keyword_capture(&self, keyword: &str) -> Option<&str> {
        self.args.iter().skip(1).find_map(|arg| {
            arg.strip_prefix(keyword)
                .filter(|rest| rest.starts_with(char::is_whitespace))
                .map(str::trim)
        })
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::OutputAlreadyExists => write!(f, "output already exists: {}", self.message),
            ErrorKind::EncoderSelectionFailed => match self.encoder() {
                Some(encoder) => write!(f, "{} for {}", self.message, encoder),
                None => write!(f, "{}", self.message),
            },
            ErrorKind::InvalidDuration => match self.duration() {
                Some(duration) => write!(f, "{}:{}", self.message, duration),
                None => write!(f, "{}", self.message),
            },
            ErrorKind::Custom(name) => write!(f, "{}: {}", name, self.message),
        }
    }
}

impl std::error::Error for ToolError {}

// ============================================================================
// CORE ERROR TYPE
// ============================================================================

/// Main error type for the ffparse-core library.
#[derive(Error, Debug)]
pub enum CoreError {
    // ---- Discovery Errors ----
    #[error("Executable '{0}' does not exist")]
    ExecutableMissing(String),

    // ---- Classified Output Errors ----
    #[error("{0}")]
    Tool(#[from] ToolError),

    // ---- Parsing Errors ----
    #[error("Listing row is missing field {index} ({name}): {row:?}")]
    MissingField {
        index: usize,
        name: &'static str,
        row: Vec<String>,
    },

    #[error("Unexpected output from {tool}: {message}")]
    UnexpectedOutput { tool: String, message: String },

    // ---- Configuration Errors ----
    #[error("Invalid pattern '{pattern}' in error signature '{trigger}': {source}")]
    InvalidSignature {
        trigger: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    // ---- Process Errors ----
    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Failed to wait for command '{0}': {1}")]
    CommandWait(String, #[source] io::Error),

    #[error("Command '{command}' exited unsuccessfully ({exit})")]
    CommandFailed { command: String, exit: String },

    #[error("The {channel} channel of '{command}' is not available")]
    ChannelUnavailable { channel: Channel, command: String },

    // ---- I/O Errors ----
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CoreError {
    /// The classified tool error, if this is one.
    pub fn tool_error(&self) -> Option<&ToolError> {
        match self {
            CoreError::Tool(err) => Some(err),
            _ => None,
        }
    }

    /// True when the tool refused to overwrite an existing output.
    pub fn is_already_exists(&self) -> bool {
        self.tool_error()
            .is_some_and(|err| *err.kind() == ErrorKind::OutputAlreadyExists)
    }
}

/// Type alias for Result with CoreError as the error type.
pub type CoreResult<T> = Result<T, CoreError>;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Creates a `CoreError::CommandStart` error.
pub fn command_start_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

/// Creates a `CoreError::CommandWait` error.
pub fn command_wait_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(cmd.into(), err)
}

/// Creates a `CoreError::CommandFailed` error from a description of the exit.
pub fn command_failed_error(cmd: impl Into<String>, exit: impl fmt::Display) -> CoreError {
    CoreError::CommandFailed {
        command: cmd.into(),
        exit: exit.to_string(),
    }
}

/// Creates a `CoreError::MissingField` error for a short listing row.
pub fn missing_field_error(index: usize, name: &'static str, row: &[String]) -> CoreError {
    CoreError::MissingField {
        index,
        name,
        row: row.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_exists_reports_full_line() {
        let line = "File 'out.avi' already exists. Overwrite? [y/N] Not overwriting - exiting";
        let err = ToolError::new(
            ErrorKind::OutputAlreadyExists,
            line,
            vec!["File ".to_string()],
        );
        assert_eq!(err.message(), line);
        assert_eq!(err.path(), Some("out.avi"));
        assert_eq!(err.arg(0), Some("File "));
    }

    #[test]
    fn test_encoder_selection_accessors() {
        let err = ToolError::new(
            ErrorKind::EncoderSelectionFailed,
            "Automatic encoder selection failed for output stream #0:0.",
            vec![
                "Automatic encoder selection failed".to_string(),
                "codec mpeg4".to_string(),
                "format avi".to_string(),
            ],
        );
        assert_eq!(err.message(), "Automatic encoder selection failed");
        assert_eq!(err.encoder(), Some("mpeg4"));
        assert_eq!(err.media_format(), Some("avi"));
        assert_eq!(err.duration(), None);
        assert_eq!(err.to_string(), "Automatic encoder selection failed for mpeg4");
    }

    #[test]
    fn test_invalid_duration_display() {
        let err = ToolError::new(
            ErrorKind::InvalidDuration,
            "Invalid duration specification for ss: 00:00:01:00",
            vec![
                "Invalid duration specification".to_string(),
                "00:00:01:00".to_string(),
            ],
        );
        assert_eq!(err.duration(), Some("00:00:01:00"));
        assert_eq!(err.to_string(), "Invalid duration specification:00:00:01:00");
        assert_eq!(err.path(), None);
    }

    #[test]
    fn test_core_error_dispatch_on_kind() {
        let err: CoreError = ToolError::new(
            ErrorKind::OutputAlreadyExists,
            "File 'a.mkv' already exists.",
            vec!["File ".to_string()],
        )
        .into();
        assert!(err.is_already_exists());
        assert!(!CoreError::ExecutableMissing("ffmpeg".into()).is_already_exists());
    }
}
