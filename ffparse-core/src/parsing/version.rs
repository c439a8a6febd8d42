//! Version banner parsing.
//!
//! Both tools print `<tool> version <version-string>` as the very first line
//! of `-version`, e.g. `ffmpeg version 3.2 Copyright (c) 2000-2016 the FFmpeg
//! developers`. Everything after `version ` is kept.

use crate::error::{CoreError, CoreResult};
use crate::external::Channel;
use crate::parsing::driver::{Flow, OutputParser};
use serde::Serialize;
use std::fmt;

/// Version reported by a tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolVersion {
    pub tool: String,
    pub version: String,
}

impl ToolVersion {
    /// First token of the version string (`3.2`, `n6.1.1`, `N-113000-g...`).
    pub fn short_version(&self) -> &str {
        self.version.split_whitespace().next().unwrap_or(&self.version)
    }
}

impl fmt::Display for ToolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} version {}", self.tool, self.version)
    }
}

/// Extracts the version string from a banner line starting with
/// `<tool> version `.
pub fn parse_version_line(tool: &str, line: &str) -> Option<String> {
    let marker = format!("{tool} version ");
    let version = line.strip_prefix(&marker)?.trim();
    (!version.is_empty()).then(|| version.to_string())
}

/// Reads the first line of `-version` output and stops.
#[derive(Debug, Clone)]
pub struct VersionParser {
    tool: String,
    version: Option<String>,
    first_line: Option<String>,
}

impl VersionParser {
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            version: None,
            first_line: None,
        }
    }
}

impl OutputParser for VersionParser {
    type Output = ToolVersion;

    fn channel(&self) -> Channel {
        Channel::Primary
    }

    fn feed(&mut self, line: &str) -> Flow {
        self.version = parse_version_line(&self.tool, line);
        self.first_line = Some(line.to_string());
        Flow::Stop
    }

    fn finish(self) -> CoreResult<ToolVersion> {
        match self.version {
            Some(version) => Ok(ToolVersion {
                tool: self.tool,
                version,
            }),
            None => Err(CoreError::UnexpectedOutput {
                tool: self.tool,
                message: match self.first_line {
                    Some(line) => format!("no version in first line: {line}"),
                    None => "no output".to_string(),
                },
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version_line() {
        let line = "ffmpeg version 3.2 Copyright (c) 2000-2016 the FFmpeg developers";
        assert_eq!(
            parse_version_line("ffmpeg", line).as_deref(),
            Some("3.2 Copyright (c) 2000-2016 the FFmpeg developers")
        );
        assert_eq!(parse_version_line("ffprobe", line), None);
        assert_eq!(parse_version_line("ffmpeg", "ffmpeg version "), None);
    }

    #[test]
    fn test_version_marker_must_start_the_line() {
        assert_eq!(parse_version_line("ffmpeg", "libavutil: ffmpeg version 9 junk"), None);
        let mut parser = VersionParser::new("ffmpeg");
        parser.feed("built with ffmpeg version 9");
        assert!(matches!(parser.finish(), Err(CoreError::UnexpectedOutput { .. })));
    }

    #[test]
    fn test_parser_stops_after_first_line() {
        let mut parser = VersionParser::new("ffprobe");
        assert_eq!(
            parser.feed("ffprobe version n6.1.1 Copyright (c) 2007-2023 the FFmpeg developers"),
            Flow::Stop
        );
        let version = parser.finish().unwrap();
        assert_eq!(version.short_version(), "n6.1.1");
        assert_eq!(
            version.to_string(),
            "ffprobe version n6.1.1 Copyright (c) 2007-2023 the FFmpeg developers"
        );
    }

    #[test]
    fn test_missing_version_is_unexpected_output() {
        let mut parser = VersionParser::new("ffmpeg");
        parser.feed("Hyper fast Audio and Video encoder");
        assert!(matches!(
            parser.finish(),
            Err(CoreError::UnexpectedOutput { tool, .. }) if tool == "ffmpeg"
        ));
        assert!(VersionParser::new("ffmpeg").finish().is_err());
    }
}
