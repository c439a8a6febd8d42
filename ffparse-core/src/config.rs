// ============================================================================
// ffparse-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Tool Locations and Wire Constants
//
// This module defines the configuration used to locate and drive the external
// tools, together with the constants describing the shape of their output
// (listing banners, split counts, probe arguments).
//
// KEY COMPONENTS:
// - ToolConfig: executable overrides and the echo switch
// - Listing: the tabular listings ffmpeg can print, with their banner sizes
// - Default constants: executable names, environment variables, arguments
//
// USAGE:
// The CLI builds a ToolConfig from its flags (which fall back to the
// environment) and hands it to `Tool::locate`.

// ---- External crate imports ----
use serde::Serialize;

// ---- Standard library imports ----
use std::env;
use std::fmt;
use std::path::PathBuf;

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Executable name of the converter.
pub const FFMPEG: &str = "ffmpeg";

/// Executable name of the prober.
pub const FFPROBE: &str = "ffprobe";

/// Environment variable overriding the ffmpeg executable.
pub const FFMPEG_PATH_ENV: &str = "FFPARSE_FFMPEG";

/// Environment variable overriding the ffprobe executable.
pub const FFPROBE_PATH_ENV: &str = "FFPARSE_FFPROBE";

/// Arguments making ffprobe print format and stream sections.
pub const PROBE_ARGS: [&str; 2] = ["-show_format", "-show_streams"];

/// Argument printing the version banner.
pub const VERSION_ARG: &str = "-version";

/// Legend lines printed by `ffmpeg -codecs` before the first codec row.
/// Builds that also list the data and attachment kinds print 12.
pub const CODECS_HEADER_LINES: usize = 10;

/// Legend lines printed by `ffmpeg -devices` before the first device row.
pub const DEVICES_HEADER_LINES: usize = 4;

/// Splits of a `<flags> <name> <description>` row.
pub const FLAGGED_ROW_SPLITS: usize = 2;

/// Splits of a `<name> <#rrggbb>` row.
pub const COLOR_ROW_SPLITS: usize = 1;

// ============================================================================
// LISTINGS
// ============================================================================

/// Tabular listings printed by `ffmpeg -<listing>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Listing {
    Codecs,
    Devices,
    Colors,
    Filters,
    Encoders,
    Decoders,
    Muxers,
    Layouts,
}

impl Listing {
    /// Command-line flag requesting the listing.
    pub fn flag(self) -> &'static str {
        match self {
            Listing::Codecs => "-codecs",
            Listing::Devices => "-devices",
            Listing::Colors => "-colors",
            Listing::Filters => "-filters",
            Listing::Encoders => "-encoders",
            Listing::Decoders => "-decoders",
            Listing::Muxers => "-muxers",
            Listing::Layouts => "-layouts",
        }
    }

    /// Banner lines to skip before the first row.
    pub fn header_lines(self) -> usize {
        match self {
            Listing::Codecs => CODECS_HEADER_LINES,
            Listing::Devices => DEVICES_HEADER_LINES,
            _ => 0,
        }
    }

    /// Maximum number of splits per row.
    pub fn max_splits(self) -> usize {
        match self {
            Listing::Colors => COLOR_ROW_SPLITS,
            _ => FLAGGED_ROW_SPLITS,
        }
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.flag()[1..])
    }
}

// ============================================================================
// TOOL CONFIGURATION
// ============================================================================

/// Where to find the tools and how to run them.
///
/// # Examples
///
/// ```rust
/// use ffparse_core::config::ToolConfig;
///
/// let config = ToolConfig::new()
///     .with_ffprobe_path("/opt/ffmpeg/bin/ffprobe")
///     .with_echo_output(true);
/// assert!(config.echo_output);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolConfig {
    /// Explicit ffmpeg executable; searched on PATH when unset
    pub ffmpeg_path: Option<PathBuf>,

    /// Explicit ffprobe executable; searched on PATH when unset
    pub ffprobe_path: Option<PathBuf>,

    /// Print every raw output line while it is parsed
    pub echo_output: bool,
}

impl ToolConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the executable overrides from `FFPARSE_FFMPEG` and
    /// `FFPARSE_FFPROBE`. Empty values are ignored.
    pub fn from_env() -> Self {
        Self {
            ffmpeg_path: path_from_env(FFMPEG_PATH_ENV),
            ffprobe_path: path_from_env(FFPROBE_PATH_ENV),
            echo_output: false,
        }
    }

    pub fn with_ffmpeg_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ffmpeg_path = Some(path.into());
        self
    }

    pub fn with_ffprobe_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ffprobe_path = Some(path.into());
        self
    }

    pub fn with_echo_output(mut self, echo: bool) -> Self {
        self.echo_output = echo;
        self
    }

    /// Configured path for the named tool.
    pub fn path_for(&self, tool: &str) -> Option<&PathBuf> {
        match tool {
            FFMPEG => self.ffmpeg_path.as_ref(),
            FFPROBE => self.ffprobe_path.as_ref(),
            _ => None,
        }
    }
}

fn path_from_env(var: &str) -> Option<PathBuf> {
    env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
