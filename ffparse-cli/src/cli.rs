// ffparse-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand, ValueEnum};
use ffparse_core::config::{FFMPEG, FFMPEG_PATH_ENV, FFPROBE, FFPROBE_PATH_ENV};
use ffparse_core::{MediaKind, ToolConfig};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "ffparse: structured output from ffmpeg and ffprobe",
    long_about = "Probes media files and lists the capabilities of the installed ffmpeg build \
                  by parsing the live output of ffmpeg/ffprobe."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging (RUST_LOG still takes precedence).
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Print records as JSON instead of text.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Echo every raw output line of the tool to stderr.
    #[arg(long, global = true, default_value_t = false)]
    pub echo: bool,

    /// Parse previously captured tool output from FILE instead of running the tool.
    #[arg(long, global = true, value_name = "FILE")]
    pub replay: Option<PathBuf>,

    /// Path to the ffmpeg executable (searched on PATH when unset).
    #[arg(long, global = true, value_name = "PATH", env = FFMPEG_PATH_ENV)]
    pub ffmpeg: Option<PathBuf>,

    /// Path to the ffprobe executable (searched on PATH when unset).
    #[arg(long, global = true, value_name = "PATH", env = FFPROBE_PATH_ENV)]
    pub ffprobe: Option<PathBuf>,
}

impl Cli {
    /// Tool configuration assembled from the global flags.
    pub fn tool_config(&self) -> ToolConfig {
        ToolConfig {
            ffmpeg_path: self.ffmpeg.clone(),
            ffprobe_path: self.ffprobe.clone(),
            echo_output: self.echo,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Shows the format and streams of a media file (ffprobe)
    Probe(ProbeArgs),
    /// Lists the codecs of the ffmpeg build
    Codecs(CodecsArgs),
    /// Lists the input/output devices of the ffmpeg build
    Devices,
    /// Lists the named colors known to ffmpeg
    Colors,
    /// Shows the version of ffmpeg or ffprobe
    Version(VersionArgs),
}

#[derive(Parser, Debug)]
pub struct ProbeArgs {
    /// Media file to probe
    #[arg(required = true, value_name = "FILE")]
    pub input: PathBuf,
}

#[derive(Parser, Debug)]
pub struct CodecsArgs {
    /// Show a single codec by identifier
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Only codecs of this media kind
    #[arg(long, value_enum)]
    pub kind: Option<KindFilter>,

    /// Only codecs with encoding support
    #[arg(long, default_value_t = false)]
    pub encoding: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindFilter {
    Audio,
    Video,
    Subtitle,
}

impl From<KindFilter> for MediaKind {
    fn from(kind: KindFilter) -> Self {
        match kind {
            KindFilter::Audio => MediaKind::Audio,
            KindFilter::Video => MediaKind::Video,
            KindFilter::Subtitle => MediaKind::Subtitle,
        }
    }
}

#[derive(Parser, Debug)]
pub struct VersionArgs {
    /// Which tool to ask
    #[arg(long, default_value = FFMPEG, value_parser = [FFMPEG, FFPROBE])]
    pub tool: String,
}
