//! Core library for parsing the live output of ffmpeg and ffprobe.
//!
//! This crate spawns the tools, assembles their output into lines as it
//! arrives, recognizes classified error lines and decodes probe sections and
//! capability listings into structured records.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use ffparse_core::{Tool, ToolConfig};
//! use std::path::Path;
//!
//! let config = ToolConfig::from_env();
//! let ffprobe = Tool::ffprobe(&config).unwrap();
//! let info = ffprobe.probe(Path::new("movie.mkv")).unwrap();
//! for stream in &info.streams {
//!     println!("{:?} {:?}", stream.index, stream.codec().name());
//! }
//!
//! let ffmpeg = Tool::ffmpeg(&config).unwrap();
//! if let Some(codec) = ffmpeg.find_codec("h264").unwrap() {
//!     println!("h264 encoding: {}", codec.encoding);
//! }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod external;
pub mod media;
pub mod parsing;
pub mod tool;
pub mod utils;

// Re-exports for public API
pub use cache::CapabilityCache;
pub use config::{Listing, ToolConfig};
pub use error::{CoreError, CoreResult, ErrorKind, ToolError};
pub use external::{
    Channel, ExitInfo, Invocation, Replay, ReplaySpawner, StdSpawner, ToolProcess, ToolSpawner,
    locate_executable,
};
pub use media::{
    CodecCapability, ColorEntry, DeviceCapability, FormatInfo, MediaInfo, MediaKind, StreamInfo,
    StreamType,
};
pub use parsing::{
    BlockParser, ErrorSignature, LineReader, OutputDriver, OutputParser, ProbeDecoder,
    SignatureSet, ToolVersion,
};
pub use tool::Tool;
pub use utils::{format_bytes, format_duration};
