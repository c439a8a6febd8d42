//! Media information and capability records
//!
//! This module provides the data structures produced by the output parsers:
//! probe results for a media file and the codec/device capability tables of
//! the installed ffmpeg build.

pub mod capability;
pub mod info;

// Re-export commonly used types
pub use capability::{CodecCapability, ColorEntry, DeviceCapability, MediaKind};
pub use info::{CodecView, FormatInfo, MediaInfo, StreamInfo, StreamType};
