use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Stream kind, taken from the `codec_type` key of a `[STREAM]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamType {
    Video,
    Audio,
    Subtitle,
    Attachment,
    Data,
    Unknown,
}

impl StreamType {
    /// Maps ffprobe's `codec_type` value. Missing and unrecognised values are
    /// `Unknown`.
    pub fn from_codec_type(codec_type: Option<&str>) -> Self {
        match codec_type {
            Some("video") => StreamType::Video,
            Some("audio") => StreamType::Audio,
            Some("subtitle") => StreamType::Subtitle,
            Some("attachment") => StreamType::Attachment,
            Some("data") => StreamType::Data,
            _ => StreamType::Unknown,
        }
    }

    /// The `codec_type` spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            StreamType::Video => "video",
            StreamType::Audio => "audio",
            StreamType::Subtitle => "subtitle",
            StreamType::Attachment => "attachment",
            StreamType::Data => "data",
            StreamType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for StreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Container-level information from a `[FORMAT]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormatInfo {
    pub nb_streams: Option<String>,
    pub start_time: Option<String>,
    pub format_long_name: Option<String>,
    pub format_name: Option<String>,
    pub filename: Option<String>,

    /// Duration in seconds, as printed by ffprobe
    pub duration: Option<String>,

    /// Size in bytes
    pub size: Option<String>,

    /// Bitrate in bits per second
    pub bit_rate: Option<String>,
}

impl FormatInfo {
    /// Stores a declared field. Returns false for keys that are not declared.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        let slot = match key {
            "nb_streams" => &mut self.nb_streams,
            "start_time" => &mut self.start_time,
            "format_long_name" => &mut self.format_long_name,
            "format_name" => &mut self.format_name,
            "filename" => &mut self.filename,
            "duration" => &mut self.duration,
            "size" => &mut self.size,
            "bit_rate" => &mut self.bit_rate,
            _ => return false,
        };
        *slot = Some(value.to_string());
        true
    }
}

/// Per-stream information from a `[STREAM]` section.
///
/// Keys without a dedicated field end up in `codec`, which is where ffprobe
/// puts everything describing the codec (`codec_name`, `width`, `sample_rate`
/// and so on).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreamInfo {
    pub has_b_frames: Option<String>,
    pub duration_ts: Option<String>,
    pub duration: Option<String>,
    pub creation_time: Option<String>,
    pub nb_frames: Option<String>,
    pub index: Option<String>,

    /// Every other key of the section
    pub codec: BTreeMap<String, String>,
}

impl StreamInfo {
    /// Stores a key, routing undeclared keys into the codec side-table.
    pub fn set(&mut self, key: &str, value: &str) {
        let slot = match key {
            "has_b_frames" => &mut self.has_b_frames,
            "duration_ts" => &mut self.duration_ts,
            "duration" => &mut self.duration,
            "creation_time" => &mut self.creation_time,
            "nb_frames" => &mut self.nb_frames,
            "index" => &mut self.index,
            _ => {
                self.codec.insert(key.to_string(), value.to_string());
                return;
            }
        };
        *slot = Some(value.to_string());
    }

    /// Codec description derived from the side-table.
    pub fn codec(&self) -> CodecView<'_> {
        CodecView { table: &self.codec }
    }

    pub fn stream_type(&self) -> StreamType {
        StreamType::from_codec_type(self.codec().codec_type())
    }
}

/// Read-only view of the codec keys of a stream.
#[derive(Debug, Clone, Copy)]
pub struct CodecView<'a> {
    table: &'a BTreeMap<String, String>,
}

impl<'a> CodecView<'a> {
    fn get(&self, key: &str) -> Option<&'a str> {
        self.table.get(key).map(String::as_str)
    }

    pub fn name(&self) -> Option<&'a str> {
        self.get("codec_name")
    }

    pub fn tag(&self) -> Option<&'a str> {
        self.get("codec_tag")
    }

    pub fn long_name(&self) -> Option<&'a str> {
        self.get("codec_long_name")
    }

    pub fn codec_type(&self) -> Option<&'a str> {
        self.get("codec_type")
    }

    pub fn tag_string(&self) -> Option<&'a str> {
        self.get("codec_tag_string")
    }
}

/// Complete result of one probe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaInfo {
    /// Media format, present once a `[FORMAT]` section was closed
    pub format: Option<FormatInfo>,

    /// Media streams in section order
    pub streams: Vec<StreamInfo>,
}

impl MediaInfo {
    /// Container duration in seconds, when ffprobe reported a usable one.
    pub fn duration(&self) -> Option<f64> {
        self.format
            .as_ref()?
            .duration
            .as_deref()?
            .parse::<f64>()
            .ok()
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
    }

    /// Streams of the given type.
    pub fn streams_of(&self, stream_type: StreamType) -> impl Iterator<Item = &StreamInfo> {
        self.streams
            .iter()
            .filter(move |stream| stream.stream_type() == stream_type)
    }
}
