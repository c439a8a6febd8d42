//! Decoder for `ffprobe -show_format -show_streams` output.
//!
//! The default ffprobe writer prints one bracketed section per stream and one
//! for the container:
//!
//! ```text
//! [STREAM]
//! index=0
//! codec_name=h264
//! [/STREAM]
//! [FORMAT]
//! filename=movie.mkv
//! nb_streams=2
//! [/FORMAT]
//! ```

use crate::error::CoreResult;
use crate::external::Channel;
use crate::media::{FormatInfo, MediaInfo, StreamInfo};
use crate::parsing::driver::{Flow, OutputParser};

const STREAM_OPEN: &str = "[STREAM]";
const STREAM_CLOSE: &str = "[/STREAM]";
const FORMAT_OPEN: &str = "[FORMAT]";
const FORMAT_CLOSE: &str = "[/FORMAT]";

#[derive(Debug)]
enum Section {
    Idle,
    Stream(StreamInfo),
    Format(FormatInfo),
}

/// Incremental decoder of probe sections into a `MediaInfo`.
#[derive(Debug)]
pub struct ProbeDecoder {
    section: Section,
    info: MediaInfo,
}

impl Default for ProbeDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProbeDecoder {
    pub fn new() -> Self {
        Self {
            section: Section::Idle,
            info: MediaInfo::default(),
        }
    }

    /// Feeds one line of probe output. Never fails: anything that is not a
    /// marker or a `key=value` pair inside a section is ignored.
    pub fn push(&mut self, line: &str) {
        let marker = line.trim();
        match marker {
            STREAM_OPEN => self.open(Section::Stream(StreamInfo::default())),
            FORMAT_OPEN => self.open(Section::Format(FormatInfo::default())),
            STREAM_CLOSE => match std::mem::replace(&mut self.section, Section::Idle) {
                Section::Stream(stream) => self.info.streams.push(stream),
                other => {
                    log::warn!("Ignoring unmatched {} marker", STREAM_CLOSE);
                    self.section = other;
                }
            },
            FORMAT_CLOSE => match std::mem::replace(&mut self.section, Section::Idle) {
                Section::Format(format) => self.info.format = Some(format),
                other => {
                    log::warn!("Ignoring unmatched {} marker", FORMAT_CLOSE);
                    self.section = other;
                }
            },
            _ => self.assign(line),
        }
    }

    fn open(&mut self, section: Section) {
        if !matches!(self.section, Section::Idle) {
            log::warn!("Probe section reopened before being closed, discarding it");
        }
        self.section = section;
    }

    fn assign(&mut self, line: &str) {
        let Some((key, value)) = line.split_once('=') else {
            return;
        };
        let (key, value) = (key.trim(), value.trim());
        match &mut self.section {
            Section::Stream(stream) => stream.set(key, value),
            Section::Format(format) => {
                format.set(key, value);
            }
            Section::Idle => {}
        }
    }

    /// The records sealed so far. An unclosed section is discarded.
    pub fn into_media_info(self) -> MediaInfo {
        if !matches!(self.section, Section::Idle) {
            log::warn!("Probe output ended inside an unclosed section, discarding it");
        }
        self.info
    }
}

impl OutputParser for ProbeDecoder {
    type Output = MediaInfo;

    fn channel(&self) -> Channel {
        Channel::Primary
    }

    fn feed(&mut self, line: &str) -> Flow {
        self.push(line);
        Flow::Continue
    }

    fn finish(self) -> CoreResult<MediaInfo> {
        Ok(self.into_media_info())
    }
}

/// Decodes a complete probe output in one go.
pub fn decode_probe<I, S>(lines: I) -> MediaInfo
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut decoder = ProbeDecoder::new();
    for line in lines {
        decoder.push(line.as_ref());
    }
    decoder.into_media_info()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_and_stream_round_trip() {
        let info = decode_probe([
            "[FORMAT]",
            "nb_streams=2",
            "[/FORMAT]",
            "[STREAM]",
            "codec_name=h264",
            "[/STREAM]",
        ]);
        let format = info.format.as_ref().unwrap();
        assert_eq!(format.nb_streams.as_deref(), Some("2"));
        assert_eq!(format.filename, None);
        assert_eq!(info.streams.len(), 1);
        assert_eq!(info.streams[0].codec().name(), Some("h264"));
    }

    #[test]
    fn test_value_split_at_first_equals() {
        let info = decode_probe([
            "[STREAM]",
            "index = 1",
            "TAG:title=a=b",
            "[/STREAM]",
        ]);
        let stream = &info.streams[0];
        assert_eq!(stream.index.as_deref(), Some("1"));
        assert_eq!(stream.codec.get("TAG:title").map(String::as_str), Some("a=b"));
    }

    #[test]
    fn test_lines_outside_sections_are_ignored() {
        let info = decode_probe([
            "index=5",
            "garbage",
            "[/STREAM]",
            "[STREAM]",
            "no equals sign",
            "index=0",
            "[/FORMAT]",
            "[/STREAM]",
        ]);
        assert_eq!(info.streams.len(), 1);
        assert_eq!(info.streams[0].index.as_deref(), Some("0"));
        assert!(info.format.is_none());
    }

    #[test]
    fn test_unclosed_section_is_discarded() {
        let info = decode_probe(["[STREAM]", "index=0", "[/STREAM]", "[STREAM]", "index=1"]);
        assert_eq!(info.streams.len(), 1);
    }

    #[test]
    fn test_reopening_abandons_open_section() {
        let info = decode_probe([
            "[STREAM]",
            "index=0",
            "[FORMAT]",
            "filename=a.mkv",
            "[/FORMAT]",
        ]);
        assert!(info.streams.is_empty());
        assert_eq!(
            info.format.and_then(|f| f.filename),
            Some("a.mkv".to_string())
        );
    }

    #[test]
    fn test_second_format_overwrites_first() {
        let info = decode_probe([
            "[FORMAT]",
            "format_name=avi",
            "[/FORMAT]",
            "  [FORMAT]  ",
            "format_name=matroska,webm",
            "[/FORMAT]",
        ]);
        assert_eq!(
            info.format.and_then(|f| f.format_name),
            Some("matroska,webm".to_string())
        );
    }

    #[test]
    fn test_unknown_format_keys_are_dropped() {
        let info = decode_probe(["[FORMAT]", "probe_score=100", "[/FORMAT]"]);
        assert_eq!(info.format, Some(FormatInfo::default()));
    }
}
