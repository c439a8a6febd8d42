// ============================================================================
// ffparse-core/src/media/capability.rs
// ============================================================================
//
// CAPABILITY RECORDS: Decoding Rows of the Codec and Device Listings
//
// Every listing row has the shape `<flags> <name> <description>`. The flag
// string is read one character per position; a `.` (or any character not in
// the position's table) means "not supported".
//
// The codec flag layout has changed between ffmpeg releases. Since 3.x the
// media kind sits in column 2 (`DEV.LS`); older builds printed `DEVSDT` with
// a different meaning per column. Only the current layout is decoded.
//
// The legend above the rows is version-sensitive too. `CODECS_HEADER_LINES`
// (10) matches builds whose legend lists video, audio and subtitle kinds.
// Newer builds add "Data" and "Attachment" lines (a 12-line legend); with
// the 10-line skip their `-------` separator is read as a row and
// destructuring fails with `MissingField`.

// ---- Internal crate imports ----
use crate::error::CoreResult;
use crate::parsing::blocks::field;

// ---- External crate imports ----
use serde::Serialize;

// ---- Standard library imports ----
use std::fmt;

/// Column of the codec flag string holding the media kind.
pub const CODEC_KIND_COLUMN: usize = 2;

/// Media kind of a codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MediaKind {
    Audio,
    Video,
    Subtitle,
}

impl MediaKind {
    fn from_flag(flag: char) -> Option<Self> {
        match flag {
            'A' => Some(MediaKind::Audio),
            'V' => Some(MediaKind::Video),
            'S' => Some(MediaKind::Subtitle),
            _ => None,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Audio => write!(f, "audio"),
            MediaKind::Video => write!(f, "video"),
            MediaKind::Subtitle => write!(f, "subtitle"),
        }
    }
}

/// One row of `ffmpeg -codecs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct CodecCapability {
    pub name: String,
    pub description: String,
    pub kind: Option<MediaKind>,
    pub decoding: bool,
    pub encoding: bool,
    pub intra_frame_only: bool,
    pub lossy: bool,
    pub lossless: bool,
}

impl CodecCapability {
    /// Decodes a flag string together with the codec name and description.
    pub fn new(flags: &str, name: &str, description: &str) -> Self {
        let mut codec = Self {
            name: name.to_string(),
            description: description.to_string(),
            ..Default::default()
        };
        for (position, flag) in flags.chars().enumerate() {
            if position == CODEC_KIND_COLUMN {
                codec.kind = MediaKind::from_flag(flag);
                continue;
            }
            match flag {
                'D' => codec.decoding = true,
                'E' => codec.encoding = true,
                'I' => codec.intra_frame_only = true,
                'L' => codec.lossless = true,
                'S' => codec.lossy = true,
                _ => {}
            }
        }
        codec
    }

    /// Builds a codec from a `[flags, name, description]` listing row.
    pub fn from_row(row: &[String]) -> CoreResult<Self> {
        Ok(Self::new(
            field(row, 0, "flags")?,
            field(row, 1, "name")?,
            field(row, 2, "description")?,
        ))
    }
}

/// One row of `ffmpeg -devices`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct DeviceCapability {
    pub name: String,
    pub description: String,
    pub demuxing: bool,
    pub muxing: bool,
}

impl DeviceCapability {
    pub fn new(flags: &str, name: &str, description: &str) -> Self {
        let mut device = Self {
            name: name.to_string(),
            description: description.to_string(),
            ..Default::default()
        };
        for flag in flags.chars() {
            match flag {
                'D' => device.demuxing = true,
                'E' => device.muxing = true,
                _ => {}
            }
        }
        device
    }

    pub fn from_row(row: &[String]) -> CoreResult<Self> {
        Ok(Self::new(
            field(row, 0, "flags")?,
            field(row, 1, "name")?,
            field(row, 2, "description")?,
        ))
    }
}

/// One named colour of `ffmpeg -colors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorEntry {
    pub name: String,
    pub hex: String,
}

impl ColorEntry {
    /// Builds an entry from a `[name, #rrggbb]` row. Rows whose second field
    /// is not a hex colour (the `#RRGGBB` legend included) yield `None`.
    pub fn from_row(row: &[String]) -> CoreResult<Option<Self>> {
        let name = field(row, 0, "name")?;
        let hex = field(row, 1, "hex")?;
        let is_hex = hex.strip_prefix('#').is_some_and(|digits| {
            !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit())
        });
        Ok(is_hex.then(|| Self {
            name: name.to_string(),
            hex: hex.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CODECS_HEADER_LINES;
    use crate::error::CoreError;
    use crate::parsing::blocks::BlockParser;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_codec_row_scenario() {
        let codec = CodecCapability::from_row(&row(&["D.V.L.", "foo", "Foo codec"])).unwrap();
        assert!(codec.decoding);
        assert!(!codec.encoding);
        assert_eq!(codec.kind, Some(MediaKind::Video));
        assert!(!codec.intra_frame_only);
        assert!(codec.lossless);
        assert!(!codec.lossy);
        assert_eq!(codec.name, "foo");
        assert_eq!(codec.description, "Foo codec");
    }

    #[test]
    fn test_subtitle_kind_is_not_lossy() {
        let codec = CodecCapability::new("DES...", "ass", "ASS (Advanced SSA) subtitle");
        assert_eq!(codec.kind, Some(MediaKind::Subtitle));
        assert!(!codec.lossy);

        let codec = CodecCapability::new("DEA..S", "aac", "AAC (Advanced Audio Coding)");
        assert_eq!(codec.kind, Some(MediaKind::Audio));
        assert!(codec.lossy);
    }

    #[test]
    fn test_codec_decoding_is_idempotent() {
        let first = CodecCapability::new("DEVILS", "x", "y");
        let second = CodecCapability::new("DEVILS", "x", "y");
        assert_eq!(first, second);
        assert!(first.intra_frame_only && first.lossless && first.lossy);
    }

    #[test]
    fn test_unknown_kind_character() {
        let codec = CodecCapability::new("D.D...", "bin_data", "binary data");
        assert_eq!(codec.kind, None);
        assert!(codec.decoding);
    }

    #[test]
    fn test_device_row_scenario() {
        let device = DeviceCapability::from_row(&row(&["D", "bar", "Bar device"])).unwrap();
        assert!(device.demuxing);
        assert!(!device.muxing);
    }

    #[test]
    fn test_short_row_is_missing_field() {
        let result = DeviceCapability::from_row(&row(&["DE", "alsa"]));
        assert!(matches!(
            result,
            Err(CoreError::MissingField { index: 2, name: "description", .. })
        ));
    }

    #[test]
    fn test_twelve_line_legend_overruns_codec_skip() {
        let legend = [
            "Codecs:",
            " D..... = Decoding supported",
            " .E.... = Encoding supported",
            " ..V... = Video codec",
            " ..A... = Audio codec",
            " ..S... = Subtitle codec",
            " ..D... = Data codec",
            " ..T... = Attachment codec",
            " ...I.. = Intra frame-only codec",
            " ....L. = Lossy compression",
            " .....S = Lossless compression",
            " -------",
        ];
        let mut lines = legend.to_vec();
        lines.push(" DEA.L. aac  AAC (Advanced Audio Coding)");
        let rows = BlockParser::new(CODECS_HEADER_LINES, 2).parse(lines);
        assert_eq!(rows.len(), 3);
        assert!(matches!(
            CodecCapability::from_row(&rows[1]),
            Err(CoreError::MissingField { index: 1, name: "name", .. })
        ));
        assert_eq!(CodecCapability::from_row(&rows[2]).unwrap().name, "aac");
    }

    #[test]
    fn test_color_rows() {
        let legend = ColorEntry::from_row(&row(&["name", "#RRGGBB"])).unwrap();
        assert_eq!(legend, None);
        let color = ColorEntry::from_row(&row(&["AliceBlue", "#f0f8ff"])).unwrap();
        assert_eq!(
            color,
            Some(ColorEntry {
                name: "AliceBlue".to_string(),
                hex: "#f0f8ff".to_string()
            })
        );
    }
}
