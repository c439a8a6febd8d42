// ffparse-cli/src/commands/capabilities.rs
//
// The codec, device and color listings of the ffmpeg build.

use crate::cli::CodecsArgs;
use crate::output::{print_heading, print_info, print_json, print_row};
use ffparse_core::{
    CodecCapability, CoreError, CoreResult, DeviceCapability, MediaKind, Tool, ToolSpawner,
};

fn flag(set: bool, c: char) -> char {
    if set { c } else { '.' }
}

/// Rebuilds the `DEVILS` flag column from a decoded codec.
fn codec_flags(codec: &CodecCapability) -> String {
    let kind = match codec.kind {
        Some(MediaKind::Audio) => 'A',
        Some(MediaKind::Video) => 'V',
        Some(MediaKind::Subtitle) => 'S',
        None => '?',
    };
    [
        flag(codec.decoding, 'D'),
        flag(codec.encoding, 'E'),
        kind,
        flag(codec.intra_frame_only, 'I'),
        flag(codec.lossless, 'L'),
        flag(codec.lossy, 'S'),
    ]
    .iter()
    .collect()
}

fn device_flags(device: &DeviceCapability) -> String {
    [flag(device.demuxing, 'D'), flag(device.muxing, 'E')]
        .iter()
        .collect()
}

/// Execute the codecs command
pub fn run_codecs<S: ToolSpawner>(ffmpeg: &Tool<S>, args: &CodecsArgs, json: bool) -> CoreResult<()> {
    if let Some(name) = &args.name {
        let codec = ffmpeg.find_codec(name)?.ok_or_else(|| CoreError::UnexpectedOutput {
            tool: ffmpeg.name().to_string(),
            message: format!("codec '{name}' is not listed"),
        })?;
        if json {
            return print_json(codec);
        }
        print_heading(&format!("Codec: {}", codec.name));
        print_info("Description", &codec.description);
        print_info(
            "Kind",
            codec.kind.map_or_else(|| "unknown".to_string(), |k| k.to_string()),
        );
        print_info("Decoding", codec.decoding);
        print_info("Encoding", codec.encoding);
        print_info("Intra Frame Only", codec.intra_frame_only);
        print_info("Lossy", codec.lossy);
        print_info("Lossless", codec.lossless);
        return Ok(());
    }

    let wanted_kind = args.kind.map(MediaKind::from);
    let codecs: Vec<&CodecCapability> = ffmpeg
        .codecs()?
        .iter()
        .filter(|codec| wanted_kind.is_none() || codec.kind == wanted_kind)
        .filter(|codec| !args.encoding || codec.encoding)
        .collect();

    if json {
        return print_json(&codecs);
    }
    print_heading("Codecs");
    for codec in &codecs {
        print_row(&codec_flags(codec), &codec.name, &codec.description);
    }
    print_info("\nTotal", codecs.len());
    Ok(())
}

/// Execute the devices command
pub fn run_devices<S: ToolSpawner>(ffmpeg: &Tool<S>, json: bool) -> CoreResult<()> {
    let devices = ffmpeg.devices()?;
    if json {
        return print_json(devices);
    }
    print_heading("Devices");
    for device in devices {
        print_row(&device_flags(device), &device.name, &device.description);
    }
    print_info("\nTotal", devices.len());
    Ok(())
}

/// Execute the colors command
pub fn run_colors<S: ToolSpawner>(ffmpeg: &Tool<S>, json: bool) -> CoreResult<()> {
    let colors = ffmpeg.colors()?;
    if json {
        return print_json(&colors);
    }
    print_heading("Colors");
    for color in &colors {
        print_info(&color.name, &color.hex);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_flags_round_trip_the_listing_column() {
        for flags in ["DEV.LS", "D.A.L.", ".ES...", "DEVI.S"] {
            assert_eq!(codec_flags(&CodecCapability::new(flags, "x", "y")), flags);
        }
    }

    #[test]
    fn test_device_flags() {
        assert_eq!(device_flags(&DeviceCapability::new("D", "x", "y")), "D.");
        assert_eq!(device_flags(&DeviceCapability::new("DE", "x", "y")), "DE");
    }
}
