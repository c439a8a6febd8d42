use crate::cli::ProbeArgs;
use crate::output::{print_heading, print_info, print_json, print_optional, print_section};
use ffparse_core::utils::format_size_field;
use ffparse_core::{CoreResult, MediaInfo, Tool, ToolSpawner, format_duration};

/// Execute the probe command
pub fn run_probe<S: ToolSpawner>(ffprobe: &Tool<S>, args: &ProbeArgs, json: bool) -> CoreResult<()> {
    log::info!("Probing {}", args.input.display());
    let info = ffprobe.probe(&args.input)?;

    if json {
        return print_json(&info);
    }
    print_media_info(&args.input.display().to_string(), &info);
    Ok(())
}

fn print_media_info(input: &str, info: &MediaInfo) {
    print_heading(&format!("Media Information: {input}"));

    match &info.format {
        Some(format) => {
            print_section("Format");
            print_optional("Name", format.format_name.as_deref());
            print_optional("Long Name", format.format_long_name.as_deref());
            print_optional("Streams", format.nb_streams.as_deref());
            print_optional("Start Time", format.start_time.as_deref());
            print_optional("Duration", info.duration().map(format_duration));
            print_optional("Size", format.size.as_deref().map(format_size_field));
            print_optional("Bit Rate", format.bit_rate.as_deref());
        }
        None => log::warn!("ffprobe reported no format section"),
    }

    for stream in &info.streams {
        let index = stream.index.as_deref().unwrap_or("?");
        print_section(&format!("Stream #{index} ({})", stream.stream_type()));
        let codec = stream.codec();
        print_optional("Codec", codec.name());
        print_optional("Codec Long Name", codec.long_name());
        print_optional("Codec Tag", codec.tag_string());
        print_optional("Duration", stream.duration.as_deref());
        print_optional("Frames", stream.nb_frames.as_deref());
        print_optional("B-Frames", stream.has_b_frames.as_deref());
        print_optional("Created", stream.creation_time.as_deref());
    }

    print_info("Total Streams", info.streams.len());
}
