// ffparse-cli/src/commands/mod.rs
//
// Subcommand implementations and the dispatch between real tools and
// replayed output.

pub mod capabilities;
pub mod probe;
pub mod version;

use crate::cli::{Cli, Commands};
use ffparse_core::config::{FFMPEG, FFPROBE};
use ffparse_core::{CoreResult, Replay, ReplaySpawner, Tool, ToolSpawner};
use std::fs;

/// Runs the selected subcommand.
pub fn run(cli: &Cli) -> CoreResult<()> {
    let config = cli.tool_config();

    match &cli.replay {
        Some(path) => {
            log::debug!("Replaying captured output from {}", path.display());
            let spawner = ReplaySpawner::serving(Replay::any_channel(fs::read(path)?));
            dispatch(cli, |name| {
                Ok(Tool::with_spawner(name, name, spawner.clone())
                    .with_echo_output(config.echo_output))
            })
        }
        None => dispatch(cli, |name| Tool::locate(name, &config)),
    }
}

fn dispatch<S, F>(cli: &Cli, make_tool: F) -> CoreResult<()>
where
    S: ToolSpawner,
    F: Fn(&str) -> CoreResult<Tool<S>>,
{
    match &cli.command {
        Commands::Probe(args) => probe::run_probe(&make_tool(FFPROBE)?, args, cli.json),
        Commands::Codecs(args) => capabilities::run_codecs(&make_tool(FFMPEG)?, args, cli.json),
        Commands::Devices => capabilities::run_devices(&make_tool(FFMPEG)?, cli.json),
        Commands::Colors => capabilities::run_colors(&make_tool(FFMPEG)?, cli.json),
        Commands::Version(args) => version::run_version(&make_tool(args.tool.as_str())?, cli.json),
    }
}
