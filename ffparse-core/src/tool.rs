// ============================================================================
// ffparse-core/src/tool.rs
// ============================================================================
//
// TOOL WRAPPER: High-Level Queries Against One ffmpeg/ffprobe Executable
//
// `Tool` binds an executable to a spawner and exposes the operations built on
// the output driver: version, capability listings, probing and running an
// arbitrary argument list with error classification.
//
// KEY COMPONENTS:
// - Tool: executable name, resolved path, spawner and capability cache
// - locate / locate_with: executable discovery before any spawn
// - version / codecs / devices / colors / listing / probe / run
//
// DESIGN PHILOSOPHY:
// The spawner is a type parameter so the same code runs against real
// processes (`StdSpawner`) and captured output (`ReplaySpawner`).

// ---- Internal crate imports ----
use crate::cache::CapabilityCache;
use crate::config::{FFMPEG, FFPROBE, Listing, PROBE_ARGS, ToolConfig, VERSION_ARG};
use crate::error::{CoreResult, command_failed_error};
use crate::external::{Invocation, StdSpawner, ToolSpawner, locate_executable};
use crate::media::{CodecCapability, ColorEntry, DeviceCapability, MediaInfo};
use crate::parsing::{
    BlockParser, DriverOutcome, ListingParser, OutputDriver, OutputParser, Passthrough,
    ProbeDecoder, SignatureSet, ToolVersion, VersionParser,
};

// ---- Standard library imports ----
use std::path::{Path, PathBuf};

/// One external tool executable.
pub struct Tool<S: ToolSpawner = StdSpawner> {
    name: String,
    path: PathBuf,
    spawner: S,
    echo_output: bool,
    cache: CapabilityCache,
}

impl Tool<StdSpawner> {
    /// Locates `name` (configured path first, then `PATH`).
    pub fn locate(name: &str, config: &ToolConfig) -> CoreResult<Self> {
        Self::locate_with(name, config, StdSpawner)
    }

    pub fn ffmpeg(config: &ToolConfig) -> CoreResult<Self> {
        Self::locate(FFMPEG, config)
    }

    pub fn ffprobe(config: &ToolConfig) -> CoreResult<Self> {
        Self::locate(FFPROBE, config)
    }
}

impl<S: ToolSpawner> Tool<S> {
    /// Locates `name` and runs it through `spawner`.
    pub fn locate_with(name: &str, config: &ToolConfig, spawner: S) -> CoreResult<Self> {
        let path = locate_executable(name, config.path_for(name).map(PathBuf::as_path))?;
        Ok(Self::with_spawner(name, path, spawner).with_echo_output(config.echo_output))
    }

    /// Binds an already resolved path without checking it.
    pub fn with_spawner(name: &str, path: impl Into<PathBuf>, spawner: S) -> Self {
        Self {
            name: name.to_string(),
            path: path.into(),
            spawner,
            echo_output: false,
            cache: CapabilityCache::new(),
        }
    }

    pub fn with_echo_output(mut self, echo: bool) -> Self {
        self.echo_output = echo;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    pub fn cache(&self) -> &CapabilityCache {
        &self.cache
    }

    fn drive<O, I, A>(
        &self,
        args: I,
        parser: O,
        signatures: &SignatureSet,
    ) -> CoreResult<DriverOutcome<O::Output>>
    where
        O: OutputParser,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        let invocation = Invocation::new(&self.path, parser.channel()).args(args);
        let mut process = self.spawner.spawn(&invocation)?;

        let mut driver = OutputDriver::new(signatures);
        if self.echo_output {
            driver = driver.with_echo(|line| eprintln!("{line}"));
        }
        driver.run(&mut process, parser, &self.name)
    }

    /// Like `drive`, but an unsuccessful exit is an error.
    fn drive_checked<O, I, A>(
        &self,
        args: I,
        parser: O,
        signatures: &SignatureSet,
    ) -> CoreResult<O::Output>
    where
        O: OutputParser,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        let outcome = self.drive(args, parser, signatures)?;
        if !outcome.exit.success() {
            log::error!("{} exited unsuccessfully ({})", self.name, outcome.exit);
            return Err(command_failed_error(self.name.as_str(), outcome.exit));
        }
        Ok(outcome.value)
    }

    /// Version reported by `-version`, queried once.
    pub fn version(&self) -> CoreResult<&ToolVersion> {
        self.cache.version_or_load(|| {
            let outcome = self.drive(
                [VERSION_ARG],
                VersionParser::new(self.name.as_str()),
                &SignatureSet::empty(),
            )?;
            log::debug!("{} reports version {}", self.name, outcome.value.short_version());
            Ok(outcome.value)
        })
    }

    /// Raw rows of a listing, banner removed.
    pub fn listing(&self, listing: Listing) -> CoreResult<Vec<Vec<String>>> {
        let parser = ListingParser::new(BlockParser::new(
            listing.header_lines(),
            listing.max_splits(),
        ));
        let rows = self.drive_checked([listing.flag()], parser, &SignatureSet::empty())?;
        log::debug!("{} listed {} {}", self.name, rows.len(), listing);
        Ok(rows)
    }

    /// Codecs supported by the build, listed once.
    pub fn codecs(&self) -> CoreResult<&[CodecCapability]> {
        self.cache.codecs_or_load(|| {
            self.listing(Listing::Codecs)?
                .iter()
                .map(|row| CodecCapability::from_row(row))
                .collect()
        })
    }

    /// Devices supported by the build, listed once.
    pub fn devices(&self) -> CoreResult<&[DeviceCapability]> {
        self.cache.devices_or_load(|| {
            self.listing(Listing::Devices)?
                .iter()
                .map(|row| DeviceCapability::from_row(row))
                .collect()
        })
    }

    /// Looks a codec up by identifier.
    pub fn find_codec(&self, name: &str) -> CoreResult<Option<&CodecCapability>> {
        Ok(self.codecs()?.iter().find(|codec| codec.name == name))
    }

    /// Named colours known to the build.
    pub fn colors(&self) -> CoreResult<Vec<ColorEntry>> {
        self.listing(Listing::Colors)?
            .iter()
            .filter_map(|row| ColorEntry::from_row(row).transpose())
            .collect()
    }

    /// Format and stream sections of a media file.
    pub fn probe(&self, path: &Path) -> CoreResult<MediaInfo> {
        let args = PROBE_ARGS
            .iter()
            .map(|arg| arg.to_string())
            .chain(std::iter::once(path.display().to_string()));
        let info = self.drive_checked(args, ProbeDecoder::new(), &SignatureSet::empty())?;
        log::debug!(
            "Probed {}: {} stream(s), format {}",
            path.display(),
            info.streams.len(),
            info.format
                .as_ref()
                .and_then(|format| format.format_name.as_deref())
                .unwrap_or("unknown")
        );
        Ok(info)
    }

    /// Runs an arbitrary argument list, watching stderr for `signatures`.
    pub fn run<I, A>(&self, args: I, signatures: &SignatureSet) -> CoreResult<()>
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.drive_checked(args, Passthrough, signatures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ErrorKind};
    use crate::external::{Replay, ReplaySpawner};

    fn replay_tool(name: &str, spawner: ReplaySpawner) -> Tool<ReplaySpawner> {
        Tool::with_spawner(name, format!("/usr/bin/{name}"), spawner)
    }

    #[test]
    fn test_version_is_cached() {
        let spawner = ReplaySpawner::new();
        spawner.add_reply(
            "-version",
            Replay::primary("ffmpeg version 3.2 Copyright (c) 2000-2016 the FFmpeg developers\n"),
        );
        let tool = replay_tool("ffmpeg", spawner);
        assert_eq!(
            tool.version().unwrap().version,
            "3.2 Copyright (c) 2000-2016 the FFmpeg developers"
        );
        // Served from the cache; a second spawn would find no reply.
        assert_eq!(tool.version().unwrap().short_version(), "3.2");
        assert_eq!(tool.spawner().received_calls().len(), 1);
    }

    #[test]
    fn test_run_classifies_errors() {
        let spawner = ReplaySpawner::new();
        spawner.add_reply(
            "-ss",
            Replay::diagnostic("Invalid duration specification for ss: 00:00:01:00\n")
                .with_exit_code(1),
        );
        let tool = replay_tool("ffmpeg", spawner);
        let err = tool
            .run(["-ss", "00:00:01:00", "-i", "in.mkv", "out.mkv"], &SignatureSet::video_errors())
            .unwrap_err();
        let tool_error = err.tool_error().unwrap();
        assert_eq!(*tool_error.kind(), ErrorKind::InvalidDuration);
        assert_eq!(tool_error.duration(), Some("00:00:01:00"));
    }

    #[test]
    fn test_failed_exit_without_signature() {
        let spawner = ReplaySpawner::new();
        spawner.add_reply("missing.mkv", Replay::primary("").with_exit_code(1));
        let tool = replay_tool("ffprobe", spawner);
        let err = tool.probe(Path::new("missing.mkv")).unwrap_err();
        assert!(matches!(err, CoreError::CommandFailed { ref command, .. } if command == "ffprobe"));
    }

    #[test]
    fn test_probe_arguments() {
        let spawner = ReplaySpawner::new();
        spawner.add_reply("movie.mkv", Replay::primary("[FORMAT]\nfilename=movie.mkv\n[/FORMAT]\n"));
        let tool = replay_tool("ffprobe", spawner);
        let info = tool.probe(Path::new("movie.mkv")).unwrap();
        assert_eq!(info.format.unwrap().filename.as_deref(), Some("movie.mkv"));
        assert_eq!(
            tool.spawner().received_calls(),
            vec![vec![
                "-show_format".to_string(),
                "-show_streams".to_string(),
                "movie.mkv".to_string()
            ]]
        );
    }
}
