// ============================================================================
// ffparse-core/src/parsing/driver.rs
// ============================================================================
//
// OUTPUT DRIVER: Running One Parser Against One Live Process
//
// The driver pulls lines from the channel selected by the parser, echoes and
// logs them, classifies them against the operation's error signatures and
// hands the rest to the parser. A classified line aborts the run: the process
// is killed and reaped and no partial result is returned.
//
// KEY COMPONENTS:
// - OutputParser: trait implemented by every parser (probe, listing, version)
// - Flow: parser request to keep going or to stop parsing
// - OutputDriver: the pull loop itself
// - ListingParser / Passthrough: the two parsers with no state of their own

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};
use crate::external::{Channel, ExitInfo, ToolProcess};
use crate::parsing::blocks::BlockParser;
use crate::parsing::lines::LineReader;
use crate::parsing::signatures::SignatureSet;

/// Target used for raw tool output at trace level.
pub const TOOL_OUTPUT_TARGET: &str = "tool_output";

// ============================================================================
// PARSER TRAIT
// ============================================================================

/// Whether the driver should keep feeding lines to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Stop parsing; the rest of the output is drained unparsed.
    Stop,
}

/// A consumer of tool output lines.
pub trait OutputParser {
    type Output;

    /// Channel carrying the content this parser understands.
    fn channel(&self) -> Channel;

    /// Consumes one line that no error signature matched.
    fn feed(&mut self, line: &str) -> Flow;

    /// Produces the result once the output is exhausted.
    fn finish(self) -> CoreResult<Self::Output>;
}

/// Rows of a tabular listing on stdout.
#[derive(Debug, Clone)]
pub struct ListingParser {
    block: BlockParser,
}

impl ListingParser {
    pub fn new(block: BlockParser) -> Self {
        Self { block }
    }
}

impl OutputParser for ListingParser {
    type Output = Vec<Vec<String>>;

    fn channel(&self) -> Channel {
        Channel::Primary
    }

    fn feed(&mut self, line: &str) -> Flow {
        self.block.push(line);
        Flow::Continue
    }

    fn finish(self) -> CoreResult<Self::Output> {
        Ok(self.block.into_rows())
    }
}

/// Reads stderr for errors only; nothing is decoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl OutputParser for Passthrough {
    type Output = ();

    fn channel(&self) -> Channel {
        Channel::Diagnostic
    }

    fn feed(&mut self, _line: &str) -> Flow {
        Flow::Continue
    }

    fn finish(self) -> CoreResult<()> {
        Ok(())
    }
}

// ============================================================================
// DRIVER
// ============================================================================

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverOutcome<T> {
    pub value: T,
    pub exit: ExitInfo,
    /// True when the channel was read to end of stream.
    pub finished: bool,
}

/// Drives one parser over the output of one process.
pub struct OutputDriver<'a> {
    signatures: &'a SignatureSet,
    echo: Option<Box<dyn FnMut(&str) + 'a>>,
}

impl<'a> OutputDriver<'a> {
    pub fn new(signatures: &'a SignatureSet) -> Self {
        Self {
            signatures,
            echo: None,
        }
    }

    /// Sends every raw line to `sink` before it is classified.
    pub fn with_echo(mut self, sink: impl FnMut(&str) + 'a) -> Self {
        self.echo = Some(Box::new(sink));
        self
    }

    /// Runs `parser` over `process` until end of stream or a classified error.
    pub fn run<P, O>(
        &mut self,
        process: &mut P,
        mut parser: O,
        command: &str,
    ) -> CoreResult<DriverOutcome<O::Output>>
    where
        P: ToolProcess,
        O: OutputParser,
    {
        let channel = parser.channel();
        let reader = process
            .take_channel(channel)
            .ok_or_else(|| CoreError::ChannelUnavailable {
                channel,
                command: command.to_string(),
            })?;

        log::debug!("Reading {} output from {}", channel, command);

        let mut lines = LineReader::new(reader);
        let mut parsing = true;

        for line in lines.by_ref() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    log::error!("Failed reading output of {}: {}", command, e);
                    abort(process, command);
                    return Err(CoreError::Io(e));
                }
            };

            log::trace!(target: TOOL_OUTPUT_TARGET, "{}", line);
            if let Some(echo) = self.echo.as_mut() {
                echo(&line);
            }

            if !parsing {
                continue;
            }

            if let Some(error) = self.signatures.classify(&line) {
                log::debug!("{} reported {}: {}", command, error.kind(), line);
                abort(process, command);
                return Err(error.into());
            }

            if parser.feed(&line) == Flow::Stop {
                log::debug!("Parser finished early, draining remaining output of {}", command);
                parsing = false;
            }
        }

        let finished = lines.is_finished();
        if !process.has_exited()? {
            log::debug!("Output of {} closed, waiting for exit", command);
        }
        let exit = process.wait()?;
        log::debug!("{} finished with {}", command, exit);

        Ok(DriverOutcome {
            value: parser.finish()?,
            exit,
            finished,
        })
    }
}

/// Kills and reaps a process whose run is being abandoned.
fn abort<P: ToolProcess>(process: &mut P, command: &str) {
    if let Err(e) = process.kill() {
        log::warn!("Failed to kill {}: {}", command, e);
    }
    if let Err(e) = process.wait() {
        log::warn!("Failed to reap {}: {}", command, e);
    }
}
