// ffparse-core/src/external/replay.rs

// --- Replay Infrastructure (tests and captured-output parsing) ---

use super::{Channel, ExitInfo, Invocation, ToolProcess, ToolSpawner};
use crate::error::{CoreResult, command_start_error};
use std::cell::{Cell, RefCell};
use std::io::{self, Cursor, Read};
use std::rc::Rc;

/// Captured output of one tool run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replay {
    primary: Vec<u8>,
    diagnostic: Vec<u8>,
    exit_code: Option<i32>,
}

impl Replay {
    /// Output written to stdout by a successful run.
    pub fn primary(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            primary: bytes.into(),
            exit_code: Some(0),
            ..Default::default()
        }
    }

    /// Output written to stderr by a successful run.
    pub fn diagnostic(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            diagnostic: bytes.into(),
            exit_code: Some(0),
            ..Default::default()
        }
    }

    /// The same bytes served on whichever channel the invocation reads.
    pub fn any_channel(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        Self {
            primary: bytes.clone(),
            diagnostic: bytes,
            exit_code: Some(0),
        }
    }

    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.exit_code = Some(code);
        self
    }

    /// Marks the run as terminated by a signal.
    pub fn with_signal_exit(mut self) -> Self {
        self.exit_code = None;
        self
    }
}

/// A process that replays captured output for a single channel.
pub struct ReplayProcess {
    output: Option<Cursor<Vec<u8>>>,
    channel: Channel,
    exit: ExitInfo,
    kills: Rc<Cell<usize>>,
}

impl ToolProcess for ReplayProcess {
    fn take_channel(&mut self, channel: Channel) -> Option<Box<dyn Read + Send>> {
        if channel != self.channel {
            return None;
        }
        self.output
            .take()
            .map(|cursor| Box::new(cursor) as Box<dyn Read + Send>)
    }

    fn has_exited(&mut self) -> CoreResult<bool> {
        Ok(true)
    }

    fn wait(&mut self) -> CoreResult<ExitInfo> {
        Ok(self.exit)
    }

    fn kill(&mut self) -> CoreResult<()> {
        self.kills.set(self.kills.get() + 1);
        Ok(())
    }
}

struct ReplyExpectation {
    arg_pattern: String,
    replay: Replay,
}

/// Spawner that serves captured output instead of starting processes.
///
/// Replies registered with `add_reply` are consumed by the first invocation
/// having an argument that contains their pattern. Unmatched invocations fall
/// back to the `serving` reply, or fail to start when there is none.
#[derive(Clone, Default)]
pub struct ReplaySpawner {
    replies: Rc<RefCell<Vec<ReplyExpectation>>>,
    fallback: Option<Replay>,
    received_calls: Rc<RefCell<Vec<Vec<String>>>>,
    kills: Rc<Cell<usize>>,
}

impl ReplaySpawner {
    pub fn new() -> Self {
        Default::default()
    }

    /// A spawner answering every invocation with the same captured output.
    pub fn serving(replay: Replay) -> Self {
        Self {
            fallback: Some(replay),
            ..Default::default()
        }
    }

    pub fn add_reply(&self, arg_pattern: &str, replay: Replay) {
        self.replies.borrow_mut().push(ReplyExpectation {
            arg_pattern: arg_pattern.to_string(),
            replay,
        });
    }

    /// Argument lists of every spawn, in order.
    pub fn received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.borrow().clone()
    }

    /// Number of times a replayed process was killed.
    pub fn kills(&self) -> usize {
        self.kills.get()
    }
}

impl ToolSpawner for ReplaySpawner {
    type Process = ReplayProcess;

    fn spawn(&self, invocation: &Invocation) -> CoreResult<Self::Process> {
        let args = invocation.get_args().to_vec();
        self.received_calls.borrow_mut().push(args.clone());

        let mut replies = self.replies.borrow_mut();
        let found_index = replies
            .iter()
            .position(|reply| args.iter().any(|arg| arg.contains(&reply.arg_pattern)));

        let replay = match found_index {
            Some(index) => {
                let reply = replies.remove(index);
                log::debug!("ReplaySpawner: matched reply with pattern '{}'", reply.arg_pattern);
                reply.replay
            }
            None => match &self.fallback {
                Some(replay) => replay.clone(),
                None => {
                    log::error!("ReplaySpawner: no reply registered for args: {:?}", args);
                    return Err(command_start_error(
                        invocation.tool_name(),
                        io::Error::new(
                            io::ErrorKind::NotFound,
                            format!("no replay registered for {invocation}"),
                        ),
                    ));
                }
            },
        };

        let bytes = match invocation.channel() {
            Channel::Primary => replay.primary,
            Channel::Diagnostic => replay.diagnostic,
        };
        Ok(ReplayProcess {
            output: Some(Cursor::new(bytes)),
            channel: invocation.channel(),
            exit: ExitInfo::from_code(replay.exit_code),
            kills: Rc::clone(&self.kills),
        })
    }
}
