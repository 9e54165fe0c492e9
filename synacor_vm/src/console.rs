// Copyright 2026 the Synacor VM Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Console seam between the VM and its embedder.
//!
//! The VM delegates every effect to an embedder-provided [`Console`]:
//! program output bytes, operator input lines, control-channel messages, and
//! artifact persistence. This keeps the interpreter itself `no_std`.

use alloc::string::String;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt;

use alloc::collections::VecDeque;

/// An artifact a control command asks the embedder to persist.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Artifact {
    /// The re-encoded memory image (`!dump`).
    MemoryDump,
    /// The operator's command history (`!history`).
    CommandHistory,
}

impl Artifact {
    /// Conventional on-disk file name for the artifact.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::MemoryDump => "dump.bin",
            Self::CommandHistory => "history.txt",
        }
    }
}

/// Errors a console operation can return.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConsoleError {
    /// The input stream is closed; no further lines will arrive.
    Closed,
    /// The console failed during the operation.
    Failed,
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "input stream closed"),
            Self::Failed => write!(f, "console operation failed"),
        }
    }
}

impl core::error::Error for ConsoleError {}

/// Terminal interface used by the VM.
///
/// Input is line-oriented: the VM buffers one whole line at a time and serves
/// it to the program byte by byte, so [`Console::read_line`] is only called
/// at line boundaries.
pub trait Console {
    /// Writes one byte of program output.
    fn put(&mut self, byte: u8) -> Result<(), ConsoleError>;

    /// Reads one operator line, without the trailing newline.
    fn read_line(&mut self) -> Result<String, ConsoleError>;

    /// Prints one operator-facing control-channel line.
    fn message(&mut self, text: &str) -> Result<(), ConsoleError>;

    /// Persists an artifact produced by a control command.
    fn save(&mut self, artifact: Artifact, bytes: &[u8]) -> Result<(), ConsoleError>;
}

/// An in-memory console for tests, benches, and scripted runs.
///
/// Input lines are queued up front; output bytes, control messages, and saved
/// artifacts are captured for inspection.
#[derive(Clone, Debug, Default)]
pub struct MemoryConsole {
    lines: VecDeque<String>,
    output: Vec<u8>,
    messages: Vec<String>,
    saved: Vec<(Artifact, Vec<u8>)>,
}

impl MemoryConsole {
    /// Creates an empty console.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues one input line (without a trailing newline).
    pub fn push_line(&mut self, line: &str) {
        self.lines.push_back(line.to_string());
    }

    /// Program output captured so far.
    #[must_use]
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Program output as lossy UTF-8.
    #[must_use]
    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    /// Control-channel messages captured so far.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Artifacts saved so far.
    #[must_use]
    pub fn saved(&self) -> &[(Artifact, Vec<u8>)] {
        &self.saved
    }
}

impl Console for MemoryConsole {
    fn put(&mut self, byte: u8) -> Result<(), ConsoleError> {
        self.output.push(byte);
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, ConsoleError> {
        self.lines.pop_front().ok_or(ConsoleError::Closed)
    }

    fn message(&mut self, text: &str) -> Result<(), ConsoleError> {
        self.messages.push(text.to_string());
        Ok(())
    }

    fn save(&mut self, artifact: Artifact, bytes: &[u8]) -> Result<(), ConsoleError> {
        self.saved.push((artifact, bytes.to_vec()));
        Ok(())
    }
}
