// Copyright 2026 the Synacor VM Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared plumbing for the command-line binaries: the real terminal
//! [`Console`], a stderr trace sink, and image file loading.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use synacor_vm::console::{Artifact, Console, ConsoleError};
use synacor_vm::image::Image;
use synacor_vm::trace::{TraceEvent, TraceSink};

/// Reads and decodes a program image file.
pub fn read_image(path: &Path) -> Result<Image> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let image = Image::decode(&bytes).with_context(|| format!("decode {}", path.display()))?;
    Ok(image)
}

/// A [`Console`] over the process terminal and working directory.
#[derive(Debug, Default)]
pub struct StdConsole;

impl StdConsole {
    /// Creates a terminal console.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Console for StdConsole {
    fn put(&mut self, byte: u8) -> Result<(), ConsoleError> {
        let mut out = io::stdout().lock();
        out.write_all(&[byte]).map_err(|_| ConsoleError::Failed)?;
        if byte == b'\n' {
            out.flush().map_err(|_| ConsoleError::Failed)?;
        }
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, ConsoleError> {
        // Prompts usually end without a newline; push them out first.
        io::stdout().flush().map_err(|_| ConsoleError::Failed)?;
        let mut line = String::new();
        let n = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|_| ConsoleError::Failed)?;
        if n == 0 {
            return Err(ConsoleError::Closed);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }

    fn message(&mut self, text: &str) -> Result<(), ConsoleError> {
        let mut out = io::stdout().lock();
        writeln!(out, "{text}").map_err(|_| ConsoleError::Failed)?;
        out.flush().map_err(|_| ConsoleError::Failed)
    }

    fn save(&mut self, artifact: Artifact, bytes: &[u8]) -> Result<(), ConsoleError> {
        fs::write(artifact.file_name(), bytes).map_err(|_| ConsoleError::Failed)
    }
}

/// A [`TraceSink`] that prints one line per event to stderr.
#[derive(Debug, Default)]
pub struct StderrTrace;

impl TraceSink for StderrTrace {
    fn event(&mut self, event: TraceEvent<'_>) {
        match event {
            TraceEvent::Instr { pc, opcode } => eprintln!("{pc:04X} {}", opcode.mnemonic()),
            TraceEvent::Control { line } => eprintln!("ctrl {line}"),
        }
    }
}
