// Copyright 2026 the Synacor VM Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing hooks for the interpreter.
//!
//! Tracing is optional and `no_std` friendly: the VM emits only the events
//! requested by a [`TraceMask`], and [`TraceMask::NONE`] costs nothing
//! measurable.

use crate::opcode::Opcode;

/// A set of trace events requested by a [`TraceSink`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TraceMask(u32);

impl core::ops::BitOr for TraceMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl core::ops::BitOrAssign for TraceMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl TraceMask {
    /// No tracing.
    pub const NONE: Self = Self(0);
    /// Emit [`TraceEvent::Instr`] for each executed instruction.
    pub const INSTR: Self = Self(1 << 0);
    /// Emit [`TraceEvent::Control`] for each intercepted control command.
    pub const CONTROL: Self = Self(1 << 1);

    /// Returns `true` if this mask includes all bits in `other`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

/// A trace event emitted by the VM.
#[derive(Clone, Debug)]
pub enum TraceEvent<'a> {
    /// A single instruction step, emitted before dispatch.
    Instr {
        /// Cell address of the opcode.
        pc: u16,
        /// Decoded opcode.
        opcode: Opcode,
    },
    /// An operator control command, intercepted at an input boundary.
    Control {
        /// The raw command line, including the leading `!`.
        line: &'a str,
    },
}

/// A trace sink that receives VM events.
pub trait TraceSink {
    /// Receives a trace event.
    fn event(&mut self, event: TraceEvent<'_>);
}
