// Copyright 2026 the Synacor VM Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interpreter for the Synacor instruction set.
//!
//! The VM owns the loaded image, the eight registers, the value stack, and
//! the line-oriented input buffer. All effects go through the embedder's
//! [`Console`]. Execution is outcome-driven: [`Vm::step`] returns
//! [`Control::Continue`] until the program halts or a [`Trap`] is raised.
//!
//! Operator lines beginning with `!` are intercepted at input boundaries and
//! executed as control commands (`!help` lists them) without consuming the
//! program's outstanding read.

use alloc::collections::VecDeque;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::console::{Artifact, Console, ConsoleError};
use crate::control::{self, Command};
use crate::image::Image;
use crate::opcode::Opcode;
use crate::operand::{CELL_MASK, Operand, REGISTER_COUNT};
use crate::trace::{TraceEvent, TraceMask, TraceSink};

/// Outcome of a successful step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control {
    /// Keep fetching.
    Continue,
    /// The program halted cleanly.
    Halted,
}

/// A fatal execution error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Trap {
    /// An operand cell was outside `0..=32775` where a value was required.
    InvalidOperand {
        /// The offending cell.
        cell: u16,
    },
    /// A literal was used where a write destination was required.
    DestNotRegister {
        /// The offending cell.
        cell: u16,
    },
    /// `pop` on an empty stack.
    StackUnderflow,
    /// The cell at the program counter is not an opcode.
    UnknownOpcode {
        /// The offending cell.
        cell: u16,
    },
    /// A memory access landed outside the loaded image.
    MemOutOfBounds {
        /// The offending address.
        addr: u16,
    },
    /// `mod` with a zero divisor.
    DivByZero,
    /// The console failed.
    Io(ConsoleError),
}

impl fmt::Display for Trap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOperand { cell } => write!(f, "invalid operand cell {cell:#06x}"),
            Self::DestNotRegister { cell } => {
                write!(f, "destination operand {cell:#06x} is not a register")
            }
            Self::StackUnderflow => write!(f, "pop from an empty stack"),
            Self::UnknownOpcode { cell } => write!(f, "unknown opcode {cell}"),
            Self::MemOutOfBounds { addr } => {
                write!(f, "memory address {addr:#06x} is outside the loaded image")
            }
            Self::DivByZero => write!(f, "modulo by zero"),
            Self::Io(e) => write!(f, "console failure: {e}"),
        }
    }
}

impl core::error::Error for Trap {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// A trap annotated with the program counter it was raised at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrapInfo {
    /// Cell address of the faulting instruction.
    pub pc: u16,
    /// Trap kind.
    pub trap: Trap,
}

impl fmt::Display for TrapInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trap at pc={:#06x}: {}", self.pc, self.trap)
    }
}

impl core::error::Error for TrapInfo {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.trap)
    }
}

/// Whether to keep serving input after a control command.
enum Directive {
    Resume,
    Halt,
}

/// The Synacor virtual machine.
pub struct Vm<C> {
    console: C,
    image: Image,
    reg: [u16; REGISTER_COUNT],
    stack: Vec<u16>,
    pc: u16,
    input: VecDeque<u8>,
    history: Vec<String>,
}

impl<C> fmt::Debug for Vm<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vm")
            .field("pc", &self.pc)
            .field("reg", &self.reg)
            .field("stack_depth", &self.stack.len())
            .finish_non_exhaustive()
    }
}

impl<C: Console> Vm<C> {
    /// Creates a VM over `image` with all registers zeroed and `pc = 0`.
    #[must_use]
    pub fn new(image: Image, console: C) -> Self {
        Self {
            console,
            image,
            reg: [0; REGISTER_COUNT],
            stack: Vec::new(),
            pc: 0,
            input: VecDeque::new(),
            history: Vec::new(),
        }
    }

    /// Current program counter.
    #[must_use]
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Register file.
    #[must_use]
    pub fn registers(&self) -> &[u16; REGISTER_COUNT] {
        &self.reg
    }

    /// Overwrites one register.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`REGISTER_COUNT`].
    pub fn set_register(&mut self, index: usize, value: u16) {
        assert!(index < REGISTER_COUNT, "register index out of range");
        self.reg[index] = value;
    }

    /// Value stack, bottom first.
    #[must_use]
    pub fn stack(&self) -> &[u16] {
        &self.stack
    }

    /// The (possibly self-modified) program image.
    #[must_use]
    pub fn image(&self) -> &Image {
        &self.image
    }

    /// The embedder console.
    #[must_use]
    pub fn console(&self) -> &C {
        &self.console
    }

    /// Mutable access to the embedder console.
    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    /// Runs until the program halts or traps.
    pub fn run(&mut self) -> Result<(), TrapInfo> {
        self.run_traced(TraceMask::NONE, None)
    }

    /// Runs with tracing enabled for the events in `mask`.
    pub fn run_traced(
        &mut self,
        mask: TraceMask,
        mut trace: Option<&mut dyn TraceSink>,
    ) -> Result<(), TrapInfo> {
        loop {
            match self.step_traced(mask, &mut trace)? {
                Control::Continue => {}
                Control::Halted => return Ok(()),
            }
        }
    }

    /// Executes one instruction.
    pub fn step(&mut self) -> Result<Control, TrapInfo> {
        self.step_traced(TraceMask::NONE, &mut None)
    }

    fn step_traced(
        &mut self,
        mask: TraceMask,
        trace: &mut Option<&mut dyn TraceSink>,
    ) -> Result<Control, TrapInfo> {
        let pc = self.pc;
        // Running off the end of the loaded image is a clean halt; `halt`
        // inside the program is the normal exit.
        let Some(cell) = self.image.read(pc) else {
            return Ok(Control::Halted);
        };
        let Some(op) = Opcode::from_cell(cell) else {
            return Err(self.trap(Trap::UnknownOpcode { cell }));
        };
        if mask.contains(TraceMask::INSTR)
            && let Some(t) = trace.as_mut()
        {
            t.event(TraceEvent::Instr { pc, opcode: op });
        }
        let next = pc + 1 + op.arg_count();

        match op {
            Opcode::Halt => return Ok(Control::Halted),
            Opcode::Set => {
                let a = self.dest(0)?;
                self.reg[a] = self.value(1)?;
            }
            Opcode::Push => {
                let v = self.value(0)?;
                self.stack.push(v);
            }
            Opcode::Pop => {
                let a = self.dest(0)?;
                let Some(v) = self.stack.pop() else {
                    return Err(self.trap(Trap::StackUnderflow));
                };
                self.reg[a] = v;
            }
            Opcode::Eq => {
                let a = self.dest(0)?;
                self.reg[a] = u16::from(self.value(1)? == self.value(2)?);
            }
            Opcode::Gt => {
                let a = self.dest(0)?;
                self.reg[a] = u16::from(self.value(1)? > self.value(2)?);
            }
            Opcode::Jmp => {
                self.pc = self.value(0)?;
                return Ok(Control::Continue);
            }
            Opcode::Jt => {
                let cond = self.value(0)?;
                let target = self.value(1)?;
                self.pc = if cond != 0 { target } else { next };
                return Ok(Control::Continue);
            }
            Opcode::Jf => {
                let cond = self.value(0)?;
                let target = self.value(1)?;
                self.pc = if cond == 0 { target } else { next };
                return Ok(Control::Continue);
            }
            Opcode::Add => {
                let a = self.dest(0)?;
                self.reg[a] = self.value(1)?.wrapping_add(self.value(2)?) & CELL_MASK;
            }
            Opcode::Mult => {
                let a = self.dest(0)?;
                let product = u32::from(self.value(1)?) * u32::from(self.value(2)?);
                self.reg[a] = (product as u16) & CELL_MASK;
            }
            Opcode::Mod => {
                let a = self.dest(0)?;
                let b = self.value(1)?;
                let c = self.value(2)?;
                if c == 0 {
                    return Err(self.trap(Trap::DivByZero));
                }
                self.reg[a] = b % c;
            }
            Opcode::And => {
                let a = self.dest(0)?;
                self.reg[a] = self.value(1)? & self.value(2)?;
            }
            Opcode::Or => {
                let a = self.dest(0)?;
                self.reg[a] = self.value(1)? | self.value(2)?;
            }
            Opcode::Not => {
                let a = self.dest(0)?;
                self.reg[a] = !self.value(1)? & CELL_MASK;
            }
            Opcode::Rmem => {
                let a = self.dest(0)?;
                let addr = self.value(1)?;
                let Some(v) = self.image.read(addr) else {
                    return Err(self.trap(Trap::MemOutOfBounds { addr }));
                };
                self.reg[a] = v;
            }
            Opcode::Wmem => {
                let addr = self.value(0)?;
                let v = self.value(1)?;
                if !self.image.write(addr, v) {
                    return Err(self.trap(Trap::MemOutOfBounds { addr }));
                }
            }
            Opcode::Call => {
                let target = self.value(0)?;
                self.stack.push(next);
                self.pc = target;
                return Ok(Control::Continue);
            }
            Opcode::Ret => {
                let Some(target) = self.stack.pop() else {
                    return Ok(Control::Halted);
                };
                self.pc = target;
                return Ok(Control::Continue);
            }
            Opcode::Out => {
                let v = self.value(0)?;
                self.console
                    .put((v & 0xFF) as u8)
                    .map_err(|e| self.trap(Trap::Io(e)))?;
            }
            Opcode::In => {
                let a = self.dest(0)?;
                match self.next_input_byte(mask, trace)? {
                    Some(byte) => self.reg[a] = u16::from(byte),
                    // `!halt`/`!kill` at the input boundary.
                    None => return Ok(Control::Halted),
                }
            }
            Opcode::Noop => {}
        }
        self.pc = next;
        Ok(Control::Continue)
    }

    fn trap(&self, trap: Trap) -> TrapInfo {
        TrapInfo { pc: self.pc, trap }
    }

    /// Raw operand cell for slot `slot` of the current instruction.
    fn arg_cell(&self, slot: u16) -> Result<u16, TrapInfo> {
        let addr = self.pc + 1 + slot;
        self.image
            .read(addr)
            .ok_or_else(|| self.trap(Trap::MemOutOfBounds { addr }))
    }

    fn operand(&self, slot: u16) -> Result<Operand, TrapInfo> {
        let cell = self.arg_cell(slot)?;
        Operand::classify(cell).ok_or_else(|| self.trap(Trap::InvalidOperand { cell }))
    }

    /// Resolves an operand slot to its numeric value.
    fn value(&self, slot: u16) -> Result<u16, TrapInfo> {
        match self.operand(slot)? {
            Operand::Literal(v) => Ok(v),
            Operand::Register(k) => Ok(self.reg[usize::from(k)]),
        }
    }

    /// Resolves an operand slot to a destination register index.
    fn dest(&self, slot: u16) -> Result<usize, TrapInfo> {
        match self.operand(slot)? {
            Operand::Register(k) => Ok(usize::from(k)),
            Operand::Literal(cell) => Err(self.trap(Trap::DestNotRegister { cell })),
        }
    }

    /// Serves the next buffered input byte, reading (and possibly
    /// intercepting) whole lines as needed.
    ///
    /// Returns `None` when a control command asked the VM to halt.
    fn next_input_byte(
        &mut self,
        mask: TraceMask,
        trace: &mut Option<&mut dyn TraceSink>,
    ) -> Result<Option<u8>, TrapInfo> {
        loop {
            if let Some(byte) = self.input.pop_front() {
                return Ok(Some(byte));
            }
            let line = self
                .console
                .read_line()
                .map_err(|e| self.trap(Trap::Io(e)))?;
            self.history.push(line.clone());
            if line.starts_with('!') {
                if mask.contains(TraceMask::CONTROL)
                    && let Some(t) = trace.as_mut()
                {
                    t.event(TraceEvent::Control { line: &line });
                }
                match self.control(&line)? {
                    Directive::Resume => continue,
                    Directive::Halt => return Ok(None),
                }
            }
            self.input.extend(line.as_bytes());
            self.input.push_back(b'\n');
        }
    }

    fn say(&mut self, text: &str) -> Result<(), TrapInfo> {
        self.console
            .message(text)
            .map_err(|e| TrapInfo {
                pc: self.pc,
                trap: Trap::Io(e),
            })
    }

    fn save(&mut self, artifact: Artifact, bytes: &[u8]) -> Result<(), TrapInfo> {
        self.console
            .save(artifact, bytes)
            .map_err(|e| TrapInfo {
                pc: self.pc,
                trap: Trap::Io(e),
            })
    }

    /// Executes one control command. Parse and argument errors are reported
    /// to the operator and never fail the VM; console failures do.
    fn control(&mut self, line: &str) -> Result<Directive, TrapInfo> {
        let command = match control::parse(line) {
            Ok(command) => command,
            Err(e) => {
                self.say(&format!("{e}"))?;
                return Ok(Directive::Resume);
            }
        };
        match command {
            Command::Help => {
                for help in control::HELP_LINES {
                    self.say(help)?;
                }
            }
            Command::History => {
                let mut text = String::new();
                for entry in &self.history {
                    text.push_str(entry);
                    text.push('\n');
                }
                self.save(Artifact::CommandHistory, text.as_bytes())?;
                self.say("[!] Command history saved to: 'history.txt'")?;
            }
            Command::Halt => {
                self.say("[!] Virtual machine has been halted by force.")?;
                return Ok(Directive::Halt);
            }
            Command::Dump => {
                let bytes = self.image.encode();
                self.save(Artifact::MemoryDump, &bytes)?;
                self.say("[!] Memory dump saved to: 'dump.bin'")?;
            }
            Command::Pos => {
                let text = format!(
                    "[!] Current execution position: {:04X} ({})",
                    self.pc, self.pc
                );
                self.say(&text)?;
            }
            Command::GetReg => {
                for k in 0..REGISTER_COUNT {
                    let v = self.reg[k];
                    self.say(&format!("[!] Register {k}: {v:04X} ({v})"))?;
                }
            }
            Command::GetStack => {
                for k in 0..self.stack.len() {
                    let v = self.stack[k];
                    self.say(&format!("[!] Stack {k}: {v:04X} ({v})"))?;
                }
            }
            Command::SetReg { index, value } => {
                self.reg[usize::from(index)] = value;
                self.say(&format!("[!] Register {index} set to: {value:04X}"))?;
            }
            Command::Poke { addr, cells } => {
                let end = usize::from(addr) + cells.len();
                if end > self.image.len() {
                    self.say("[!] Invalid memory index, cannot poke.")?;
                    return Ok(Directive::Resume);
                }
                let mut listing = format!("[!] Memory written to {addr:04X}:");
                for (offset, &cell) in cells.iter().enumerate() {
                    self.image.write(addr + offset as u16, cell);
                    listing.push_str(&format!(" {cell:04X}"));
                }
                self.say(&listing)?;
            }
            Command::Peek { addr, count } => {
                let end = usize::from(addr) + usize::from(count);
                if end > self.image.len() {
                    self.say("[!] Invalid memory index, cannot peek.")?;
                    return Ok(Directive::Resume);
                }
                let mut listing = format!("[!] Memory read from {addr:04X}:");
                for offset in 0..count {
                    if let Some(cell) = self.image.read(addr + offset) {
                        listing.push_str(&format!(" {cell:04X}"));
                    }
                }
                self.say(&listing)?;
            }
        }
        Ok(Directive::Resume)
    }
}
