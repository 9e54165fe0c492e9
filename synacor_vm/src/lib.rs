// Copyright 2026 the Synacor VM Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `synacor_vm`: an emulator and disassembler for the Synacor OSCON 2012
//! architecture.
//!
//! The architecture is a 15-bit-addressed machine with eight registers, an
//! unbounded value stack, and a 22-opcode instruction set whose arithmetic is
//! reduced modulo 32768. This crate provides:
//!
//! - the program image loader ([`image`])
//! - operand classification ([`operand`])
//! - the interpreter with its operator control channel ([`vm`])
//! - a linear disassembler with pseudo-comments ([`disasm`])
//! - a small instruction builder for tests and tools ([`asm`])
//!
//! All effects (terminal bytes, operator messages, artifact files) flow
//! through the embedder-provided [`console::Console`] trait, so the crate
//! itself stays `no_std`.
//!
//! ## Example
//!
//! ```
//! use synacor_vm::asm::{Asm, lit, reg};
//! use synacor_vm::console::MemoryConsole;
//! use synacor_vm::image::Image;
//! use synacor_vm::vm::Vm;
//!
//! let mut a = Asm::new();
//! a.set(0, lit(72));
//! a.out(reg(0));
//! a.halt();
//!
//! let image = Image::from_cells(a.into_cells()).unwrap();
//! let mut vm = Vm::new(image, MemoryConsole::new());
//! vm.run().unwrap();
//! assert_eq!(vm.console().output(), b"H");
//! ```

#![no_std]

extern crate alloc;

pub mod asm;
pub mod console;
pub(crate) mod control;
pub mod disasm;
pub mod image;
pub mod opcode;
pub mod operand;
pub mod trace;
pub mod vm;
