// Copyright 2026 the Synacor VM Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cell-stream builder ("assembler") for Synacor instructions.
//!
//! A small helper for constructing instruction sequences without hand-encoding
//! operand cells. Used by tests, benches, and patch tooling; it performs no
//! layout or label resolution, so jump targets are plain literal addresses.

use alloc::vec::Vec;

use crate::opcode::Opcode;
use crate::operand::Operand;

/// Shorthand for [`Operand::Literal`].
#[must_use]
pub const fn lit(value: u16) -> Operand {
    Operand::Literal(value)
}

/// Shorthand for [`Operand::Register`].
#[must_use]
pub const fn reg(index: u8) -> Operand {
    Operand::Register(index)
}

/// An instruction-stream builder.
#[derive(Clone, Debug, Default)]
pub struct Asm {
    cells: Vec<u16>,
}

impl Asm {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the builder, returning the encoded cells.
    #[must_use]
    pub fn into_cells(self) -> Vec<u16> {
        self.cells
    }

    /// Current length in cells (the address of the next instruction).
    #[must_use]
    pub fn here(&self) -> u16 {
        self.cells.len() as u16
    }

    /// Appends a raw data cell.
    pub fn data(&mut self, cell: u16) {
        self.cells.push(cell);
    }

    fn op(&mut self, opcode: Opcode, operands: &[Operand]) {
        debug_assert_eq!(operands.len(), usize::from(opcode.arg_count()));
        self.cells.push(opcode.cell());
        for operand in operands {
            self.cells.push(operand.encode());
        }
    }

    /// `halt`.
    pub fn halt(&mut self) {
        self.op(Opcode::Halt, &[]);
    }

    /// `set dst, src`.
    pub fn set(&mut self, dst: u8, src: Operand) {
        self.op(Opcode::Set, &[reg(dst), src]);
    }

    /// `push src`.
    pub fn push(&mut self, src: Operand) {
        self.op(Opcode::Push, &[src]);
    }

    /// `pop dst`.
    pub fn pop(&mut self, dst: u8) {
        self.op(Opcode::Pop, &[reg(dst)]);
    }

    /// `eq dst, b, c`.
    pub fn eq(&mut self, dst: u8, b: Operand, c: Operand) {
        self.op(Opcode::Eq, &[reg(dst), b, c]);
    }

    /// `gt dst, b, c`.
    pub fn gt(&mut self, dst: u8, b: Operand, c: Operand) {
        self.op(Opcode::Gt, &[reg(dst), b, c]);
    }

    /// `jmp target`.
    pub fn jmp(&mut self, target: Operand) {
        self.op(Opcode::Jmp, &[target]);
    }

    /// `jt cond, target`.
    pub fn jt(&mut self, cond: Operand, target: Operand) {
        self.op(Opcode::Jt, &[cond, target]);
    }

    /// `jf cond, target`.
    pub fn jf(&mut self, cond: Operand, target: Operand) {
        self.op(Opcode::Jf, &[cond, target]);
    }

    /// `add dst, b, c`.
    pub fn add(&mut self, dst: u8, b: Operand, c: Operand) {
        self.op(Opcode::Add, &[reg(dst), b, c]);
    }

    /// `mult dst, b, c`.
    pub fn mult(&mut self, dst: u8, b: Operand, c: Operand) {
        self.op(Opcode::Mult, &[reg(dst), b, c]);
    }

    /// `mod dst, b, c`.
    pub fn modulo(&mut self, dst: u8, b: Operand, c: Operand) {
        self.op(Opcode::Mod, &[reg(dst), b, c]);
    }

    /// `and dst, b, c`.
    pub fn and(&mut self, dst: u8, b: Operand, c: Operand) {
        self.op(Opcode::And, &[reg(dst), b, c]);
    }

    /// `or dst, b, c`.
    pub fn or(&mut self, dst: u8, b: Operand, c: Operand) {
        self.op(Opcode::Or, &[reg(dst), b, c]);
    }

    /// `not dst, b`.
    pub fn not(&mut self, dst: u8, b: Operand) {
        self.op(Opcode::Not, &[reg(dst), b]);
    }

    /// `rmem dst, addr`.
    pub fn rmem(&mut self, dst: u8, addr: Operand) {
        self.op(Opcode::Rmem, &[reg(dst), addr]);
    }

    /// `wmem addr, src`.
    pub fn wmem(&mut self, addr: Operand, src: Operand) {
        self.op(Opcode::Wmem, &[addr, src]);
    }

    /// `call target`.
    pub fn call(&mut self, target: Operand) {
        self.op(Opcode::Call, &[target]);
    }

    /// `ret`.
    pub fn ret(&mut self) {
        self.op(Opcode::Ret, &[]);
    }

    /// `out src`.
    pub fn out(&mut self, src: Operand) {
        self.op(Opcode::Out, &[src]);
    }

    /// `in dst`.
    pub fn input(&mut self, dst: u8) {
        self.op(Opcode::In, &[reg(dst)]);
    }

    /// `noop`.
    pub fn noop(&mut self) {
        self.op(Opcode::Noop, &[]);
    }
}

#[cfg(test)]
mod tests {
    use super::{Asm, lit, reg};

    #[test]
    fn encodes_the_sample_add_program() {
        let mut a = Asm::new();
        a.add(0, reg(1), lit(4));
        a.out(reg(0));
        assert_eq!(a.into_cells(), [9, 32768, 32769, 4, 19, 32768]);
    }

    #[test]
    fn here_tracks_cell_offsets() {
        let mut a = Asm::new();
        a.set(0, lit(10));
        assert_eq!(a.here(), 3);
        a.jt(reg(0), lit(0));
        assert_eq!(a.here(), 6);
    }
}
