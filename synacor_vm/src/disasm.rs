// Copyright 2026 the Synacor VM Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear disassembler for Synacor images.
//!
//! This module provides:
//! - a structured view ([`Listing`], [`Record`]) for tooling and tests
//! - a stable, human-readable text format via [`core::fmt::Display`]
//!
//! The decoder does not follow control flow; it advances strictly by
//! argument count. Cells that do not decode (opcode out of range, malformed
//! operand, truncated tail) become single-cell `data` records, so the
//! disassembler never fails. A blank line follows every `halt`, `jmp`, and
//! `ret` to separate basic blocks.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::image::Image;
use crate::opcode::Opcode;
use crate::operand::Operand;

/// A disassembled image.
#[derive(Clone, Debug)]
pub struct Listing<'a> {
    image: &'a Image,
    /// Decoded records in address order, covering every loaded cell.
    pub records: Vec<Record>,
}

/// One decoded record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    /// Cell address of the record.
    pub addr: u16,
    /// Instruction or data classification.
    pub kind: RecordKind,
}

/// Record payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordKind {
    /// A decoded instruction with its classified operands.
    Instr {
        /// The opcode.
        op: Opcode,
        /// Classified operand cells, in encoding order.
        args: Vec<Operand>,
    },
    /// A cell that does not decode as an instruction.
    Data {
        /// The raw cell.
        cell: u16,
    },
}

/// Disassembles `image` into a structured listing. Never fails.
#[must_use]
pub fn disassemble(image: &Image) -> Listing<'_> {
    let cells = image.cells();
    let mut records = Vec::new();
    let mut pos = 0_usize;
    while pos < cells.len() {
        match decode_at(cells, pos) {
            Some((op, args)) => {
                let advance = 1 + args.len();
                records.push(Record {
                    addr: pos as u16,
                    kind: RecordKind::Instr { op, args },
                });
                pos += advance;
            }
            None => {
                records.push(Record {
                    addr: pos as u16,
                    kind: RecordKind::Data { cell: cells[pos] },
                });
                pos += 1;
            }
        }
    }
    Listing { image, records }
}

/// Decodes one instruction at `pos`, validating operand classification and
/// the destination-must-be-register rule.
fn decode_at(cells: &[u16], pos: usize) -> Option<(Opcode, Vec<Operand>)> {
    let op = Opcode::from_cell(cells[pos])?;
    let argc = usize::from(op.arg_count());
    let raw = cells.get(pos + 1..pos + 1 + argc)?;
    let mut args = Vec::with_capacity(argc);
    for (slot, &cell) in raw.iter().enumerate() {
        let operand = Operand::classify(cell)?;
        if slot == 0 && op.writes_register() && !operand.is_register() {
            return None;
        }
        args.push(operand);
    }
    Some((op, args))
}

impl Record {
    /// Mnemonic column text (`data` for undecoded cells).
    #[must_use]
    pub fn mnemonic(&self) -> &'static str {
        match &self.kind {
            RecordKind::Instr { op, .. } => op.mnemonic(),
            RecordKind::Data { .. } => "data",
        }
    }

    /// The raw cells this record covers.
    #[must_use]
    pub fn raw_cells(&self) -> Vec<u16> {
        match &self.kind {
            RecordKind::Instr { op, args } => {
                let mut cells = Vec::with_capacity(1 + args.len());
                cells.push(op.cell());
                cells.extend(args.iter().map(|a| a.encode()));
                cells
            }
            RecordKind::Data { cell } => {
                let mut cells = Vec::with_capacity(1);
                cells.push(*cell);
                cells
            }
        }
    }

    /// Synthesizes the pseudo-comment for this record.
    #[must_use]
    pub fn comment(&self, image: &Image) -> String {
        let (op, args) = match &self.kind {
            RecordKind::Instr { op, args } => (*op, args.as_slice()),
            RecordKind::Data { cell } => return format!("{cell:04X} (d: {cell})"),
        };
        match op {
            Opcode::Halt => String::from("halt"),
            Opcode::Set => format!("{} = {}", src(args[0]), src(args[1])),
            Opcode::Push => format!("push {}", src(args[0])),
            Opcode::Pop => format!("{} = stack.pop()", src(args[0])),
            Opcode::Eq => format!("{} = {} == {}", src(args[0]), src(args[1]), src(args[2])),
            Opcode::Gt => format!("{} = {} > {}", src(args[0]), src(args[1]), src(args[2])),
            Opcode::Jmp => format!("jmp {}", src(args[0])),
            Opcode::Jt => format!("jnz {} : ({} != 0)", src(args[1]), src(args[0])),
            Opcode::Jf => format!("jz {} : ({} == 0)", src(args[1]), src(args[0])),
            Opcode::Add => format!(
                "{} = ({} + {}) % 32768",
                src(args[0]),
                src(args[1]),
                src(args[2])
            ),
            Opcode::Mult => format!(
                "{} = ({} * {}) % 32768",
                src(args[0]),
                src(args[1]),
                src(args[2])
            ),
            Opcode::Mod => format!("{} = {} % {}", src(args[0]), src(args[1]), src(args[2])),
            Opcode::And => format!(
                "{} = ({} & {}) % 32768",
                src(args[0]),
                src(args[1]),
                src(args[2])
            ),
            Opcode::Or => format!(
                "{} = ({} | {}) % 32768",
                src(args[0]),
                src(args[1]),
                src(args[2])
            ),
            Opcode::Not => format!("{} = (~{}) % 32768", src(args[0]), src(args[1])),
            Opcode::Rmem => match args[1] {
                // A literal address lets the listing also show the pointee.
                Operand::Literal(addr) => match image.read(addr) {
                    Some(cell) => {
                        format!("{} = mem[{addr:04X}] : ({cell:04X})", src(args[0]))
                    }
                    None => format!("{} = mem[{addr:04X}]", src(args[0])),
                },
                Operand::Register(_) => {
                    format!("{} = mem[{}]", src(args[0]), src(args[1]))
                }
            },
            Opcode::Wmem => format!("mem[{}] = {}", src(args[0]), src(args[1])),
            Opcode::Call => format!("call {}", src(args[0])),
            Opcode::Ret => String::from("ret"),
            Opcode::Out => match args[0] {
                Operand::Register(k) => format!("reg[{k}]"),
                Operand::Literal(0) => String::from("\\x00"),
                Operand::Literal(10) => String::from("\\n"),
                Operand::Literal(v) if v >= 0x100 => String::from("<unk char>"),
                Operand::Literal(v) => String::from(char::from(v as u8)),
            },
            Opcode::In => format!("{} = (user input)", src(args[0])),
            Opcode::Noop => String::from("noop"),
        }
    }
}

/// Renders one operand: `reg[k]` for registers, 4-digit hex for literals.
fn src(operand: Operand) -> String {
    match operand {
        Operand::Register(k) => format!("reg[{k}]"),
        Operand::Literal(v) => format!("{v:04X}"),
    }
}

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.records {
            let mut bytes = String::new();
            for cell in record.raw_cells() {
                let [lo, hi] = cell.to_le_bytes();
                bytes.push_str(&format!("{lo:02X} {hi:02X} "));
            }
            writeln!(
                f,
                "{:04X} | {:<24} | {:<5} | {}",
                record.addr,
                bytes,
                record.mnemonic(),
                record.comment(self.image)
            )?;
            if let RecordKind::Instr { op, .. } = &record.kind
                && op.ends_block()
            {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{RecordKind, disassemble};
    use crate::asm::{Asm, lit, reg};
    use crate::image::Image;
    use crate::opcode::Opcode;
    use crate::operand::Operand;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    fn listing_text(cells: Vec<u16>) -> String {
        let image = Image::from_cells(cells).unwrap();
        format!("{}", disassemble(&image))
    }

    #[test]
    fn add_record_renders_the_arithmetic_comment() {
        let mut a = Asm::new();
        a.add(0, reg(1), lit(4));
        let text = listing_text(a.into_cells());
        assert_eq!(
            text,
            "0000 | 09 00 00 80 01 80 04 00  | add   | reg[0] = (reg[1] + 0004) % 32768\n"
        );
    }

    #[test]
    fn jmp_is_followed_by_a_blank_block_separator() {
        let mut a = Asm::new();
        a.jmp(lit(10));
        a.noop();
        let text = listing_text(a.into_cells());
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("0000 |"));
        assert!(lines[0].contains("| jmp   | jmp 000A"));
        assert_eq!(lines[1], "");
        assert!(lines[2].starts_with("0002 |"));
    }

    #[test]
    fn undecodable_cells_become_data_records() {
        // 22 is not an opcode; `set` with a literal destination is invalid.
        let text = listing_text(vec![22, 1, 5, 5]);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].contains("| data  | 0016 (d: 22)"));
        assert!(lines[1].contains("| data  | 0001 (d: 1)"));
    }

    #[test]
    fn truncated_instructions_become_data_records() {
        // `set reg0, ...` with the second operand missing.
        let text = listing_text(vec![1, 32768]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("| data  |"));
        assert!(lines[1].contains("| data  |"));
    }

    #[test]
    fn out_comments_render_characters_and_escapes() {
        let mut a = Asm::new();
        a.out(lit(u16::from(b'K')));
        a.out(lit(10));
        a.out(lit(0));
        a.out(lit(0x150));
        a.out(reg(3));
        let text = listing_text(a.into_cells());
        let comments: Vec<&str> = text
            .lines()
            .map(|l| l.rsplit(" | ").next().unwrap())
            .collect();
        assert_eq!(comments, ["K", "\\n", "\\x00", "<unk char>", "reg[3]"]);
    }

    #[test]
    fn rmem_with_a_literal_address_shows_the_pointee() {
        let mut a = Asm::new();
        a.rmem(0, lit(3));
        a.data(0x1234);
        let text = listing_text(a.into_cells());
        assert!(text.starts_with("0000 |"));
        assert!(text.contains("| rmem  | reg[0] = mem[0003] : (1234)"));
    }

    #[test]
    fn decoding_matches_the_assembled_source() {
        let mut a = Asm::new();
        a.set(0, lit(10));
        a.push(reg(0));
        a.eq(1, reg(0), lit(10));
        a.jt(reg(1), lit(12));
        a.wmem(lit(0), reg(1));
        a.call(lit(16));
        a.out(lit(u16::from(b'.')));
        a.input(2);
        a.ret();
        a.halt();
        let cells = a.into_cells();
        let image = Image::from_cells(cells).unwrap();
        let listing = disassemble(&image);

        let expected: &[(Opcode, &[Operand])] = &[
            (Opcode::Set, &[reg(0), lit(10)]),
            (Opcode::Push, &[reg(0)]),
            (Opcode::Eq, &[reg(1), reg(0), lit(10)]),
            (Opcode::Jt, &[reg(1), lit(12)]),
            (Opcode::Wmem, &[lit(0), reg(1)]),
            (Opcode::Call, &[lit(16)]),
            (Opcode::Out, &[lit(u16::from(b'.'))]),
            (Opcode::In, &[reg(2)]),
            (Opcode::Ret, &[]),
            (Opcode::Halt, &[]),
        ];
        assert_eq!(listing.records.len(), expected.len());
        for (record, (op, args)) in listing.records.iter().zip(expected) {
            match &record.kind {
                RecordKind::Instr {
                    op: found,
                    args: found_args,
                } => {
                    assert_eq!(found, op);
                    assert_eq!(found_args.as_slice(), *args);
                }
                RecordKind::Data { cell } => panic!("unexpected data record {cell}"),
            }
        }
    }
}
