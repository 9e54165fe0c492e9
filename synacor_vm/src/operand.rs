// Copyright 2026 the Synacor VM Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Operand classification for the Synacor cell encoding.
//!
//! A 16-bit cell used as an operand is either a literal in `0..=32767` or a
//! register reference in `32768..=32775`; anything higher is invalid. The
//! encoding is byte-exact with the architecture and must not be altered.

/// Modulus of the machine's arithmetic domain.
pub const MODULUS: u16 = 32768;

/// Bit mask equivalent of [`MODULUS`] reduction for values below 65536.
pub const CELL_MASK: u16 = 0x7FFF;

/// Number of machine registers.
pub const REGISTER_COUNT: usize = 8;

const REGISTER_BASE: u16 = 32768;
const REGISTER_TOP: u16 = 32775;

/// A classified operand cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    /// A literal value in `0..=32767`.
    Literal(u16),
    /// A register index in `0..=7`.
    Register(u8),
}

impl Operand {
    /// Classifies a raw cell, returning `None` for the invalid range
    /// `32776..=65535`.
    #[must_use]
    pub fn classify(cell: u16) -> Option<Self> {
        match cell {
            0..REGISTER_BASE => Some(Self::Literal(cell)),
            REGISTER_BASE..=REGISTER_TOP => {
                // Subtraction cannot truncate: the range above is 8 wide.
                Some(Self::Register((cell - REGISTER_BASE) as u8))
            }
            _ => None,
        }
    }

    /// Encodes the operand back into its raw cell value.
    #[must_use]
    pub fn encode(self) -> u16 {
        match self {
            Self::Literal(v) => v,
            Self::Register(k) => REGISTER_BASE + u16::from(k),
        }
    }

    /// Returns `true` for [`Operand::Register`].
    #[must_use]
    pub fn is_register(self) -> bool {
        matches!(self, Self::Register(_))
    }
}

#[cfg(test)]
mod tests {
    use super::Operand;

    #[test]
    fn classification_boundaries() {
        assert_eq!(Operand::classify(0), Some(Operand::Literal(0)));
        assert_eq!(Operand::classify(32767), Some(Operand::Literal(32767)));
        assert_eq!(Operand::classify(32768), Some(Operand::Register(0)));
        assert_eq!(Operand::classify(32775), Some(Operand::Register(7)));
        assert_eq!(Operand::classify(32776), None);
        assert_eq!(Operand::classify(u16::MAX), None);
    }

    #[test]
    fn encode_inverts_classify() {
        for cell in [0_u16, 1, 4660, 32767, 32768, 32770, 32775] {
            let op = Operand::classify(cell).unwrap();
            assert_eq!(op.encode(), cell);
        }
    }
}
