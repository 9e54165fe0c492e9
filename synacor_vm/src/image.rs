// Copyright 2026 the Synacor VM Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Program image loading and re-encoding.
//!
//! An image is the little-endian 16-bit cell sequence loaded from the
//! challenge binary. It is decoded once, never resized, and can be encoded
//! back to the exact byte sequence it came from (the `!dump` artifact).

use alloc::vec::Vec;
use core::fmt;

/// Number of addressable cells (15-bit address space).
pub const ADDRESS_SPACE: usize = 32768;

/// An image load error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadError {
    /// The byte stream length was not a multiple of two.
    OddByteLength {
        /// Offending length in bytes.
        len: usize,
    },
    /// The cell count exceeds the 15-bit address space.
    TooLarge {
        /// Offending length in cells.
        cells: usize,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OddByteLength { len } => {
                write!(f, "image length {len} is not a multiple of two")
            }
            Self::TooLarge { cells } => {
                write!(f, "image holds {cells} cells, more than the address space")
            }
        }
    }
}

impl core::error::Error for LoadError {}

/// A loaded program image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    cells: Vec<u16>,
}

impl Image {
    /// Decodes a raw little-endian byte stream into an image.
    ///
    /// No cell-value validation happens here; invalid cells are detected at
    /// execution time so that data regions still disassemble.
    pub fn decode(bytes: &[u8]) -> Result<Self, LoadError> {
        if bytes.len() % 2 != 0 {
            return Err(LoadError::OddByteLength { len: bytes.len() });
        }
        let cells = bytes
            .chunks_exact(2)
            .map(|b| u16::from_le_bytes([b[0], b[1]]))
            .collect();
        Self::from_cells(cells)
    }

    /// Wraps an already-decoded cell vector.
    pub fn from_cells(cells: Vec<u16>) -> Result<Self, LoadError> {
        if cells.len() > ADDRESS_SPACE {
            return Err(LoadError::TooLarge { cells: cells.len() });
        }
        Ok(Self { cells })
    }

    /// Encodes the image back into little-endian bytes.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.cells.len() * 2);
        for cell in &self.cells {
            bytes.extend_from_slice(&cell.to_le_bytes());
        }
        bytes
    }

    /// Number of loaded cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` when no cells are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Reads the cell at `addr`, or `None` past the loaded image.
    #[must_use]
    pub fn read(&self, addr: u16) -> Option<u16> {
        self.cells.get(usize::from(addr)).copied()
    }

    /// Writes the cell at `addr`; returns `false` past the loaded image.
    pub fn write(&mut self, addr: u16, value: u16) -> bool {
        match self.cells.get_mut(usize::from(addr)) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Full cell slice.
    #[must_use]
    pub fn cells(&self) -> &[u16] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::{ADDRESS_SPACE, Image, LoadError};
    use alloc::vec;

    #[test]
    fn decode_rejects_odd_length() {
        assert_eq!(
            Image::decode(&[0x09, 0x00, 0x01]),
            Err(LoadError::OddByteLength { len: 3 })
        );
    }

    #[test]
    fn decode_is_little_endian() {
        let image = Image::decode(&[0x09, 0x00, 0x00, 0x80]).unwrap();
        assert_eq!(image.cells(), &[0x0009, 0x8000]);
    }

    #[test]
    fn encode_round_trips() {
        let bytes = [0x15, 0x00, 0x34, 0x12, 0xFF, 0x7F];
        let image = Image::decode(&bytes).unwrap();
        assert_eq!(image.encode(), bytes);
    }

    #[test]
    fn oversized_images_are_rejected() {
        let cells = vec![0_u16; ADDRESS_SPACE + 1];
        assert_eq!(
            Image::from_cells(cells),
            Err(LoadError::TooLarge {
                cells: ADDRESS_SPACE + 1
            })
        );
    }

    #[test]
    fn writes_stay_within_the_image() {
        let mut image = Image::from_cells(vec![0, 1, 2]).unwrap();
        assert!(image.write(1, 40));
        assert_eq!(image.read(1), Some(40));
        assert!(!image.write(3, 40));
        assert_eq!(image.read(3), None);
    }
}
