// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use bitvec::prelude::*;

use crate::s3tc::Block;

/// Bits used by one row of 3-bit codes
const ROW_BITS: usize = 12;

/// BC4 single channel block, also the alpha half of BC3 and each half of BC5.
///
/// Two 8-bit endpoints are followed by 48 bits of 3-bit codes. The codes form a little-endian
/// integer with the first row in the lowest 12 bits, so rows straddle byte boundaries.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BC4Block {
    pub endpoints: [u8; 2],
    pub codes: [u8; 6],
}

impl BC4Block {
    /// Get the 12 packed code bits of row `y`
    pub fn row(&self, y: usize) -> u16 {
        let bits = self.codes.view_bits::<Lsb0>();
        bits[y * ROW_BITS..(y + 1) * ROW_BITS].load_le()
    }

    /// Replace the 12 packed code bits of row `y`. Bits above the low 12 are ignored
    pub fn set_row(&mut self, y: usize, row: u16) {
        let bits = self.codes.view_bits_mut::<Lsb0>();
        bits[y * ROW_BITS..(y + 1) * ROW_BITS].store_le(row & 0xFFF);
    }

    /// The 3-bit code of texel (`x`, `y`)
    pub fn code(&self, x: usize, y: usize) -> u8 {
        let bits = self.codes.view_bits::<Lsb0>();
        let start = y * ROW_BITS + x * 3;
        bits[start..start + 3].load_le()
    }
}

impl Block for BC4Block {
    type Bytes = [u8; 8];
    const SIZE: usize = 8;

    fn to_bytes(&self) -> Self::Bytes {
        let mut bytes: Self::Bytes = [0; 8];

        // store endpoints
        bytes[0..2].copy_from_slice(&self.endpoints);

        // store packed codes
        bytes[2..8].copy_from_slice(&self.codes);

        bytes
    }

    fn from_bytes(bytes: &Self::Bytes) -> Self {
        let mut codes = [0u8; 6];
        codes.copy_from_slice(&bytes[2..8]);

        Self {
            endpoints: [bytes[0], bytes[1]],
            codes,
        }
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        let (row_a, row_b) = (self.row(a), self.row(b));
        self.set_row(a, row_b);
        self.set_row(b, row_a);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // rows 0..4 = 0x123, 0x456, 0x789, 0xABC packed little-endian
    const PACKED: [u8; 6] = [0x23, 0x61, 0x45, 0x89, 0xC7, 0xAB];

    #[test]
    fn rows_cross_byte_boundaries() {
        let block = BC4Block {
            endpoints: [0, 0],
            codes: PACKED,
        };
        assert_eq!(block.row(0), 0x123);
        assert_eq!(block.row(1), 0x456);
        assert_eq!(block.row(2), 0x789);
        assert_eq!(block.row(3), 0xABC);

        // 0x123 = 0b001_0010_0011 -> codes from the low end: 3, 4, 4, 0
        assert_eq!(block.code(0, 0), 0b011);
        assert_eq!(block.code(1, 0), 0b100);
        assert_eq!(block.code(2, 0), 0b100);
        assert_eq!(block.code(3, 0), 0b000);
    }

    #[test]
    fn set_row_leaves_neighbours_alone() {
        let mut block = BC4Block {
            endpoints: [0, 0],
            codes: PACKED,
        };
        block.set_row(1, 0xFFF);
        assert_eq!(block.row(0), 0x123);
        assert_eq!(block.row(1), 0xFFF);
        assert_eq!(block.row(2), 0x789);

        block.set_row(2, 0xF000);
        assert_eq!(block.row(2), 0x000);
        assert_eq!(block.row(3), 0xABC);
    }

    #[test]
    fn flip_swaps_rows() {
        let mut block = BC4Block::from_bytes(&[7, 9, 0x23, 0x61, 0x45, 0x89, 0xC7, 0xAB]);
        block.flip_rows(4);
        assert_eq!(block.endpoints, [7, 9]);
        assert_eq!(
            [block.row(0), block.row(1), block.row(2), block.row(3)],
            [0xABC, 0x789, 0x456, 0x123]
        );
        assert_eq!(block.to_bytes(), [7, 9, 0xBC, 0x9A, 0x78, 0x56, 0x34, 0x12]);
    }
}
