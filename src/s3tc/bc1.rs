// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use bitvec::prelude::*;

use crate::s3tc::Block;

/// BC1 (DXT1) colour block: two RGB565 endpoints followed by one byte of 2-bit codes per row.
/// Within a row byte, the leftmost texel is in the lowest two bits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BC1Block {
    pub colors: [u16; 2],
    pub codes: [u8; 4],
}

impl BC1Block {
    /// The 2-bit code of texel (`x`, `y`)
    pub fn code(&self, x: usize, y: usize) -> u8 {
        let bits = self.codes[y].view_bits::<Lsb0>();
        bits[x * 2..x * 2 + 2].load_le()
    }

    pub fn set_code(&mut self, x: usize, y: usize, code: u8) {
        let bits = self.codes[y].view_bits_mut::<Lsb0>();
        bits[x * 2..x * 2 + 2].store_le(code);
    }

    /// Iterate over all 16 codes in row-major order
    pub fn codes(&self) -> impl Iterator<Item = u8> + '_ {
        self.codes
            .view_bits::<Lsb0>()
            .chunks(2)
            .map(|c| c.load_le::<u8>())
    }

    /// True if this block is in 3-colour mode and at least one texel uses the transparent code.
    ///
    /// Colour0 ≤ Colour1 selects 3-colour mode, where code 3 is transparent black. In 4-colour
    /// mode code 3 is an ordinary interpolated colour.
    pub fn has_binary_alpha(&self) -> bool {
        self.colors[0] <= self.colors[1] && self.codes().any(|c| c == 3)
    }
}

impl Block for BC1Block {
    type Bytes = [u8; 8];
    const SIZE: usize = 8;

    fn to_bytes(&self) -> Self::Bytes {
        let mut bytes: Self::Bytes = [0; 8];

        // store endpoints
        bytes[0..2].copy_from_slice(&self.colors[0].to_le_bytes());
        bytes[2..4].copy_from_slice(&self.colors[1].to_le_bytes());

        // store codes
        bytes[4..8].copy_from_slice(&self.codes);

        bytes
    }

    fn from_bytes(bytes: &Self::Bytes) -> Self {
        let bits = bytes.view_bits::<Lsb0>();

        Self {
            colors: [bits[0..16].load_le(), bits[16..32].load_le()],
            codes: [bytes[4], bytes[5], bytes[6], bytes[7]],
        }
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        self.codes.swap(a, b);
    }
}

/// True if any whole block in `bytes` uses the transparent code in 3-colour mode
pub fn any_binary_alpha(bytes: &[u8]) -> bool {
    bytes
        .chunks_exact(BC1Block::SIZE)
        .filter_map(|chunk| <[u8; 8]>::try_from(chunk).ok())
        .any(|raw| BC1Block::from_bytes(&raw).has_binary_alpha())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(color0: u16, color1: u16) -> BC1Block {
        BC1Block {
            colors: [color0, color1],
            codes: [0; 4],
        }
    }

    #[test]
    fn parse_endpoints_little_endian() {
        let block = BC1Block::from_bytes(&[0x34, 0x12, 0x78, 0x56, 1, 2, 3, 4]);
        assert_eq!(block.colors, [0x1234, 0x5678]);
        assert_eq!(block.codes, [1, 2, 3, 4]);
        assert_eq!(block.to_bytes(), [0x34, 0x12, 0x78, 0x56, 1, 2, 3, 4]);
    }

    #[test]
    fn code_accessors() {
        let mut block = block(0, 0);
        block.set_code(0, 0, 3);
        block.set_code(3, 2, 2);
        assert_eq!(block.codes, [0b0000_0011, 0, 0b1000_0000, 0]);
        assert_eq!(block.code(0, 0), 3);
        assert_eq!(block.code(3, 2), 2);
        assert_eq!(block.code(1, 0), 0);
    }

    #[test]
    fn binary_alpha_requires_three_colour_mode() {
        let mut three_colour = block(0x0010, 0xF800);
        assert!(!three_colour.has_binary_alpha(), "no texel uses code 3");
        three_colour.set_code(2, 1, 3);
        assert!(three_colour.has_binary_alpha());

        let mut four_colour = block(0xF800, 0x0010);
        four_colour.codes = [0xFF; 4];
        assert!(!four_colour.has_binary_alpha());
    }

    #[test]
    fn equal_endpoints_count_as_three_colour() {
        let mut block = block(0x1234, 0x1234);
        block.set_code(0, 3, 3);
        assert!(block.has_binary_alpha());
    }

    #[test]
    fn flip_reverses_code_rows() {
        let mut block = block(1, 2);
        block.codes = [0x11, 0x22, 0x33, 0x44];
        block.flip_rows(4);
        assert_eq!(block.codes, [0x44, 0x33, 0x22, 0x11]);
        assert_eq!(block.colors, [1, 2]);

        block.flip_rows(2);
        assert_eq!(block.codes, [0x33, 0x44, 0x22, 0x11]);
    }

    #[test]
    fn binary_alpha_in_any_block() {
        let opaque = block(0xF800, 0x0010).to_bytes();
        let mut transparent = block(0x0010, 0xF800);
        transparent.set_code(1, 1, 3);

        let mut data = [opaque; 4].concat();
        assert!(!any_binary_alpha(&data));
        data[16..24].copy_from_slice(&transparent.to_bytes());
        assert!(any_binary_alpha(&data));
        assert!(!any_binary_alpha(&data[..7]), "partial blocks are ignored");
    }
}
