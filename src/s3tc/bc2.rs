// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::s3tc::bc1::BC1Block;
use crate::s3tc::Block;

/// BC2 (DXT3) block: explicit 4-bit alpha, one little-endian u16 per row, followed by a BC1
/// colour block
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BC2Block {
    pub alpha: [u16; 4],
    pub color: BC1Block,
}

impl BC2Block {
    /// The 4-bit alpha value of texel (`x`, `y`)
    pub fn alpha(&self, x: usize, y: usize) -> u8 {
        ((self.alpha[y] >> (x * 4)) & 0xF) as u8
    }
}

impl Block for BC2Block {
    type Bytes = [u8; 16];
    const SIZE: usize = 16;

    //noinspection DuplicatedCode
    fn to_bytes(&self) -> Self::Bytes {
        let mut bytes: Self::Bytes = [0; 16];
        for (row, dst) in self.alpha.iter().zip(bytes[0..8].chunks_exact_mut(2)) {
            dst.copy_from_slice(&row.to_le_bytes());
        }
        bytes[8..16].copy_from_slice(&self.color.to_bytes()[..]); // BC1 RGB

        bytes
    }

    fn from_bytes(bytes: &Self::Bytes) -> Self {
        let mut alpha = [0u16; 4];
        for (row, src) in alpha.iter_mut().zip(bytes[0..8].chunks_exact(2)) {
            *row = u16::from_le_bytes([src[0], src[1]]);
        }

        let mut color = [0u8; 8];
        color.copy_from_slice(&bytes[8..16]);

        Self {
            alpha,
            color: BC1Block::from_bytes(&color),
        }
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        self.alpha.swap(a, b);
        self.color.swap_rows(a, b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_moves_alpha_with_colour() {
        let mut bytes = [0u8; 16];
        bytes[0..8].copy_from_slice(&[0x10, 0x32, 0x54, 0x76, 0x98, 0xBA, 0xDC, 0xFE]);
        bytes[12..16].copy_from_slice(&[0xA0, 0xA1, 0xA2, 0xA3]);

        let mut block = BC2Block::from_bytes(&bytes);
        assert_eq!(block.alpha, [0x3210, 0x7654, 0xBA98, 0xFEDC]);
        assert_eq!(block.alpha(0, 0), 0x0);
        assert_eq!(block.alpha(3, 3), 0xF);

        block.flip_rows(4);
        assert_eq!(block.alpha, [0xFEDC, 0xBA98, 0x7654, 0x3210]);
        assert_eq!(block.color.codes, [0xA3, 0xA2, 0xA1, 0xA0]);

        let out = block.to_bytes();
        assert_eq!(out[0..8], [0xDC, 0xFE, 0x98, 0xBA, 0x54, 0x76, 0x10, 0x32]);
    }
}
