// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::s3tc::bc1::BC1Block;
use crate::s3tc::bc4::BC4Block;
use crate::s3tc::Block;

/// BC3 (DXT5) block: interpolated alpha stored as a BC4 block, then a BC1 colour block
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BC3Block(pub BC4Block, pub BC1Block);

impl Block for BC3Block {
    type Bytes = [u8; 16];
    const SIZE: usize = 16;

    //noinspection DuplicatedCode
    fn to_bytes(&self) -> Self::Bytes {
        let mut bytes: Self::Bytes = [0; 16];
        bytes[0..8].copy_from_slice(&self.0.to_bytes()[..]); // BC4 Alpha
        bytes[8..16].copy_from_slice(&self.1.to_bytes()[..]); // BC1 RGB

        bytes
    }

    fn from_bytes(bytes: &Self::Bytes) -> Self {
        let (alpha, color) = split_halves(bytes);
        Self(BC4Block::from_bytes(&alpha), BC1Block::from_bytes(&color))
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        self.0.swap_rows(a, b);
        self.1.swap_rows(a, b);
    }
}

pub(crate) fn split_halves(bytes: &[u8; 16]) -> ([u8; 8], [u8; 8]) {
    let mut first = [0u8; 8];
    let mut second = [0u8; 8];
    first.copy_from_slice(&bytes[0..8]);
    second.copy_from_slice(&bytes[8..16]);
    (first, second)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_comes_first() {
        let mut bytes = [0u8; 16];
        bytes[0] = 0xFF;
        bytes[1] = 0x00;
        bytes[8..10].copy_from_slice(&[0x00, 0xF8]);

        let block = BC3Block::from_bytes(&bytes);
        assert_eq!(block.0.endpoints, [0xFF, 0x00]);
        assert_eq!(block.1.colors[0], 0xF800);
        assert_eq!(block.to_bytes(), bytes);
    }

    #[test]
    fn flip_swaps_alpha_and_colour_rows() {
        let mut bytes = [0u8; 16];
        bytes[2..8].copy_from_slice(&[0x23, 0x61, 0x45, 0x89, 0xC7, 0xAB]);
        bytes[12..16].copy_from_slice(&[1, 2, 3, 4]);

        let mut block = BC3Block::from_bytes(&bytes);
        block.flip_rows(4);
        assert_eq!(block.0.row(0), 0xABC);
        assert_eq!(block.0.row(3), 0x123);
        assert_eq!(block.1.codes, [4, 3, 2, 1]);

        block.flip_rows(4);
        assert_eq!(block.to_bytes(), bytes);
    }
}
