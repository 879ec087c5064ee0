// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::s3tc::bc3::split_halves;
use crate::s3tc::bc4::BC4Block;
use crate::s3tc::Block;

/// BC5 two channel block: red then green, each stored as a BC4 block
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BC5Block(pub BC4Block, pub BC4Block);

impl Block for BC5Block {
    type Bytes = [u8; 16];
    const SIZE: usize = 16;

    //noinspection DuplicatedCode
    fn to_bytes(&self) -> Self::Bytes {
        let mut bytes: Self::Bytes = [0; 16];
        bytes[0..8].copy_from_slice(&self.0.to_bytes()[..]); // BC4 channel 0
        bytes[8..16].copy_from_slice(&self.1.to_bytes()[..]); // BC4 channel 1

        bytes
    }

    fn from_bytes(bytes: &Self::Bytes) -> Self {
        let (red, green) = split_halves(bytes);
        Self(BC4Block::from_bytes(&red), BC4Block::from_bytes(&green))
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        self.0.swap_rows(a, b);
        self.1.swap_rows(a, b);
    }
}
