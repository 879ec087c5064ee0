// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Encoded 4×4 block layouts.
//!
//! These types never decode texels. They expose just enough of each layout to reorder pixel rows
//! inside a block and to inspect BC1 colour ordering.

use std::array::TryFromSliceError;

pub mod bc1;
pub mod bc2;
pub mod bc3;
pub mod bc4;
pub mod bc5;

pub use bc1::BC1Block;
pub use bc2::BC2Block;
pub use bc3::BC3Block;
pub use bc4::BC4Block;
pub use bc5::BC5Block;

pub trait Block: Sized {
    type Bytes: AsRef<[u8]> + for<'a> TryFrom<&'a [u8], Error = TryFromSliceError>;
    // = [u8; 8], etc. Many thanks to @kornel@mastodon.social
    const SIZE: usize;
    const WIDTH: usize = 4;
    const HEIGHT: usize = 4;

    fn to_bytes(&self) -> Self::Bytes;
    fn from_bytes(bytes: &Self::Bytes) -> Self;

    /// Exchange pixel rows `a` and `b` of the block
    fn swap_rows(&mut self, a: usize, b: usize);

    /// Reverse the order of the first `rows` pixel rows.
    ///
    /// A full block swaps rows 0↔3 and 1↔2. A surface only 2 texels tall only uses the first two
    /// rows of each block, so those are swapped with each other and the padding rows stay put.
    fn flip_rows(&mut self, rows: usize) {
        let rows = rows.min(Self::HEIGHT);
        for r in 0..rows / 2 {
            self.swap_rows(r, rows - 1 - r);
        }
    }
}

/// Flip the pixel rows of every block in `bytes` in place. `bytes` holds whole blocks of type `B`
pub(crate) fn flip_blocks_in_place<B: Block>(bytes: &mut [u8], rows: usize) {
    for chunk in bytes.chunks_exact_mut(B::SIZE) {
        let raw = B::Bytes::try_from(&*chunk).expect("chunks_exact yields whole blocks");
        let mut block = B::from_bytes(&raw);
        block.flip_rows(rows);
        chunk.copy_from_slice(block.to_bytes().as_ref());
    }
}
