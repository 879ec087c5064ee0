// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Vertical flipping of layer data. DDS stores the top row first; layers store the bottom row
//! first.

use crate::dimensions::Dimensions;
use crate::format::PixelFormat;
use crate::s3tc::{flip_blocks_in_place, BC1Block, BC2Block, BC3Block, BC4Block, BC5Block, Block};

/// Reverse the row order of one layer's `data` in place.
///
/// Returns false, leaving `data` untouched, for formats whose rows can't be reordered without
/// decoding them.
pub(crate) fn reverse_rows(format: PixelFormat, dimensions: Dimensions, data: &mut [u8]) -> bool {
    use PixelFormat::*;

    match format {
        R8G8B8 | R8G8B8A8 | B8G8R8 | B8G8R8A8 | G3B5R5G3 | G4B4A4R4 | G3B5A1R5G2 => {
            let pitch = dimensions.width as usize * format.bits_per_pixel() / 8;
            swap_strides(data, pitch);
            true
        }
        BC1DXT1 | BC1DXT1BA => reverse_block_rows::<BC1Block>(dimensions, data),
        BC2DXT3 => reverse_block_rows::<BC2Block>(dimensions, data),
        BC3DXT5 => reverse_block_rows::<BC3Block>(dimensions, data),
        BC4ATI1 => reverse_block_rows::<BC4Block>(dimensions, data),
        BC5ATI2 => reverse_block_rows::<BC5Block>(dimensions, data),
        _ => false,
    }
}

fn reverse_block_rows<B: Block>(dimensions: Dimensions, data: &mut [u8]) -> bool {
    let (columns, _) = dimensions.blocks();
    swap_strides(data, columns as usize * B::SIZE);

    // surfaces shorter than a block only use its top rows
    let rows = (dimensions.height as usize).min(B::HEIGHT);
    flip_blocks_in_place::<B>(data, rows);
    true
}

/// Reverse the order of the `stride`-sized runs that make up `data`
fn swap_strides(data: &mut [u8], stride: usize) {
    if stride == 0 {
        return;
    }

    let rows = data.len() / stride;
    for top in 0..rows / 2 {
        let bottom = rows - 1 - top;
        let (head, tail) = data.split_at_mut(bottom * stride);
        head[top * stride..(top + 1) * stride].swap_with_slice(&mut tail[..stride]);
    }
}
