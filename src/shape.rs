// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use arrayvec::ArrayVec;
use enumflags2::bitflags;
use strum::{Display, VariantArray};

use crate::layer::Layer;

/// Maximum number of mip levels in one image
pub const MAX_MIPS: usize = 16;

/// Maximum number of images in one texture: the six faces of a cubemap
pub const MAX_IMAGES: usize = 6;

/// Mip levels of one image, largest first
pub type MipChain = ArrayVec<Layer<'static>, MAX_MIPS>;

/// One face of a cubemap. Variants are declared in the order faces are stored in a DDS file, and
/// can be combined into a `BitFlags<CubeFace>` to select several faces.
#[bitflags]
#[repr(u32)]
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Display, VariantArray)]
pub enum CubeFace {
    PositiveX = 0x1,
    NegativeX = 0x2,
    PositiveY = 0x4,
    NegativeY = 0x8,
    PositiveZ = 0x10,
    NegativeZ = 0x20,
}

impl CubeFace {
    /// Position of this face in file order
    pub fn index(self) -> usize {
        (self as u32).trailing_zeros() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_index_matches_declaration_order() {
        for (i, face) in CubeFace::VARIANTS.iter().enumerate() {
            assert_eq!(face.index(), i);
        }
    }
}
