// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt::{Display, Formatter};

use binrw::binrw;
use strum::{EnumCount, VariantArray};

/// The broad family a [`PixelFormat`] belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FormatCategory {
    /// One packed 16, 24 or 32 bit value per texel
    Normal,
    /// Fixed-size encoded 4×4 texel blocks
    Block,
    /// High dynamic range texel encodings
    Hdr,
    /// Indices into a colour palette
    Palette,
}

/// Texel or block layout of a layer's data.
///
/// Channel order in the name is the order of components from the lowest memory address. For the
/// 16-bit formats the name lists bit groups of the little-endian word as they appear in memory,
/// so `G3B5R5G3` is the common 5:6:5 layout with red in the high bits.
#[binrw]
#[brw(little, repr = u32)]
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumCount, VariantArray)]
pub enum PixelFormat {
    Invalid,

    R8G8B8,
    R8G8B8A8,
    B8G8R8,
    B8G8R8A8,
    G3B5R5G3,
    G4B4A4R4,
    G3B5A1R5G2,

    /// BC1 with opaque colour only
    BC1DXT1,
    /// BC1 where some blocks use the transparent index
    BC1DXT1BA,
    BC2DXT3,
    BC3DXT5,
    BC4ATI1,
    BC5ATI2,
    BC6H,
    BC7,

    Radiance,
    OpenEXR,

    Pal8Bit,
    Pal4Bit,
    Pal1Bit,
}

// One entry per variant, Invalid included. The array length is checked against the variant count
// at compile time.
static NAMES: [&str; PixelFormat::COUNT] = [
    "Invalid",
    "R8G8B8",
    "R8G8B8A8",
    "B8G8R8",
    "B8G8R8A8",
    "G3B5R5G3",
    "G4B4A4R4",
    "G3B5A1R5G2",
    "BC1DXT1",
    "BC1DXT1BA",
    "BC2DXT3",
    "BC3DXT5",
    "BC4ATI1",
    "BC5ATI2",
    "BC6H",
    "BC7",
    "Radiance",
    "OpenEXR",
    "Pal8Bit",
    "Pal4Bit",
    "Pal1Bit",
];

impl PixelFormat {
    /// Which family this format belongs to, or [`None`] for [`PixelFormat::Invalid`]
    pub fn category(self) -> Option<FormatCategory> {
        use PixelFormat::*;
        match self {
            Invalid => None,
            R8G8B8 | R8G8B8A8 | B8G8R8 | B8G8R8A8 | G3B5R5G3 | G4B4A4R4 | G3B5A1R5G2 => {
                Some(FormatCategory::Normal)
            }
            BC1DXT1 | BC1DXT1BA | BC2DXT3 | BC3DXT5 | BC4ATI1 | BC5ATI2 | BC6H | BC7 => {
                Some(FormatCategory::Block)
            }
            Radiance | OpenEXR => Some(FormatCategory::Hdr),
            Pal8Bit | Pal4Bit | Pal1Bit => Some(FormatCategory::Palette),
        }
    }

    pub fn is_valid(self) -> bool {
        self != PixelFormat::Invalid
    }

    pub fn is_normal(self) -> bool {
        self.category() == Some(FormatCategory::Normal)
    }

    pub fn is_block(self) -> bool {
        self.category() == Some(FormatCategory::Block)
    }

    pub fn is_hdr(self) -> bool {
        self.category() == Some(FormatCategory::Hdr)
    }

    pub fn is_palette(self) -> bool {
        self.category() == Some(FormatCategory::Palette)
    }

    /// Number of bits used per texel. For block formats this is the block size spread evenly over
    /// its 16 texels. Returns 0 for [`PixelFormat::Invalid`]
    pub fn bits_per_pixel(self) -> usize {
        use PixelFormat::*;
        match self {
            Invalid => 0,
            G3B5R5G3 | G4B4A4R4 | G3B5A1R5G2 => 16,
            R8G8B8 | B8G8R8 => 24,
            R8G8B8A8 | B8G8R8A8 => 32,
            Radiance => 32,
            OpenEXR => 64,
            Pal8Bit => 8,
            Pal4Bit => 4,
            Pal1Bit => 1,
            block => block.bytes_per_block() * 8 / 16,
        }
    }

    /// Size in bytes of one encoded 4×4 block, if this is a block format
    pub fn block_size(self) -> Option<usize> {
        use PixelFormat::*;
        match self {
            BC1DXT1 | BC1DXT1BA | BC4ATI1 => Some(8),
            BC2DXT3 | BC3DXT5 | BC5ATI2 | BC6H | BC7 => Some(16),
            _ => None,
        }
    }

    /// Size in bytes of one encoded 4×4 block.
    ///
    /// # Panics
    /// If `self` is not a block format. Check [`PixelFormat::is_block`] first, or use
    /// [`PixelFormat::block_size`]
    pub fn bytes_per_block(self) -> usize {
        match self.block_size() {
            Some(size) => size,
            None => panic!("{self} is not a block format"),
        }
    }

    /// Display name of the format
    pub fn name(self) -> &'static str {
        NAMES[self as usize]
    }
}

impl Default for PixelFormat {
    fn default() -> Self {
        PixelFormat::Invalid
    }
}

impl Display for PixelFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
