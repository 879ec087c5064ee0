// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt::{Debug, Display, Formatter};

use binrw::binrw;
use enumflags2::{bitflags, BitFlags};

use crate::error::{DdsError, DdsResult};
use crate::format::PixelFormat;

/// Size of the pixel format block, as stored in its size field
pub(crate) const PIXEL_FORMAT_SIZE: u32 = 32;

#[bitflags]
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PixelFormatFlags {
    AlphaPixels = 0x1,
    Alpha = 0x2,
    FourCC = 0x4,
    RGB = 0x40,
    YUV = 0x200,
    Luminance = 0x20000,
}

#[binrw]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// D3DFMT codes for 16 and 32 bit float formats, stored numerically in the FourCC field
    const FLOAT_FORMATS: std::ops::RangeInclusive<u32> = 111..=116;

    fn as_u32(&self) -> u32 {
        u32::from_le_bytes(self.0)
    }

    /// Convert this FourCC to a block format
    fn as_format(&self, name: &str) -> DdsResult<PixelFormat> {
        match &self.0 {
            b"DXT1" => Ok(PixelFormat::BC1DXT1),
            b"DXT3" => Ok(PixelFormat::BC2DXT3),
            b"DXT5" => Ok(PixelFormat::BC3DXT5),
            b"ATI1" | b"BC4U" => Ok(PixelFormat::BC4ATI1),
            b"ATI2" | b"BC5U" => Ok(PixelFormat::BC5ATI2),
            _ if Self::FLOAT_FORMATS.contains(&self.as_u32()) => {
                Err(DdsError::UnsupportedFloatingPointPixelFormat(name.into()))
            }
            _ => Err(DdsError::UnsupportedFourCCPixelFormat(
                name.into(),
                self.to_string(),
            )),
        }
    }
}

impl AsRef<[u8]> for FourCC {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl Display for FourCC {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0.iter().all(|c| c.is_ascii_graphic() || *c == b' ') {
            f.write_str(&String::from_utf8_lossy(self.as_ref()))
        } else {
            write!(f, "{}", self.as_u32())
        }
    }
}

impl Debug for FourCC {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "FourCC({self})")
    }
}

#[binrw]
#[brw(little)]
#[derive(Debug, Copy, Clone)]
pub(crate) struct DdsPixelFormat {
    pub size: u32,
    #[br(map = |bits: u32| BitFlags::from_bits_truncate(bits))]
    #[bw(map = |bf: &BitFlags<PixelFormatFlags>| bf.bits())]
    pub flags: BitFlags<PixelFormatFlags>,
    pub four_cc: FourCC,
    pub rgb_bit_count: u32,
    pub r_bit_mask: u32,
    pub g_bit_mask: u32,
    pub b_bit_mask: u32,
    pub a_bit_mask: u32,
}

impl DdsPixelFormat {
    /// Resolve the concrete format described by this block. `name` labels any error
    pub fn as_format(&self, name: &str) -> DdsResult<PixelFormat> {
        let four_cc = self.flags.contains(PixelFormatFlags::FourCC);
        let rgb = self.flags.contains(PixelFormatFlags::RGB);

        match (four_cc, rgb) {
            (true, false) => self.four_cc.as_format(name),
            (false, true) => self.as_format_rgb(name),
            _ => Err(DdsError::InconsistentPixelFormat(name.into())),
        }
    }

    fn as_format_rgb(&self, name: &str) -> DdsResult<PixelFormat> {
        use PixelFormat::*;

        // an alpha mask only means something if the flag says so
        let alpha = match self.flags.contains(PixelFormatFlags::AlphaPixels) {
            true => self.a_bit_mask,
            false => 0,
        };
        let masks = [self.r_bit_mask, self.g_bit_mask, self.b_bit_mask, alpha];

        match (self.rgb_bit_count, masks) {
            (16, [0xF800, 0x07E0, 0x001F, 0]) => Ok(G3B5R5G3),
            (16, [0x0F00, 0x00F0, 0x000F, 0xF000]) => Ok(G4B4A4R4),
            (16, [0x7C00, 0x03E0, 0x001F, 0x8000]) => Ok(G3B5A1R5G2),
            (24, [0xFF0000, 0xFF00, 0xFF, 0]) => Ok(B8G8R8),
            (24, [0xFF, 0xFF00, 0xFF0000, 0]) => Ok(R8G8B8),
            (32, [0xFF0000, 0xFF00, 0xFF, 0xFF000000]) => Ok(B8G8R8A8),
            (32, [0xFF, 0xFF00, 0xFF0000, 0xFF000000]) => Ok(R8G8B8A8),
            (bits, masks) => Err(DdsError::UnsupportedRGBPixelFormat(name.into(), bits, masks)),
        }
    }
}
