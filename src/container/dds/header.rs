// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use binrw::binrw;
use enumflags2::{bitflags, BitFlags};

use super::pixel_format::DdsPixelFormat;

/// Size of the header following the magic, as stored in its size field
pub(crate) const HEADER_SIZE: u32 = 124;

#[bitflags]
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DdsFlags {
    Caps = 0x1,
    Height = 0x2,
    Width = 0x4,
    Pitch = 0x8,
    PixelFormat = 0x1000,
    MipmapCount = 0x20000,
    LinearSize = 0x80000,
    Depth = 0x800000,
}

#[bitflags]
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Caps1 {
    Complex = 0x8,
    Texture = 0x1000,
    Mipmap = 0x400000,
}

#[bitflags]
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Caps2 {
    Cubemap = 0x200,
    CubemapPositiveX = 0x400,
    CubemapNegativeX = 0x800,
    CubemapPositiveY = 0x1000,
    CubemapNegativeY = 0x2000,
    CubemapPositiveZ = 0x4000,
    CubemapNegativeZ = 0x8000,
    Volume = 0x200000,
}

/// The fixed DDS header, magic included. Size fields are kept so they can be validated rather
/// than matched as magic, and unknown flag bits are dropped.
#[binrw]
#[derive(Debug, Copy, Clone)]
#[brw(little, magic = b"DDS ")]
pub(crate) struct DdsHeader {
    pub size: u32,
    #[br(map = |bits: u32| BitFlags::from_bits_truncate(bits))]
    #[bw(map = |bf: &BitFlags<DdsFlags>| bf.bits())]
    pub flags: BitFlags<DdsFlags>,
    pub height: u32,
    pub width: u32,
    pub pitch_or_linear_size: u32,
    pub depth: u32,
    pub mipmap_count: u32,
    #[brw(pad_before = 44)]
    pub pixel_format: DdsPixelFormat,
    #[br(map = |bits: u32| BitFlags::from_bits_truncate(bits))]
    #[bw(map = |bf: &BitFlags<Caps1>| bf.bits())]
    pub caps1: BitFlags<Caps1>,
    #[br(map = |bits: u32| BitFlags::from_bits_truncate(bits))]
    #[bw(map = |bf: &BitFlags<Caps2>| bf.bits())]
    pub caps2: BitFlags<Caps2>,
    pub caps3: u32,
    #[brw(pad_after = 4)]
    pub caps4: u32,
}

impl DdsHeader {
    /// Number of mip levels the header declares. The count field is only honoured when both the
    /// flag and the complex mipmap caps are present
    pub fn mips(&self) -> usize {
        let declared = self.flags.contains(DdsFlags::MipmapCount)
            && self.caps1.contains(Caps1::Complex | Caps1::Mipmap);

        match (declared, self.mipmap_count) {
            (false, _) | (true, 0) => 1,
            (true, count) => count as usize,
        }
    }

    pub fn is_cubemap(&self) -> bool {
        self.caps2.contains(Caps2::Cubemap)
    }

    pub fn is_volume(&self) -> bool {
        self.flags.contains(DdsFlags::Depth) || self.caps2.contains(Caps2::Volume)
    }

    /// True if exactly one of the pitch and linear size flags is set
    pub fn has_exclusive_size_hint(&self) -> bool {
        self.flags.contains(DdsFlags::Pitch) != self.flags.contains(DdsFlags::LinearSize)
    }
}
