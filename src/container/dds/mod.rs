// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Loading of legacy (non-DX10) DDS files into per-image mip chains of [`Layer`]s.

use std::fs::File;
use std::io::{BufReader, Cursor, ErrorKind, Read, Seek};
use std::path::Path;

use arrayvec::ArrayVec;
use binrw::BinRead;
use enumflags2::{bitflags, BitFlags};
use strum::VariantArray;
use tracing::{debug, trace, warn};

use crate::dimensions::Dimensions;
use crate::error::{DdsError, DdsResult};
use crate::format::PixelFormat;
use crate::layer::{Layer, MAX_DIMENSION};
use crate::s3tc::bc1::any_binary_alpha;
use crate::shape::{CubeFace, MipChain, MAX_IMAGES, MAX_MIPS};
use header::{DdsHeader, HEADER_SIZE};
use pixel_format::PIXEL_FORMAT_SIZE;

mod flip;
mod header;
mod pixel_format;


pub use pixel_format::FourCC;

/// Options for loading a DDS file. `BitFlags::<LoadFlags>::default()` enables all of them.
#[bitflags(default = ReverseRowOrder | DetectBinaryAlpha)]
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadFlags {
    /// Store rows bottom first instead of in file order
    ReverseRowOrder = 0x1,
    /// Report DXT1 textures with transparent texels as [`PixelFormat::BC1DXT1BA`]
    DetectBinaryAlpha = 0x2,
}

/// Faces moved out of a cubemap, in file order
pub type CubemapFaces = ArrayVec<(CubeFace, MipChain), MAX_IMAGES>;

/// A loaded DDS texture: one image, or six for a cubemap, each holding the same number of mip
/// levels.
///
/// A failed load leaves the image cleared, so no partially read data is ever visible.
#[derive(Debug, Default)]
pub struct DdsImage {
    name: String,
    format: PixelFormat,
    cubemap: bool,
    images: ArrayVec<MipChain, MAX_IMAGES>,
}

impl DdsImage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the DDS file at `path` with the default [`LoadFlags`]
    pub fn load(path: impl AsRef<Path>) -> DdsResult<Self> {
        Self::load_with_flags(path, BitFlags::default())
    }

    pub fn load_with_flags(path: impl AsRef<Path>, flags: BitFlags<LoadFlags>) -> DdsResult<Self> {
        let mut image = Self::new();
        image.reload(path, flags)?;
        Ok(image)
    }

    /// Read a DDS file from `reader`. `name` is used in log messages and errors
    pub fn from_reader<R: Read + Seek>(
        reader: &mut R,
        name: impl Into<String>,
        flags: BitFlags<LoadFlags>,
    ) -> DdsResult<Self> {
        let mut image = Self::new();
        image.read(reader, name.into(), flags)?;
        Ok(image)
    }

    pub fn from_bytes(bytes: &[u8], name: impl Into<String>, flags: BitFlags<LoadFlags>) -> DdsResult<Self> {
        Self::from_reader(&mut Cursor::new(bytes), name, flags)
    }

    /// Replace the contents of `self` with the DDS file at `path`. On failure `self` is left
    /// cleared.
    pub fn reload(&mut self, path: impl AsRef<Path>, flags: BitFlags<LoadFlags>) -> DdsResult<()> {
        self.clear();

        let path = path.as_ref();
        let name = path.display().to_string();
        self.name.clone_from(&name);

        if !path.is_file() {
            return Err(DdsError::FileNonexistent(name));
        }
        if !path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("dds")) {
            return Err(DdsError::IncorrectExtension(name));
        }

        let file = match File::open(path) {
            Ok(file) => file,
            Err(source) => return Err(DdsError::Io { name, source }),
        };
        self.read(&mut BufReader::new(file), name, flags)
    }

    fn read<R: Read + Seek>(&mut self, reader: &mut R, name: String, flags: BitFlags<LoadFlags>) -> DdsResult<()> {
        self.clear();
        self.name = name;

        match Self::decode(reader, &self.name, flags) {
            Ok((format, cubemap, images)) => {
                self.format = format;
                self.cubemap = cubemap;
                self.images = images;
                Ok(())
            }
            Err(err) => {
                warn!(file = %self.name, kind = err.kind(), "failed to load DDS file: {err}");
                Err(err)
            }
        }
    }

    fn decode<R: Read + Seek>(
        reader: &mut R,
        name: &str,
        flags: BitFlags<LoadFlags>,
    ) -> DdsResult<(PixelFormat, bool, ArrayVec<MipChain, MAX_IMAGES>)> {
        let header = DdsHeader::read(reader).map_err(|err| header_error(err, name))?;
        trace!(file = name, ?header, "read DDS header");

        if header.size != HEADER_SIZE {
            return Err(DdsError::IncorrectHeaderSize(name.into()));
        }
        if header.pixel_format.size != PIXEL_FORMAT_SIZE {
            return Err(DdsError::IncorrectPixelFormatSize(name.into()));
        }
        if !header.has_exclusive_size_hint() {
            return Err(DdsError::PitchOrLinearSize(name.into()));
        }
        if header.is_volume() {
            return Err(DdsError::VolumeTexturesNotSupported(name.into()));
        }

        let mips = header.mips();
        if mips > MAX_MIPS {
            return Err(DdsError::MaxNumMipmapLevelsExceeded(name.into()));
        }

        let cubemap = header.is_cubemap();
        let num_images = if cubemap { MAX_IMAGES } else { 1 };

        let mut format = header.pixel_format.as_format(name)?;

        let dimensions = Dimensions::new(header.width, header.height);
        if !dimensions.is_power_of_two() {
            return Err(DdsError::LoaderSupportsPowerOfTwoDimsOnly(name.into()));
        }
        if dimensions.width > MAX_DIMENSION || dimensions.height > MAX_DIMENSION {
            return Err(DdsError::MaxDimensionsExceeded(name.into()));
        }
        if format.is_block() && (dimensions.width % 4 != 0 || dimensions.height % 4 != 0) {
            return Err(DdsError::UnsupportedDXTDimensions(name.into()));
        }
        if dimensions.mips().count() < mips {
            return Err(DdsError::MaxNumMipmapLevelsExceeded(name.into()));
        }

        debug!(file = name, %format, %dimensions, mips, cubemap, "decoding DDS file");

        // every level is read before any is flipped, since BC1 classification needs the raw
        // top level
        let mut raw: ArrayVec<ArrayVec<(Dimensions, Vec<u8>), MAX_MIPS>, MAX_IMAGES> = ArrayVec::new();
        for _ in 0..num_images {
            let mut chain = ArrayVec::new();
            for level in dimensions.mips().take(mips) {
                let mut data = vec![0u8; Layer::size_for(format, level.width, level.height)];
                reader
                    .read_exact(&mut data)
                    .map_err(|source| data_error(source, format, name))?;
                chain.push((level, data));
            }
            raw.push(chain);
        }

        if format == PixelFormat::BC1DXT1
            && flags.contains(LoadFlags::DetectBinaryAlpha)
            && raw
                .iter()
                .filter_map(|chain| chain.first())
                .any(|(_, data)| any_binary_alpha(data))
        {
            debug!(file = name, "top level uses transparent texels, reclassifying as {}", PixelFormat::BC1DXT1BA);
            format = PixelFormat::BC1DXT1BA;
        }

        let mut images = ArrayVec::new();
        for (image, chain) in raw.into_iter().enumerate() {
            let mut layers = MipChain::new();
            for (mip, (level, mut data)) in chain.into_iter().enumerate() {
                if flags.contains(LoadFlags::ReverseRowOrder) && !flip::reverse_rows(format, level, &mut data) {
                    warn!(file = name, %format, "rows of this format can't be reordered, leaving them in file order");
                }
                trace!(file = name, image, mip, %level, size = data.len(), "extracted layer");
                layers.push(Layer::from_vec(format, level.width, level.height, data));
            }
            images.push(layers);
        }

        Ok((format, cubemap, images))
    }

    /// Drop all layers and return to the unloaded state
    pub fn clear(&mut self) {
        self.format = PixelFormat::Invalid;
        self.cubemap = false;
        self.images.clear();
    }

    /// True if a texture is loaded and its layers are still held
    pub fn is_valid(&self) -> bool {
        self.num_mipmap_layers() >= 1 && self.num_images() >= 1 && self.format.is_valid()
    }

    /// Display name of the most recently loaded file
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pixel_format(&self) -> PixelFormat {
        self.format
    }

    pub fn is_cubemap(&self) -> bool {
        self.cubemap
    }

    /// Number of images: 6 for a cubemap, 1 otherwise, 0 when nothing is loaded
    pub fn num_images(&self) -> usize {
        self.images.len()
    }

    pub fn num_mipmap_layers(&self) -> usize {
        self.images.first().map_or(0, |chain| chain.len())
    }

    /// Width of the top mip level
    pub fn width(&self) -> u32 {
        self.layer(0, 0).map_or(0, Layer::width)
    }

    /// Height of the top mip level
    pub fn height(&self) -> u32 {
        self.layer(0, 0).map_or(0, Layer::height)
    }

    pub fn layer(&self, mip: usize, image: usize) -> Option<&Layer<'static>> {
        self.images.get(image)?.get(mip)
    }

    /// All mip levels of one image, largest first
    pub fn layers(&self, image: usize) -> Option<&[Layer<'static>]> {
        self.images.get(image).map(|chain| chain.as_slice())
    }

    /// Move the mip chain out of a loaded non-cubemap texture, leaving `self` cleared.
    ///
    /// Returns [`None`] without touching `self` if it holds a cubemap or nothing at all.
    pub fn take_layers(&mut self) -> Option<MipChain> {
        if self.cubemap || !self.is_valid() {
            return None;
        }

        let chain = self.images.pop();
        self.clear();
        chain
    }

    /// Move the mip chains of the selected `faces` out of a loaded cubemap.
    ///
    /// All faces are released and `self` is cleared, however few were selected. Returns nothing
    /// and leaves `self` alone if it doesn't hold a cubemap.
    pub fn take_cubemap_faces(&mut self, faces: BitFlags<CubeFace>) -> CubemapFaces {
        if !self.cubemap || !self.is_valid() {
            return CubemapFaces::new();
        }

        let images = std::mem::take(&mut self.images);
        self.clear();

        CubeFace::VARIANTS
            .iter()
            .zip(images)
            .filter(|(face, _)| faces.contains(**face))
            .map(|(face, chain)| (*face, chain))
            .collect()
    }

    /// Consume `self` and return its mip chain, or give `self` back unchanged if it holds a
    /// cubemap or nothing at all
    pub fn into_layers(mut self) -> Result<MipChain, Self> {
        match self.take_layers() {
            Some(chain) => Ok(chain),
            None => Err(self),
        }
    }

    /// Consume a cubemap and return the mip chains of the selected `faces`, or give `self` back
    /// unchanged if it isn't a loaded cubemap
    pub fn into_cubemap_faces(mut self, faces: BitFlags<CubeFace>) -> Result<CubemapFaces, Self> {
        if !self.cubemap || !self.is_valid() {
            return Err(self);
        }
        Ok(self.take_cubemap_faces(faces))
    }
}

fn header_error(err: binrw::Error, name: &str) -> DdsError {
    match err {
        binrw::Error::BadMagic { .. } => DdsError::Magic(name.into()),
        binrw::Error::Io(source) if source.kind() == ErrorKind::UnexpectedEof => {
            DdsError::IncorrectFileSize(name.into())
        }
        binrw::Error::Io(source) => DdsError::Io {
            name: name.into(),
            source,
        },
        binrw::Error::Backtrace(backtrace) => header_error(*backtrace.error, name),
        _ => DdsError::IncorrectFileSize(name.into()),
    }
}

fn data_error(source: std::io::Error, format: PixelFormat, name: &str) -> DdsError {
    match source.kind() {
        ErrorKind::UnexpectedEof if format.is_block() => DdsError::IncorrectDXTDataSize(name.into()),
        ErrorKind::UnexpectedEof => DdsError::IncorrectFileSize(name.into()),
        _ => DdsError::Io {
            name: name.into(),
            source,
        },
    }
}
