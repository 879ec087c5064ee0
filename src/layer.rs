// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::borrow::Cow;
use std::io::{Cursor, Read, Seek, Write};

use binrw::{binrw, BinRead, BinResult, BinWrite};

use crate::chunk::{write_chunk, ChunkHeader, ChunkId, ChunkReader};
use crate::dimensions::{Dimensioned, Dimensions};
use crate::format::PixelFormat;

/// Largest width or height a layer may have
pub const MAX_DIMENSION: u32 = 4096;

/// Texel or block data of one mip level of one image, ready for upload.
///
/// A layer either owns its buffer or borrows it from somewhere else, in which case the lifetime
/// `'a` ties it to the source. Layers built from bad arguments are *invalid*: they hold no data,
/// report a size of zero where the format is unknown, and compare unequal to every layer,
/// themselves included.
#[derive(Clone, Debug, Default)]
pub struct Layer<'a> {
    format: PixelFormat,
    width: u32,
    height: u32,
    data: Option<Cow<'a, [u8]>>,
}

#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Copy)]
struct LayerProperties {
    format: PixelFormat,
    width: u32,
    height: u32,
}

impl Layer<'static> {
    /// Create a layer holding a copy of the first [`Layer::size_for`] bytes of `data`.
    ///
    /// The result is invalid if `format` is [`PixelFormat::Invalid`], either dimension is 0 or
    /// larger than [`MAX_DIMENSION`], or `data` is too short.
    pub fn new(format: PixelFormat, width: u32, height: u32, data: &[u8]) -> Self {
        match Self::checked_size(format, width, height, data.len()) {
            Some(size) => Self {
                format,
                width,
                height,
                data: Some(Cow::Owned(data[..size].to_vec())),
            },
            None => Self::default(),
        }
    }

    /// Create a layer that takes ownership of `data` without copying. Trailing bytes past
    /// [`Layer::size_for`] are dropped. Validity rules match [`Layer::new`]
    pub fn from_vec(format: PixelFormat, width: u32, height: u32, mut data: Vec<u8>) -> Self {
        match Self::checked_size(format, width, height, data.len()) {
            Some(size) => {
                data.truncate(size);
                Self {
                    format,
                    width,
                    height,
                    data: Some(Cow::Owned(data)),
                }
            }
            None => Self::default(),
        }
    }

    /// Read a layer from a `Layer` chunk, copying its data
    pub fn load<R: Read + Seek>(reader: &mut R) -> BinResult<Self> {
        let pos = reader.stream_position()?;
        let header = ChunkHeader::read(reader)?;
        if header.id != ChunkId::LAYER {
            return Err(not_a_layer(pos, header.id));
        }

        let mut payload = vec![0u8; header.size as usize];
        reader.read_exact(&mut payload)?;
        Ok(Layer::from_sub_chunks(&payload)?.into_owned())
    }
}

impl<'a> Layer<'a> {
    /// Create a layer that borrows `data` instead of copying it
    pub fn borrowed(format: PixelFormat, width: u32, height: u32, data: &'a [u8]) -> Self {
        match Self::checked_size(format, width, height, data.len()) {
            Some(size) => Self {
                format,
                width,
                height,
                data: Some(Cow::Borrowed(&data[..size])),
            },
            None => Self::default(),
        }
    }

    /// Number of bytes needed for a layer of this format and size. Block formats round up to
    /// whole 4×4 blocks.
    pub fn size_for(format: PixelFormat, width: u32, height: u32) -> usize {
        if !format.is_valid() || width == 0 || height == 0 {
            return 0;
        }

        let (width, height) = (width as usize, height as usize);
        match format.block_size() {
            Some(block_size) => width.div_ceil(4) * height.div_ceil(4) * block_size,
            None => (width * height * format.bits_per_pixel()).div_ceil(8),
        }
    }

    fn checked_size(format: PixelFormat, width: u32, height: u32, available: usize) -> Option<usize> {
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return None;
        }
        let size = Self::size_for(format, width, height);
        (size > 0 && available >= size).then_some(size)
    }

    /// Number of bytes this layer's data occupies
    pub fn data_size(&self) -> usize {
        Self::size_for(self.format, self.width, self.height)
    }

    pub fn is_valid(&self) -> bool {
        self.data.is_some()
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// True if this layer owns its buffer rather than borrowing it
    pub fn owns_data(&self) -> bool {
        matches!(self.data, Some(Cow::Owned(_)))
    }

    /// Convert into a layer that owns its data, copying it if it was borrowed
    pub fn into_owned(self) -> Layer<'static> {
        Layer {
            format: self.format,
            width: self.width,
            height: self.height,
            data: self.data.map(|d| Cow::Owned(d.into_owned())),
        }
    }

    /// Take the layer's buffer, copying it if it was borrowed
    pub fn into_vec(self) -> Option<Vec<u8>> {
        self.data.map(Cow::into_owned)
    }

    /// Write this layer as a `Layer` chunk holding a `LayerProperties` chunk followed by a
    /// `LayerData` chunk
    pub fn save<W: Write + Seek>(&self, writer: &mut W) -> BinResult<()> {
        let properties = LayerProperties {
            format: self.format,
            width: self.width,
            height: self.height,
        };

        write_chunk(writer, ChunkId::LAYER, |w| {
            write_chunk(w, ChunkId::LAYER_PROPERTIES, |w| properties.write(w))?;
            write_chunk(w, ChunkId::LAYER_DATA, |w| {
                Ok(w.write_all(self.data().unwrap_or_default())?)
            })
        })
    }

    /// Read a layer from a `Layer` chunk at the start of `bytes`. The layer's data borrows from
    /// `bytes`
    pub fn load_borrowed(bytes: &'a [u8]) -> BinResult<Self> {
        let chunk = match ChunkReader::new(bytes).next() {
            Some(chunk) => chunk?,
            None => return Err(not_a_layer(0, ChunkId([0; 4]))),
        };
        if chunk.id != ChunkId::LAYER {
            return Err(not_a_layer(0, chunk.id));
        }

        Self::from_sub_chunks(chunk.data)
    }

    /// Build a layer from the payload of a `Layer` chunk. A data chunk seen before any properties
    /// chunk is ignored, leaving the layer invalid
    fn from_sub_chunks(payload: &'a [u8]) -> BinResult<Self> {
        let mut properties: Option<LayerProperties> = None;
        let mut layer = Layer::default();

        for chunk in ChunkReader::new(payload) {
            let chunk = chunk?;
            match chunk.id {
                ChunkId::LAYER_PROPERTIES => {
                    properties = Some(LayerProperties::read(&mut Cursor::new(chunk.data))?);
                }
                ChunkId::LAYER_DATA => {
                    if let Some(p) = properties {
                        layer = Layer::borrowed(p.format, p.width, p.height, chunk.data);
                    }
                }
                _ => {}
            }
        }

        Ok(layer)
    }
}

fn not_a_layer(pos: u64, found: ChunkId) -> binrw::Error {
    binrw::Error::AssertFail {
        pos,
        message: format!("expected a {} chunk, found {found}", ChunkId::LAYER),
    }
}

impl PartialEq for Layer<'_> {
    /// Layers are equal if both are valid and hold identical format, dimensions and bytes.
    /// An invalid layer is not equal to anything, including itself.
    fn eq(&self, other: &Self) -> bool {
        match (self.data(), other.data()) {
            (Some(a), Some(b)) => {
                self.format == other.format
                    && self.width == other.width
                    && self.height == other.height
                    && a == b
            }
            _ => false,
        }
    }
}

impl Dimensioned for Layer<'_> {
    fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}
