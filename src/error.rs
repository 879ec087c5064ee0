// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use strum::IntoStaticStr;
use thiserror::Error;

/// Reasons a DDS file can fail to load. Every variant carries the display name of the file.
#[derive(Error, Debug, IntoStaticStr)]
pub enum DdsError {
    #[error("{0}: file does not exist")]
    FileNonexistent(String),

    #[error("{0}: file does not have a .dds extension")]
    IncorrectExtension(String),

    #[error("{0}: file is too small for its header or declared contents")]
    IncorrectFileSize(String),

    #[error("{0}: file does not start with the 'DDS ' magic")]
    Magic(String),

    #[error("{0}: header size is not 124")]
    IncorrectHeaderSize(String),

    #[error("{0}: header must declare exactly one of pitch or linear size")]
    PitchOrLinearSize(String),

    #[error("{0}: volume textures are not supported")]
    VolumeTexturesNotSupported(String),

    #[error("{0}: pixel format size is not 32")]
    IncorrectPixelFormatSize(String),

    #[error("{0}: pixel format must declare exactly one of RGB masks or a FourCC")]
    InconsistentPixelFormat(String),

    #[error("{0}: unsupported FourCC pixel format '{1}'")]
    UnsupportedFourCCPixelFormat(String, String),

    #[error("{0}: unsupported RGB pixel format ({1} bits, masks {2:08X?})")]
    UnsupportedRGBPixelFormat(String, u32, [u32; 4]),

    #[error("{0}: not enough block data for the declared dimensions and mip levels")]
    IncorrectDXTDataSize(String),

    #[error("{0}: block compressed textures must have dimensions divisible by 4")]
    UnsupportedDXTDimensions(String),

    #[error("{0}: only power of two dimensions are supported")]
    LoaderSupportsPowerOfTwoDimsOnly(String),

    #[error("{0}: too many mipmap levels")]
    MaxNumMipmapLevelsExceeded(String),

    #[error("{0}: floating point pixel formats are not supported")]
    UnsupportedFloatingPointPixelFormat(String),

    #[error("{0}: dimensions larger than 4096 are not supported")]
    MaxDimensionsExceeded(String),

    #[error("{name}: IO error: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl DdsError {
    /// Display name of the file that failed to load
    pub fn name(&self) -> &str {
        use DdsError::*;
        match self {
            FileNonexistent(name)
            | IncorrectExtension(name)
            | IncorrectFileSize(name)
            | Magic(name)
            | IncorrectHeaderSize(name)
            | PitchOrLinearSize(name)
            | VolumeTexturesNotSupported(name)
            | IncorrectPixelFormatSize(name)
            | InconsistentPixelFormat(name)
            | UnsupportedFourCCPixelFormat(name, _)
            | UnsupportedRGBPixelFormat(name, ..)
            | IncorrectDXTDataSize(name)
            | UnsupportedDXTDimensions(name)
            | LoaderSupportsPowerOfTwoDimsOnly(name)
            | MaxNumMipmapLevelsExceeded(name)
            | UnsupportedFloatingPointPixelFormat(name)
            | MaxDimensionsExceeded(name)
            | Io { name, .. } => name,
        }
    }

    /// Name of the error variant, for logging
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

pub type DdsResult<T> = Result<T, DdsError>;
