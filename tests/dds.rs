// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use enumflags2::BitFlags;
use tempfile::tempdir;

use ddsload::shape::CubeFace;
use ddsload::*;

const FLAGS_REQUIRED: u32 = 0x1 | 0x2 | 0x4 | 0x1000;
const FLAG_PITCH: u32 = 0x8;
const FLAG_MIPMAP_COUNT: u32 = 0x20000;
const FLAG_LINEAR_SIZE: u32 = 0x80000;
const CAPS_COMPLEX: u32 = 0x8;
const CAPS_TEXTURE: u32 = 0x1000;
const CAPS_MIPMAP: u32 = 0x400000;
const CAPS2_ALL_FACES: u32 = 0x200 | 0xFC00;
const PF_FOURCC: u32 = 0x4;
const PF_RGB: u32 = 0x40;

/// Hand-assembled DDS header, written field by field
struct Header {
    flags: u32,
    width: u32,
    height: u32,
    mips: u32,
    pf_flags: u32,
    four_cc: [u8; 4],
    bits: u32,
    masks: [u32; 4],
    caps1: u32,
    caps2: u32,
}

impl Header {
    fn dxt(four_cc: &[u8; 4], width: u32, height: u32, mips: u32) -> Self {
        let (mip_flag, mip_caps) = match mips {
            0 | 1 => (0, 0),
            _ => (FLAG_MIPMAP_COUNT, CAPS_COMPLEX | CAPS_MIPMAP),
        };
        Self {
            flags: FLAGS_REQUIRED | FLAG_LINEAR_SIZE | mip_flag,
            width,
            height,
            mips,
            pf_flags: PF_FOURCC,
            four_cc: *four_cc,
            bits: 0,
            masks: [0; 4],
            caps1: CAPS_TEXTURE | mip_caps,
            caps2: 0,
        }
    }

    fn rgb(width: u32, height: u32) -> Self {
        Self {
            flags: FLAGS_REQUIRED | FLAG_PITCH,
            width,
            height,
            mips: 1,
            pf_flags: PF_RGB,
            four_cc: [0; 4],
            bits: 24,
            masks: [0xFF0000, 0xFF00, 0xFF, 0],
            caps1: CAPS_TEXTURE,
            caps2: 0,
        }
    }

    fn to_bytes(&self, payload: &[u8]) -> Vec<u8> {
        let mut out = b"DDS ".to_vec();
        let mut put = |v: u32| out.extend_from_slice(&v.to_le_bytes());

        put(124);
        put(self.flags);
        put(self.height);
        put(self.width);
        put(0); // pitch or linear size
        put(0); // depth
        put(self.mips);
        (0..11).for_each(|_| put(0));

        put(32);
        put(self.pf_flags);
        put(u32::from_le_bytes(self.four_cc));
        put(self.bits);
        self.masks.iter().for_each(|m| put(*m));

        put(self.caps1);
        put(self.caps2);
        put(0);
        put(0);
        put(0);

        out.extend_from_slice(payload);
        out
    }
}

fn write(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let path = dir.join(file_name);
    fs::write(&path, bytes)?;
    Ok(path)
}

fn opaque_bc1(blocks: usize) -> Vec<u8> {
    [0x00, 0xF8, 0x1F, 0x00, 0xFF, 0xFF, 0xFF, 0xFF].repeat(blocks)
}

#[test]
fn load_bc1_from_disk() -> Result<()> {
    let dir = tempdir()?;
    let path = write(dir.path(), "opaque.dds", &Header::dxt(b"DXT1", 64, 64, 1).to_bytes(&opaque_bc1(256)))?;

    let image = DdsImage::load(&path)?;
    assert_eq!(image.pixel_format(), PixelFormat::BC1DXT1);
    assert_eq!((image.width(), image.height()), (64, 64));
    assert_eq!(image.num_images(), 1);
    assert_eq!(image.num_mipmap_layers(), 1);
    assert_eq!(image.name(), path.display().to_string());

    let layers = image.into_layers().map_err(|_| anyhow::anyhow!("not a flat texture"))?;
    assert_eq!(layers[0].data_size(), 2048);
    Ok(())
}

#[test]
fn load_binary_alpha_from_disk() -> Result<()> {
    let dir = tempdir()?;
    let mut payload = opaque_bc1(256);
    // swap the endpoints of one block into 3-colour mode; its codes are all 3
    payload[8..12].copy_from_slice(&[0x1F, 0x00, 0x00, 0xF8]);
    let path = write(dir.path(), "alpha.DDS", &Header::dxt(b"DXT1", 64, 64, 1).to_bytes(&payload))?;

    assert_eq!(DdsImage::load(&path)?.pixel_format(), PixelFormat::BC1DXT1BA);
    Ok(())
}

#[test]
fn missing_file() {
    let dir = tempdir().unwrap();
    let err = DdsImage::load(dir.path().join("missing.dds")).unwrap_err();
    assert!(matches!(err, DdsError::FileNonexistent(_)));
    assert_eq!(err.kind(), "FileNonexistent");
}

#[test]
fn wrong_extension() -> Result<()> {
    let dir = tempdir()?;
    let path = write(dir.path(), "texture.png", &Header::dxt(b"DXT1", 4, 4, 1).to_bytes(&opaque_bc1(1)))?;

    let err = DdsImage::load(&path).unwrap_err();
    assert!(matches!(err, DdsError::IncorrectExtension(_)));
    assert!(err.to_string().contains("texture.png"));
    Ok(())
}

#[test]
fn reload_replaces_and_clears() -> Result<()> {
    let dir = tempdir()?;
    let rgb = write(dir.path(), "rgb.dds", &Header::rgb(2, 2).to_bytes(&[7; 12]))?;
    let dxt = write(dir.path(), "mips.dds", &Header::dxt(b"DXT5", 8, 8, 4).to_bytes(&[0; 112]))?;
    let broken = write(dir.path(), "broken.dds", b"DDS ")?;

    let mut image = DdsImage::load(&rgb)?;
    assert_eq!(image.pixel_format(), PixelFormat::B8G8R8);

    image.reload(&dxt, BitFlags::default())?;
    assert_eq!(image.pixel_format(), PixelFormat::BC3DXT5);
    assert_eq!(image.num_mipmap_layers(), 4);

    let err = image.reload(&broken, BitFlags::default()).unwrap_err();
    assert!(matches!(err, DdsError::IncorrectFileSize(_)));
    assert!(!image.is_valid());
    assert_eq!(image.num_mipmap_layers(), 0);
    Ok(())
}

#[test]
fn cubemap_from_disk() -> Result<()> {
    let dir = tempdir()?;
    let mut header = Header::dxt(b"DXT1", 8, 8, 2);
    header.caps1 |= CAPS_COMPLEX;
    header.caps2 = CAPS2_ALL_FACES;

    // each face is 4 top blocks and 1 block for the second level, tagged by its first byte
    let payload: Vec<u8> = (0..6u8)
        .flat_map(|face| {
            let mut blocks = opaque_bc1(5);
            blocks[0] = face;
            blocks
        })
        .collect();
    let path = write(dir.path(), "cube.dds", &header.to_bytes(&payload))?;

    let mut image = DdsImage::load_with_flags(&path, LoadFlags::DetectBinaryAlpha.into())?;
    assert!(image.is_cubemap());
    assert_eq!(image.num_images(), 6);
    assert_eq!(image.num_mipmap_layers(), 2);

    let faces = image.take_cubemap_faces(CubeFace::NegativeY | CubeFace::PositiveY);
    assert_eq!(faces.len(), 2);
    for (face, chain) in &faces {
        assert_eq!(chain[0].data().unwrap()[0], face.index() as u8, "{face}");
        assert_eq!((chain[1].width(), chain[1].height()), (4, 4));
    }
    assert!(!image.is_valid());
    Ok(())
}

#[test]
fn layers_survive_persistence() -> Result<()> {
    let bytes = Header::dxt(b"DXT1", 8, 8, 1).to_bytes(&opaque_bc1(4));
    let image = DdsImage::from_bytes(&bytes, "memory", BitFlags::default())?;
    let layer = image.layer(0, 0).unwrap();

    let dir = tempdir()?;
    let path = dir.path().join("layer.bin");
    let mut file = fs::File::create(&path)?;
    layer.save(&mut file)?;
    drop(file);

    let mut file = fs::File::open(&path)?;
    let loaded = Layer::load(&mut file)?;
    assert_eq!(&loaded, layer);
    Ok(())
}
