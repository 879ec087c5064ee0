// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A minimal named-chunk container.
//!
//! Every chunk is an 8 byte header (a four character id and a little-endian u32 payload size)
//! followed by the payload. Payloads may themselves be sequences of chunks.

use std::fmt::{Debug, Display, Formatter};
use std::io::{Cursor, ErrorKind, Seek, SeekFrom, Write};

use binrw::{binrw, BinRead, BinResult, BinWrite};

#[binrw]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkId(pub [u8; 4]);

impl ChunkId {
    pub const LAYER: ChunkId = ChunkId(*b"LAYR");
    pub const LAYER_PROPERTIES: ChunkId = ChunkId(*b"LPRP");
    pub const LAYER_DATA: ChunkId = ChunkId(*b"LDAT");
}

impl Display for ChunkId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl Debug for ChunkId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ChunkId({self})")
    }
}

#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub id: ChunkId,
    pub size: u32,
}

impl ChunkHeader {
    pub const SIZE: usize = 8;
}

/// A chunk borrowed from a byte slice
#[derive(Debug, Clone, Copy)]
pub struct Chunk<'a> {
    pub id: ChunkId,
    pub data: &'a [u8],
}

/// Write one chunk with id `id`. The payload is produced by `payload`, and the size field is
/// patched once it is known.
pub fn write_chunk<W, F>(writer: &mut W, id: ChunkId, payload: F) -> BinResult<()>
where
    W: Write + Seek,
    F: FnOnce(&mut W) -> BinResult<()>,
{
    let header_pos = writer.stream_position()?;
    ChunkHeader { id, size: 0 }.write(writer)?;

    let start = writer.stream_position()?;
    payload(writer)?;
    let end = writer.stream_position()?;

    let size = u32::try_from(end - start).map_err(|_| binrw::Error::AssertFail {
        pos: header_pos,
        message: format!("chunk {id} is larger than 4GiB"),
    })?;

    writer.seek(SeekFrom::Start(header_pos))?;
    ChunkHeader { id, size }.write(writer)?;
    writer.seek(SeekFrom::Start(end))?;
    Ok(())
}

/// Iterates over consecutive chunks in a byte slice without copying their payloads
pub struct ChunkReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ChunkReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn read_chunk(&mut self) -> BinResult<Chunk<'a>> {
        let header = ChunkHeader::read(&mut Cursor::new(&self.bytes[self.pos..]))?;
        let start = self.pos + ChunkHeader::SIZE;
        let end = start + header.size as usize;

        if end > self.bytes.len() {
            return Err(binrw::Error::Io(std::io::Error::new(
                ErrorKind::UnexpectedEof,
                format!("chunk {} runs past the end of its container", header.id),
            )));
        }

        self.pos = end;
        Ok(Chunk {
            id: header.id,
            data: &self.bytes[start..end],
        })
    }
}

impl<'a> Iterator for ChunkReader<'a> {
    type Item = BinResult<Chunk<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.bytes.len() {
            return None;
        }

        let chunk = self.read_chunk();
        if chunk.is_err() {
            // stop after the first malformed chunk
            self.pos = self.bytes.len();
        }
        Some(chunk)
    }
}
