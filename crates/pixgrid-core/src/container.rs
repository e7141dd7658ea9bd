//! Container assembly.
//!
//! A [`Container`] is the ordered list of chunks that make up a PNG file:
//! `IHDR`, then `PLTE` and `tRNS` when the payload carries them, the `IDAT`
//! pixel data, and the fixed `IEND` trailer. Serialization adds the file
//! signature and the per-chunk length and CRC-32.

use std::io::{self, Write};

use flate2::Crc;

use crate::encode::EncodedPayload;

/// File signature written before the first chunk.
pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

pub const HEADER: [u8; 4] = *b"IHDR";
pub const PALETTE: [u8; 4] = *b"PLTE";
pub const TRANSPARENCY: [u8; 4] = *b"tRNS";
pub const DATA: [u8; 4] = *b"IDAT";
pub const END: [u8; 4] = *b"IEND";

/// Largest data length a single chunk may declare.
pub const MAX_CHUNK_LEN: usize = i32::MAX as usize;

/// One typed block of a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub kind: [u8; 4],
    pub data: Vec<u8>,
}

impl Chunk {
    pub fn new(kind: [u8; 4], data: Vec<u8>) -> Self {
        Self { kind, data }
    }

    /// The empty end marker.
    pub fn end() -> Self {
        Self::new(END, Vec::new())
    }

    /// CRC-32 over the chunk type and data.
    pub fn crc(&self) -> u32 {
        let mut crc = Crc::new();
        crc.update(&self.kind);
        crc.update(&self.data);
        crc.sum()
    }

    /// Chunk type as text, e.g. `"IHDR"`.
    pub fn kind_str(&self) -> &str {
        std::str::from_utf8(&self.kind).unwrap_or("????")
    }

    /// Bytes this chunk occupies once framed: length, type, data and CRC.
    pub fn framed_len(&self) -> usize {
        self.data.len() + 12
    }

    fn append_to(&self, out: &mut Vec<u8>) {
        log::trace!("writing {} chunk ({} bytes)", self.kind_str(), self.data.len());
        out.extend_from_slice(&(self.data.len() as u32).to_be_bytes());
        out.extend_from_slice(&self.kind);
        out.extend_from_slice(&self.data);
        out.extend_from_slice(&self.crc().to_be_bytes());
    }
}

/// A container ready for serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    chunks: Vec<Chunk>,
}

impl Container {
    /// Frame an encoder payload and attach the end marker.
    ///
    /// Pixel data longer than [`MAX_CHUNK_LEN`] is spread over consecutive
    /// `IDAT` chunks.
    pub fn assemble(payload: EncodedPayload) -> Self {
        Self::assemble_split(payload, MAX_CHUNK_LEN)
    }

    fn assemble_split(payload: EncodedPayload, max_chunk_len: usize) -> Self {
        let mut chunks = Vec::with_capacity(5);
        chunks.push(Chunk::new(HEADER, payload.header.to_bytes().to_vec()));
        if let Some(palette) = payload.palette {
            chunks.push(Chunk::new(PALETTE, palette));
        }
        if let Some(transparency) = payload.transparency {
            chunks.push(Chunk::new(TRANSPARENCY, transparency));
        }
        if payload.data.len() <= max_chunk_len {
            chunks.push(Chunk::new(DATA, payload.data));
        } else {
            chunks.extend(
                payload
                    .data
                    .chunks(max_chunk_len)
                    .map(|part| Chunk::new(DATA, part.to_vec())),
            );
        }
        chunks.push(Chunk::end());
        Self { chunks }
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// First chunk of the given type.
    pub fn chunk(&self, kind: [u8; 4]) -> Option<&Chunk> {
        self.chunks.iter().find(|c| c.kind == kind)
    }

    /// Concatenated pixel data of every `IDAT` chunk.
    pub fn pixel_data(&self) -> Vec<u8> {
        self.chunks
            .iter()
            .filter(|c| c.kind == DATA)
            .flat_map(|c| c.data.iter().copied())
            .collect()
    }

    pub fn header(&self) -> Option<&Chunk> {
        self.chunks.first()
    }

    pub fn trailer(&self) -> Option<&Chunk> {
        self.chunks.last()
    }

    /// Serialize signature and chunks to `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_bytes())
    }

    /// Serialize to an owned byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let capacity = SIGNATURE.len() + self.chunks.iter().map(Chunk::framed_len).sum::<usize>();
        let mut bytes = Vec::with_capacity(capacity);
        bytes.extend_from_slice(&SIGNATURE);
        for chunk in &self.chunks {
            chunk.append_to(&mut bytes);
        }
        bytes
    }
}
