use crate::artifacts::index::{SIGNATURE, VERSION};
use byteorder::{ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::{Read, Write};

/// Fixed-size header at the start of the index file.
#[derive(Debug, Clone, new)]
pub struct IndexHeader {
    pub marker: String,
    pub version: u32,
    pub entries_count: u32,
}

impl IndexHeader {
    pub fn empty() -> Self {
        IndexHeader::new(String::from(SIGNATURE), VERSION, 0)
    }

    pub fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut header_bytes = Vec::new();
        header_bytes.write_all(self.marker.as_bytes())?;
        header_bytes.write_u32::<byteorder::NetworkEndian>(self.version)?;
        header_bytes.write_u32::<byteorder::NetworkEndian>(self.entries_count)?;

        Ok(Bytes::from(header_bytes))
    }

    pub fn deserialize(mut reader: impl Read) -> anyhow::Result<Self> {
        let mut marker_bytes = [0u8; 4];
        reader.read_exact(&mut marker_bytes)?;
        let marker = std::str::from_utf8(&marker_bytes)?.to_string();

        let version = reader.read_u32::<byteorder::NetworkEndian>()?;
        let entries_count = reader.read_u32::<byteorder::NetworkEndian>()?;

        Ok(IndexHeader::new(marker, version, entries_count))
    }
}
