use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::staging::HEADER_SIZE;
use anyhow::anyhow;
use byteorder::{NetworkEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct StagingHeader {
    pub marker: String,
    pub version: u32,
    pub added_count: u32,
    pub removed_count: u32,
}

impl Packable for StagingHeader {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.write_all(self.marker.as_bytes())?;
        bytes.write_u32::<NetworkEndian>(self.version)?;
        bytes.write_u32::<NetworkEndian>(self.added_count)?;
        bytes.write_u32::<NetworkEndian>(self.removed_count)?;

        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for StagingHeader {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut marker = [0u8; 4];
        reader
            .read_exact(&mut marker)
            .map_err(|_| anyhow!("Invalid staging header size"))?;

        let marker = String::from_utf8(marker.to_vec())
            .map_err(|_| anyhow!("Invalid marker in staging header"))?;
        let version = reader.read_u32::<NetworkEndian>()?;
        let added_count = reader.read_u32::<NetworkEndian>()?;
        let removed_count = reader.read_u32::<NetworkEndian>()?;

        Ok(StagingHeader {
            marker,
            version,
            added_count,
            removed_count,
        })
    }
}
