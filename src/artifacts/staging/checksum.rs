use crate::artifacts::staging::CHECKSUM_SIZE;
use crate::errors::RepositoryError;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{Cursor, Read, Write};

/// Reader/writer that folds every byte it moves into a running SHA-1
#[derive(Debug)]
pub struct Checksum<T> {
    inner: T,
    digest: Sha1,
}

impl<T> Checksum<T> {
    pub fn new(inner: T) -> Self {
        Checksum {
            inner,
            digest: Sha1::new(),
        }
    }
}

impl Checksum<Cursor<Bytes>> {
    pub fn read(&mut self, size: usize) -> anyhow::Result<Bytes> {
        let mut buffer = vec![0; size];
        self.inner.read_exact(&mut buffer).map_err(|_| {
            RepositoryError::CorruptObject(
                "unexpected end-of-file while reading staging area".to_string(),
            )
        })?;

        self.digest.update(&buffer);
        Ok(Bytes::from(buffer))
    }

    pub fn verify(&mut self) -> anyhow::Result<()> {
        let mut expected_checksum = [0u8; CHECKSUM_SIZE];
        self.inner.read_exact(&mut expected_checksum).map_err(|_| {
            RepositoryError::CorruptObject("staging area checksum is missing".to_string())
        })?;

        let actual_checksum = self.digest.clone().finalize();

        if expected_checksum != actual_checksum.as_slice() {
            return Err(RepositoryError::CorruptObject(
                "staging area checksum does not match value stored on disk".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

impl Checksum<Vec<u8>> {
    pub fn write(&mut self, data: &[u8]) -> anyhow::Result<()> {
        self.inner.write_all(data)?;
        self.digest.update(data);
        Ok(())
    }

    pub fn write_checksum(mut self) -> anyhow::Result<Bytes> {
        let checksum = self.digest.clone().finalize();
        self.inner.write_all(checksum.as_slice())?;

        Ok(Bytes::from(self.inner))
    }
}
