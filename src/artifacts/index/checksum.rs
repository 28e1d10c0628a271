//! SHA-1 accumulating reader/writer for the index file
//!
//! Every byte read from or written to the index passes through here so the
//! trailing 20-byte checksum can be verified (reads) or produced (writes).

use crate::artifacts::index::CHECKSUM_SIZE;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{Read, Write};

pub struct Checksum<T> {
    inner: T,
    hasher: Sha1,
}

impl<T> Checksum<T> {
    pub fn new(inner: T) -> Self {
        Checksum {
            inner,
            hasher: Sha1::new(),
        }
    }
}

impl<T: Read> Checksum<T> {
    pub fn read(&mut self, size: usize) -> anyhow::Result<Bytes> {
        let mut buffer = vec![0u8; size];
        self.inner.read_exact(&mut buffer)?;
        self.hasher.update(&buffer);

        Ok(Bytes::from(buffer))
    }

    /// Read the trailing checksum and compare it against the accumulated
    /// hash of everything read so far.
    pub fn verify(mut self) -> anyhow::Result<()> {
        let mut stored = [0u8; CHECKSUM_SIZE];
        self.inner.read_exact(&mut stored)?;

        let computed = self.hasher.finalize();
        if stored != computed.as_slice() {
            anyhow::bail!("index checksum mismatch");
        }

        Ok(())
    }
}

impl<T: Write> Checksum<T> {
    pub fn write(&mut self, data: &[u8]) -> anyhow::Result<()> {
        self.inner.write_all(data)?;
        self.hasher.update(data);

        Ok(())
    }

    /// Append the accumulated hash; must be the last write.
    pub fn write_checksum(mut self) -> anyhow::Result<()> {
        let digest = self.hasher.finalize();
        self.inner.write_all(&digest)?;
        self.inner.flush()?;

        Ok(())
    }
}
