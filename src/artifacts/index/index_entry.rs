//! Index entry representation
//!
//! Each entry records a tracked path with its content hash and the stat
//! metadata (mode, size, timestamps) used for fast change detection: when
//! size and timestamps still match, the blob does not have to be re-hashed.

use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use byteorder::{ByteOrder, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use is_executable::IsExecutable;
use std::cmp::min;
use std::fs::Metadata;
use std::io::{BufRead, Write};
use std::os::unix::prelude::MetadataExt;
use std::path::{Path, PathBuf};

/// Maximum path length representable in the flags field
const MAX_PATH_SIZE: usize = 4095;

/// Assume-valid bit in the flags field
const ASSUME_VALID_FLAG: u32 = 0x8000;

/// Block size for entry alignment (8 bytes)
pub const ENTRY_BLOCK: usize = 8;

/// Minimum size of a serialized entry in bytes
pub const ENTRY_MIN_SIZE: usize = 64;

/// One tracked path in the staged index.
#[derive(Debug, Clone, Default, new)]
pub struct IndexEntry {
    /// Path relative to the repository root
    pub name: PathBuf,
    /// SHA-1 of the staged blob
    pub oid: ObjectId,
    /// Stat metadata captured when the entry was staged
    pub metadata: EntryMetadata,
}

impl IndexEntry {
    pub fn basename(&self) -> anyhow::Result<&str> {
        self.name
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow::anyhow!("invalid entry file name"))
    }

    /// All ancestor directories of the entry, outermost first.
    pub fn parent_dirs(&self) -> Vec<&Path> {
        let mut dirs = Vec::new();
        let mut parent = self.name.parent();

        while let Some(new_parent) = parent {
            dirs.push(new_parent);
            parent = new_parent.parent();
        }
        dirs.reverse();

        // drop the empty root component
        dirs[1..].to_vec()
    }

    /// Marked assume-valid: the entry is trusted without stat comparison.
    pub fn assume_valid(&self) -> bool {
        self.metadata.flags & ASSUME_VALID_FLAG != 0
    }

    /// Size-and-mode comparison against a fresh stat.
    pub fn stat_match(&self, other: &EntryMetadata) -> bool {
        (self.metadata.size == 0 || self.metadata.size == other.size)
            && self.metadata.mode == other.mode
    }

    /// Timestamp comparison with coarse-resolution fallback: whenever either
    /// recorded millisecond value is evenly divisible by 1000 the filesystem
    /// is assumed to have second resolution and sub-second bits are ignored.
    pub fn timestamp_matches(&self, other: &EntryMetadata) -> bool {
        millis_match(self.metadata.mtime_millis(), other.mtime_millis())
    }
}

pub fn millis_match(a: u64, b: u64) -> bool {
    if a % 1000 == 0 || b % 1000 == 0 {
        a / 1000 == b / 1000
    } else {
        a == b
    }
}

impl PartialEq for IndexEntry {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for IndexEntry {}

impl PartialOrd for IndexEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IndexEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.name.cmp(&other.name)
    }
}

/// Stat metadata stored per entry.
///
/// `ctime` is the inode change time, `mtime` the content modification
/// time; both carry nanosecond parts in separate fields, as on disk.
#[derive(Debug, Clone, Default)]
pub struct EntryMetadata {
    pub ctime: i64,
    pub ctime_nsec: i64,
    pub mtime: i64,
    pub mtime_nsec: i64,
    pub dev: u64,
    pub ino: u64,
    pub mode: EntryMode,
    pub uid: u32,
    pub gid: u32,
    pub size: u64,
    pub flags: u32,
}

impl EntryMetadata {
    /// Modification time in milliseconds since the epoch.
    pub fn mtime_millis(&self) -> u64 {
        self.mtime as u64 * 1000 + self.mtime_nsec as u64 / 1_000_000
    }

    /// Recompute the flags field for the name actually stored in the
    /// entry, which is the repository-relative path.
    pub fn with_name_length(mut self, name: &Path) -> Self {
        self.flags = min(name.as_os_str().len(), MAX_PATH_SIZE) as u32;
        self
    }
}

impl Packable for IndexEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let entry_name = self
            .name
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("invalid entry name"))?;

        let mut entry_bytes = Vec::new();
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.ctime as u32)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.ctime_nsec as u32)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.mtime as u32)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.mtime_nsec as u32)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.dev as u32)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.ino as u32)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.mode.as_u32())?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.uid)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.gid)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.size as u32)?;
        self.oid.write_raw_to(&mut entry_bytes)?;
        entry_bytes.write_u16::<byteorder::NetworkEndian>(self.metadata.flags as u16)?;
        entry_bytes.write_all(entry_name.as_bytes())?;

        // pad with NULs to 8-byte alignment, at least one
        entry_bytes.push(0);
        while entry_bytes.len() % ENTRY_BLOCK != 0 {
            entry_bytes.push(0);
        }

        Ok(Bytes::from(entry_bytes))
    }
}

impl Unpackable for IndexEntry {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let bytes = reader.bytes().collect::<Result<Vec<u8>, std::io::Error>>()?;

        if bytes.len() < ENTRY_MIN_SIZE {
            anyhow::bail!("index entry too short: {} bytes", bytes.len());
        }

        let ctime = byteorder::NetworkEndian::read_u32(&bytes[0..4]) as i64;
        let ctime_nsec = byteorder::NetworkEndian::read_u32(&bytes[4..8]) as i64;
        let mtime = byteorder::NetworkEndian::read_u32(&bytes[8..12]) as i64;
        let mtime_nsec = byteorder::NetworkEndian::read_u32(&bytes[12..16]) as i64;
        let dev = byteorder::NetworkEndian::read_u32(&bytes[16..20]) as u64;
        let ino = byteorder::NetworkEndian::read_u32(&bytes[20..24]) as u64;
        let mode: EntryMode = byteorder::NetworkEndian::read_u32(&bytes[24..28]).into();
        let uid = byteorder::NetworkEndian::read_u32(&bytes[28..32]);
        let gid = byteorder::NetworkEndian::read_u32(&bytes[32..36]);
        let size = byteorder::NetworkEndian::read_u32(&bytes[36..40]) as u64;
        let mut oid_bytes = std::io::Cursor::new(&bytes[40..60]);
        let oid = ObjectId::read_raw_from(&mut oid_bytes)?;
        let flags = byteorder::NetworkEndian::read_u16(&bytes[60..62]) as u32;

        // the entry name is NUL-terminated
        let name_end = bytes[62..]
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| anyhow::anyhow!("missing NUL terminator in entry name"))?;
        let name_bytes = &bytes[62..62 + name_end];
        let name = PathBuf::from(
            std::str::from_utf8(name_bytes)
                .map_err(|_| anyhow::anyhow!("invalid UTF-8 in entry name"))?,
        );

        Ok(IndexEntry {
            name,
            oid,
            metadata: EntryMetadata {
                ctime,
                ctime_nsec,
                mtime,
                mtime_nsec,
                dev,
                ino,
                mode,
                uid,
                gid,
                size,
                flags,
            },
        })
    }
}

impl TryFrom<(&Path, Metadata)> for EntryMetadata {
    type Error = anyhow::Error;

    fn try_from((file_path, metadata): (&Path, Metadata)) -> Result<Self, Self::Error> {
        let mode = if metadata.is_dir() {
            EntryMode::Tree
        } else if metadata.file_type().is_symlink() {
            EntryMode::Symlink
        } else if file_path.is_executable() {
            EntryMode::Executable
        } else {
            EntryMode::Regular
        };
        let file_path = file_path
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("invalid file path"))?;

        Ok(Self {
            ctime: metadata.ctime(),
            ctime_nsec: metadata.ctime_nsec(),
            mtime: metadata.mtime(),
            mtime_nsec: metadata.mtime_nsec(),
            dev: metadata.dev(),
            ino: metadata.ino(),
            mode,
            uid: metadata.uid(),
            gid: metadata.gid(),
            size: metadata.size(),
            flags: min(file_path.len(), MAX_PATH_SIZE) as u32,
        })
    }
}
