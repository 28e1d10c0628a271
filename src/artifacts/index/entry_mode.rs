//! File modes as recorded in trees and index entries
//!
//! Git only distinguishes a handful of modes; everything else about
//! permissions is deliberately not tracked.

/// Mode of a tracked path. `Missing` is the raw mode 0 used by tree walks
/// to signal that a source has no entry at the current path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum EntryMode {
    Missing,
    #[default]
    Regular,
    Executable,
    Symlink,
    Gitlink,
    Tree,
}

impl EntryMode {
    pub fn as_u32(&self) -> u32 {
        match self {
            EntryMode::Missing => 0,
            EntryMode::Regular => 0o100644,
            EntryMode::Executable => 0o100755,
            EntryMode::Symlink => 0o120000,
            EntryMode::Gitlink => 0o160000,
            EntryMode::Tree => 0o40000,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryMode::Missing => "000000",
            EntryMode::Regular => "100644",
            EntryMode::Executable => "100755",
            EntryMode::Symlink => "120000",
            EntryMode::Gitlink => "160000",
            EntryMode::Tree => "040000",
        }
    }

    pub fn from_octal_str(mode: &str) -> anyhow::Result<Self> {
        let raw = u32::from_str_radix(mode, 8)
            .map_err(|_| anyhow::anyhow!("invalid octal mode: {}", mode))?;
        Ok(Self::from(raw))
    }

    /// True for blob-carrying modes (regular and executable files).
    pub fn is_file(&self) -> bool {
        matches!(self, EntryMode::Regular | EntryMode::Executable)
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, EntryMode::Tree)
    }
}

impl From<u32> for EntryMode {
    fn from(raw: u32) -> Self {
        match raw {
            0 => EntryMode::Missing,
            0o100755 => EntryMode::Executable,
            0o120000 => EntryMode::Symlink,
            0o160000 => EntryMode::Gitlink,
            0o40000 => EntryMode::Tree,
            _ => EntryMode::Regular,
        }
    }
}
