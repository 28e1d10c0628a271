//! Unified file listing (`ls-files`)
//!
//! An ordered merge-join of the staged index and an ignore-honouring
//! filesystem scan: paths in both are CACHED, index-only paths are
//! REMOVED, disk-only paths are OTHER. The remaining statuses exist for
//! callers that track merge and checkout conflicts.

use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LsFileStatus {
    /// Cached in the index
    Cached,
    /// Unmerged after a conflict
    Unmerged,
    /// Removed from the working directory
    Removed,
    /// Changed in the working directory
    Changed,
    /// Must be deleted for a checkout to succeed
    Killed,
    /// Anything else, including untracked files
    Other,
}

impl LsFileStatus {
    pub fn tag(&self) -> char {
        match self {
            LsFileStatus::Cached => 'H',
            LsFileStatus::Unmerged => 'M',
            LsFileStatus::Removed => 'R',
            LsFileStatus::Changed => 'C',
            LsFileStatus::Killed => 'K',
            LsFileStatus::Other => '?',
        }
    }
}

/// One line of the listing.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct LsFileEntry {
    pub path: PathBuf,
    pub status: LsFileStatus,
    pub oid: Option<ObjectId>,
}

#[derive(new)]
pub struct LsFilesMerge<'r> {
    repository: &'r Repository,
}

impl LsFilesMerge<'_> {
    /// Merge the staged index with the filesystem scan. The output is
    /// totally ordered by path.
    pub fn merge(&self, index: &Index) -> anyhow::Result<Vec<LsFileEntry>> {
        let workspace = self.repository.workspace();

        let mut on_disk = std::collections::BTreeSet::new();
        for (path, _) in workspace.scan(None)? {
            if !self.repository.ignores().is_ignored(&workspace.path().join(&path))? {
                on_disk.insert(path);
            }
        }

        let mut entries = Vec::new();

        for staged in index.entries() {
            if on_disk.remove(&staged.name) {
                entries.push(LsFileEntry::new(
                    staged.name.clone(),
                    LsFileStatus::Cached,
                    Some(staged.oid.clone()),
                ));
            } else {
                entries.push(LsFileEntry::new(
                    staged.name.clone(),
                    LsFileStatus::Removed,
                    None,
                ));
            }
        }

        for path in on_disk {
            entries.push(LsFileEntry::new(path, LsFileStatus::Other, None));
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(entries)
    }
}
