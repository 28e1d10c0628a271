//! Staging engine (`add`)
//!
//! Rebuilds the staged index from a two-source walk over the previous
//! index and the working tree, optionally restricted to a single path.
//! Content-addressed blob identity is preserved: a file is only re-hashed
//! when its size or timestamps no longer match the staged entry.
//!
//! Symbolic links are never re-staged; a prior index entry for a symlink
//! is carried over verbatim and a new symlink on disk is left unstaged.
//! This is a portability compromise, kept deliberately.

use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::index_entry::{millis_match, IndexEntry};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::walk::{SourceEntry, TreeWalk};
use crate::errors::GitError;
use derive_new::new;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(new)]
pub struct IndexStager<'r> {
    repository: &'r Repository,
}

impl IndexStager<'_> {
    /// Rebuild the index for `to_add` (a file or directory inside the work
    /// tree). With `also_remove`, paths gone from the working tree are
    /// dropped from the index; otherwise their previous entries survive.
    pub fn stage(
        &self,
        index: &mut Index,
        to_add: &Path,
        also_remove: bool,
    ) -> anyhow::Result<()> {
        let work_dir = self.repository.workspace().path();

        let absolute = to_add.canonicalize().map_err(|err| {
            GitError::PreconditionFailed(format!(
                "path {} cannot be resolved: {}",
                to_add.display(),
                err
            ))
        })?;
        if !absolute.starts_with(work_dir) {
            return Err(GitError::PreconditionFailed(format!(
                "path {} is outside the repository {}",
                absolute.display(),
                work_dir.display()
            ))
            .into());
        }

        let filter = self.repo_relative_filter(&absolute)?;

        let mut builder: BTreeMap<PathBuf, IndexEntry> = BTreeMap::new();

        // entries outside a single-path filter pass through unchanged
        if let Some(prefix) = &filter {
            for entry in index.entries() {
                if !(entry.name == *prefix || entry.name.starts_with(prefix)) {
                    builder.insert(entry.name.clone(), entry.clone());
                }
            }
        }

        let walk = TreeWalk::new()
            .set_filter(filter)
            .add_index(index)
            .add_work_tree(self.repository.workspace())?;

        for record in walk.records() {
            let previous = index.entry_by_path(&record.path);
            let work = record.slot(1);

            // ignore rules only guard paths new to the index
            if previous.is_none()
                && self
                    .repository
                    .ignores()
                    .is_ignored(&work_dir.join(&record.path))?
            {
                continue;
            }

            let work = match work {
                // gone from the working tree: drop on request, else keep
                None => {
                    if !also_remove
                        && let Some(previous) = previous
                    {
                        builder.insert(record.path.clone(), previous.clone());
                    }
                    continue;
                }
                Some(work) => work,
            };

            // symlinks are never re-staged
            if work.mode == EntryMode::Symlink
                || previous.is_some_and(|entry| entry.metadata.mode == EntryMode::Symlink)
            {
                if let Some(previous) = previous {
                    builder.insert(record.path.clone(), previous.clone());
                }
                continue;
            }

            let mut entry = match previous {
                Some(previous) => previous.clone(),
                None => IndexEntry::new(record.path.clone(), ObjectId::default(), Default::default()),
            };

            self.refresh_content(&mut entry, &record.path, work)?;
            builder.insert(record.path.clone(), entry);
        }

        index.replace_entries(builder.into_values());
        index.write_updates()
    }

    /// Refresh an entry against its work-tree counterpart: re-hash on stat
    /// mismatch, keep the prior blob id otherwise. The mode always follows
    /// the work tree.
    fn refresh_content(
        &self,
        entry: &mut IndexEntry,
        path: &Path,
        work: &SourceEntry,
    ) -> anyhow::Result<()> {
        if work.mode == EntryMode::Gitlink {
            entry.metadata.size = 0;
            entry.metadata.mtime = 0;
            entry.metadata.mtime_nsec = 0;
            if let Some(oid) = &work.oid {
                entry.oid = oid.clone();
            }
            entry.metadata.mode = EntryMode::Gitlink;
            return Ok(());
        }

        let stale = entry.metadata.size != work.size
            || !millis_match(entry.metadata.mtime_millis(), work.mtime_ms);

        if stale {
            let blob = self.repository.workspace().parse_blob(path)?;
            entry.oid = self.repository.database().store(&blob)?;
            entry.metadata = self.repository.workspace().stat_file(path)?;
        }

        entry.metadata.mode = work.mode;

        Ok(())
    }

    /// The repository-relative form of the staging root; `None` means the
    /// whole work tree. Backslashes are normalized to `/`.
    fn repo_relative_filter(&self, absolute: &Path) -> anyhow::Result<Option<PathBuf>> {
        let work_dir = self.repository.workspace().path();
        let relative = absolute
            .strip_prefix(work_dir)
            .expect("path was verified to be inside the work tree");

        if relative.as_os_str().is_empty() {
            return Ok(None);
        }

        let normalized = relative
            .to_str()
            .ok_or_else(|| {
                GitError::PreconditionFailed(format!(
                    "path {} is not valid UTF-8",
                    relative.display()
                ))
            })?
            .replace('\\', "/");

        Ok(Some(PathBuf::from(normalized)))
    }
}
