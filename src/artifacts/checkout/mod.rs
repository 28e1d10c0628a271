//! Work-dir checkout
//!
//! Materializes a committed tree into the working directory and rebuilds
//! the staged index to mirror it, so a following `status` reports a clean
//! tree. Used by `clone` and `checkout`.

use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitError;
use derive_new::new;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(new)]
pub struct WorkDirCheckout<'r> {
    repository: &'r Repository,
    tree_oid: ObjectId,
}

impl WorkDirCheckout<'_> {
    /// Write every blob of the tree into the workspace and stage the
    /// result; tracked paths with no counterpart in the target tree leave
    /// the working directory. The caller persists the index afterwards.
    pub fn checkout(&self, index: &mut Index) -> anyhow::Result<()> {
        let database = self.repository.database();
        let workspace = self.repository.workspace();

        let mut flattened = BTreeMap::new();
        database.flatten_tree(&self.tree_oid, None, &mut flattened)?;

        // reconcile the work tree: whatever was staged before and is not
        // in the target tree goes away
        let stale = index
            .entries()
            .map(|entry| entry.name.clone())
            .filter(|path| !flattened.contains_key(path))
            .collect::<Vec<PathBuf>>();
        for path in &stale {
            workspace.remove_file(path)?;
        }

        let mut entries = Vec::with_capacity(flattened.len());

        for (path, record) in flattened {
            // gitlinks have no content to materialize
            if record.mode == EntryMode::Gitlink {
                continue;
            }

            let blob = database
                .parse_object_as_blob(&record.oid)?
                .ok_or_else(|| GitError::CorruptObject(record.oid.clone()))?;

            workspace.write_file(&path, blob.data(), record.mode)?;

            let mut metadata = workspace.stat_file(&path)?;
            metadata.mode = record.mode;
            entries.push(IndexEntry::new(path, record.oid, metadata));
        }

        index.replace_entries(entries);

        Ok(())
    }
}
