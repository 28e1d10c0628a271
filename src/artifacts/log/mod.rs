//! History queries (`rev-list`, `whatchanged`)
//!
//! Range-constrained commit enumeration on top of `RevWalk`: an optional
//! exclusive lower bound, an optional start (HEAD by default), an optional
//! commit-date window and a line limit.

pub mod change_entry;
pub mod rev_walk;

use crate::areas::repository::Repository;
use crate::artifacts::log::change_entry::ChangeEntry;
use crate::artifacts::log::rev_walk::{RevSort, RevWalk};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitError;
use derive_new::new;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Query bounds shared by `rev_list` and `whatchanged`.
#[derive(Debug, Clone, Default)]
pub struct HistoryBounds {
    /// Exclusive lower bound: this commit and its ancestors are skipped
    pub from_rev: Option<String>,
    /// Start of the enumeration; HEAD when absent
    pub to_rev: Option<String>,
    /// Keep only commits committed at or after this instant
    pub from_date: Option<chrono::DateTime<chrono::FixedOffset>>,
    /// Keep only commits committed at or before this instant
    pub to_date: Option<chrono::DateTime<chrono::FixedOffset>>,
}

#[derive(new)]
pub struct HistoryQuery<'r> {
    repository: &'r Repository,
}

impl HistoryQuery<'_> {
    fn prepared_walk(
        &self,
        sorts: Option<Vec<RevSort>>,
        bounds: &HistoryBounds,
    ) -> anyhow::Result<RevWalk<'_>> {
        let mut walk = RevWalk::new(self.repository.database());

        for order in sorts.unwrap_or_else(|| vec![RevSort::Topo, RevSort::CommitTimeDesc]) {
            walk.sort(order);
        }

        if let Some(from_rev) = &bounds.from_rev {
            let oid = self
                .repository
                .resolve(from_rev)?
                .ok_or_else(|| GitError::RefNotResolvable(from_rev.clone()))?;
            walk.mark_uninteresting(oid);
        }

        let start = match &bounds.to_rev {
            Some(to_rev) => self
                .repository
                .resolve(to_rev)?
                .ok_or_else(|| GitError::RefNotResolvable(to_rev.clone()))?,
            None => self
                .repository
                .refs()
                .read_head()?
                .ok_or_else(|| GitError::RefNotResolvable("HEAD".to_string()))?,
        };
        walk.mark_start(start);

        Ok(walk)
    }

    fn within_window(&self, commit: &Commit, bounds: &HistoryBounds) -> bool {
        let committed = commit.timestamp();

        if let Some(from_date) = bounds.from_date
            && committed < from_date
        {
            return false;
        }
        if let Some(to_date) = bounds.to_date
            && committed > to_date
        {
            return false;
        }

        true
    }

    /// Enumerate commit ids. `max_lines == -1` means unbounded.
    pub fn rev_list(
        &self,
        sorts: Option<Vec<RevSort>>,
        bounds: &HistoryBounds,
        max_lines: i64,
    ) -> anyhow::Result<Vec<ObjectId>> {
        let walk = self.prepared_walk(sorts, bounds)?;

        let mut oids = Vec::new();
        for (oid, commit) in walk.walk()? {
            if max_lines >= 0 && oids.len() as i64 >= max_lines {
                break;
            }
            if self.within_window(&commit, bounds) {
                oids.push(oid);
            }
        }

        Ok(oids)
    }

    /// Enumerate commits projected into `ChangeEntry`, including the files
    /// each commit changed relative to its first parent.
    pub fn whatchanged(
        &self,
        sorts: Option<Vec<RevSort>>,
        bounds: &HistoryBounds,
        max_lines: i64,
    ) -> anyhow::Result<Vec<ChangeEntry>> {
        let walk = self.prepared_walk(sorts, bounds)?;

        let mut changes = Vec::new();
        for (oid, commit) in walk.walk()? {
            if max_lines >= 0 && changes.len() as i64 >= max_lines {
                break;
            }
            if !self.within_window(&commit, bounds) {
                continue;
            }

            let files = self.changed_files(&commit)?;
            changes.push(ChangeEntry::from_commit(oid, &commit, Some(files)));
        }

        Ok(changes)
    }

    /// Leaf paths whose blob differs between the commit's tree and its
    /// first parent's tree (all paths for a root commit).
    fn changed_files(&self, commit: &Commit) -> anyhow::Result<Vec<PathBuf>> {
        let database = self.repository.database();

        let mut new_tree = BTreeMap::new();
        database.flatten_tree(commit.tree_oid(), None, &mut new_tree)?;

        let mut old_tree = BTreeMap::new();
        if let Some(parent_oid) = commit.first_parent() {
            let parent = database
                .parse_object_as_commit(parent_oid)?
                .ok_or_else(|| GitError::CorruptObject(parent_oid.clone()))?;
            database.flatten_tree(parent.tree_oid(), None, &mut old_tree)?;
        }

        let mut files = Vec::new();
        for (path, record) in &new_tree {
            match old_tree.get(path) {
                Some(old) if old.oid == record.oid && old.mode == record.mode => {}
                _ => files.push(path.clone()),
            }
        }
        for path in old_tree.keys() {
            if !new_tree.contains_key(path) {
                files.push(path.clone());
            }
        }
        files.sort();

        Ok(files)
    }
}
