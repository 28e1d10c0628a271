//! Status reconciliation engine
//!
//! A three-way walk over {working tree, staged index, HEAD tree} that
//! classifies each path into an (IndexStatus, RepoStatus) pair. Change
//! detection is stat-first: only when size or timestamps diverge is the
//! file re-hashed and compared by object id.

use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::index_entry::millis_match;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::status_entry::{IndexStatus, RepoStatus, StatusEntry};
use crate::artifacts::walk::{SourceEntry, TreeWalk, WalkRecord};
use crate::errors::GitError;
use derive_new::new;
use std::path::Path;

/// Outcome of classifying one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Emit(IndexStatus, RepoStatus),
    /// Gitlink rows are skipped; submodule content is not inspected.
    Skip,
    /// No table row applies.
    Fallthrough,
}

/// Classification table over the presence triple and the id-equality
/// relations. `wd_eq_idx` is only invoked on the rows that need content
/// identity, so callers can hash lazily.
pub fn classify<F>(
    in_wd: bool,
    in_idx: bool,
    in_repo: bool,
    wd_is_gitlink: bool,
    idx_eq_repo: bool,
    wd_eq_idx: F,
) -> anyhow::Result<Resolution>
where
    F: FnOnce() -> anyhow::Result<bool>,
{
    let resolution = match (in_wd, in_idx, in_repo) {
        (true, false, false) => Resolution::Emit(IndexStatus::Untracked, RepoStatus::Untracked),
        (true, true, false) => {
            if wd_is_gitlink {
                Resolution::Skip
            } else if !wd_eq_idx()? {
                Resolution::Emit(IndexStatus::Modified, RepoStatus::Untracked)
            } else {
                Resolution::Emit(IndexStatus::Added, RepoStatus::Untracked)
            }
        }
        (false, true, true) => {
            if idx_eq_repo {
                Resolution::Emit(IndexStatus::Deleted, RepoStatus::Unchanged)
            } else {
                Resolution::Emit(IndexStatus::Deleted, RepoStatus::Added)
            }
        }
        (true, true, true) => {
            if wd_is_gitlink {
                Resolution::Skip
            } else {
                match (wd_eq_idx()?, idx_eq_repo) {
                    (true, true) => Resolution::Emit(IndexStatus::Unchanged, RepoStatus::Unchanged),
                    (true, false) => Resolution::Emit(IndexStatus::Added, RepoStatus::Added),
                    (false, true) => Resolution::Emit(IndexStatus::Modified, RepoStatus::Unchanged),
                    (false, false) => Resolution::Emit(IndexStatus::Modified, RepoStatus::Added),
                }
            }
        }
        (false, true, false) => Resolution::Emit(IndexStatus::Deleted, RepoStatus::Untracked),
        (false, false, true) => Resolution::Emit(IndexStatus::Deleted, RepoStatus::Removed),
        (true, false, true) => Resolution::Emit(IndexStatus::Untracked, RepoStatus::Removed),
        (false, false, false) => Resolution::Fallthrough,
    };

    Ok(resolution)
}

#[derive(new)]
pub struct StatusReconciler<'r> {
    repository: &'r Repository,
}

impl StatusReconciler<'_> {
    /// Produce the ordered status list. `list_unchanged` additionally
    /// emits paths on which all three sources agree; `lenient` downgrades
    /// an unclassifiable record to a diagnostic instead of an error.
    pub fn reconcile(
        &self,
        index: &Index,
        list_unchanged: bool,
        lenient: bool,
    ) -> anyhow::Result<Vec<StatusEntry>> {
        let head_oid = self
            .repository
            .refs()
            .read_head()?
            .ok_or_else(|| GitError::RefNotResolvable("HEAD".to_string()))?;
        let head_commit = self
            .repository
            .database()
            .parse_object_as_commit(&head_oid)?
            .ok_or(GitError::CorruptObject(head_oid))?;

        let walk = TreeWalk::new()
            .add_work_tree(self.repository.workspace())?
            .add_index(index)
            .add_tree(self.repository.database(), head_commit.tree_oid())?;

        let mut entries = Vec::new();

        for record in walk.records() {
            let absolute = self.repository.workspace().path().join(&record.path);
            if self.repository.ignores().is_ignored(&absolute)? {
                continue;
            }

            match self.classify_record(&record)? {
                Resolution::Emit(IndexStatus::Unchanged, RepoStatus::Unchanged) => {
                    if list_unchanged {
                        entries.push(StatusEntry::new(
                            record.path,
                            IndexStatus::Unchanged,
                            RepoStatus::Unchanged,
                        ));
                    }
                }
                Resolution::Emit(index_status, repo_status) => {
                    entries.push(StatusEntry::new(record.path, index_status, repo_status));
                }
                Resolution::Skip => {}
                Resolution::Fallthrough => {
                    if lenient {
                        tracing::warn!(
                            path = %record.path.display(),
                            wd_oid = %display_oid(record.slot(0)),
                            index_oid = %display_oid(record.slot(1)),
                            repo_oid = %display_oid(record.slot(2)),
                            "unclassifiable status record skipped"
                        );
                    } else {
                        return Err(GitError::UnexpectedStatusCase(
                            record.path.display().to_string(),
                        )
                        .into());
                    }
                }
            }
        }

        Ok(entries)
    }

    fn classify_record(&self, record: &WalkRecord) -> anyhow::Result<Resolution> {
        let wd = record.slot(0);
        let idx = record.slot(1);
        let repo = record.slot(2);

        let wd_is_gitlink = wd.is_some_and(|entry| entry.mode == EntryMode::Gitlink);
        let idx_eq_repo = match (idx, repo) {
            (Some(idx), Some(repo)) => idx.oid == repo.oid,
            _ => false,
        };

        classify(
            wd.is_some(),
            idx.is_some(),
            repo.is_some(),
            wd_is_gitlink,
            idx_eq_repo,
            || self.work_tree_matches_index(&record.path, wd, idx),
        )
    }

    /// Stat-first identity check between the work tree and the index:
    /// matching size and timestamps short-circuit; otherwise the file is
    /// hashed and compared against the staged id.
    fn work_tree_matches_index(
        &self,
        path: &Path,
        wd: Option<&SourceEntry>,
        idx: Option<&SourceEntry>,
    ) -> anyhow::Result<bool> {
        let (wd, idx) = match (wd, idx) {
            (Some(wd), Some(idx)) => (wd, idx),
            _ => return Ok(false),
        };

        if wd.size == idx.size && millis_match(idx.mtime_ms, wd.mtime_ms) {
            return Ok(true);
        }

        let blob = self.repository.workspace().parse_blob(path)?;
        let wd_oid = blob.object_id()?;

        Ok(Some(&wd_oid) == idx.oid.as_ref())
    }
}

fn display_oid(entry: Option<&SourceEntry>) -> String {
    entry
        .and_then(|entry| entry.oid.clone())
        .unwrap_or_else(ObjectId::default)
        .as_ref()
        .to_string()
}
