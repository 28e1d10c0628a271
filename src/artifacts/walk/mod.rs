//! Ordered walk over up to three tree sources
//!
//! The status and staging engines both need to look at every path across
//! several sources at once: the working tree, the staged index and a
//! committed tree. Each source flattens into an ordered map from the
//! repository-relative leaf path to a uniform per-source view; the walk
//! then merges the maps and emits one record per path, in canonical index
//! order. Subtrees never surface as records, only their leaves do.
//!
//! Sources are a closed set (no downcasting): adding one picks the
//! matching loader.

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::repository::GIT_DIR;
use crate::areas::workspace::Workspace;
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// What one source knows about a path. `oid` is absent for work-tree
/// entries, whose hash is computed on demand by the consumer.
#[derive(Debug, Clone)]
pub struct SourceEntry {
    pub mode: EntryMode,
    pub oid: Option<ObjectId>,
    pub size: u64,
    pub mtime_ms: u64,
}

/// Which kind of source a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    WorkTree,
    Index,
    HeadTree,
}

/// One merged record: the path and what each source has at it, in the
/// order sources were added. A `None` slot is the raw mode 0 case.
#[derive(Debug, Clone)]
pub struct WalkRecord {
    pub path: PathBuf,
    pub slots: Vec<Option<SourceEntry>>,
}

impl WalkRecord {
    pub fn slot(&self, index: usize) -> Option<&SourceEntry> {
        self.slots.get(index).and_then(Option::as_ref)
    }
}

#[derive(Debug, Default)]
pub struct TreeWalk {
    sources: Vec<(SourceKind, BTreeMap<PathBuf, SourceEntry>)>,
    /// Single-path filter: only paths equal to or below this prefix emit
    filter: Option<PathBuf>,
}

impl TreeWalk {
    pub fn new() -> Self {
        TreeWalk::default()
    }

    /// Restrict the walk to one repository-interior path (file or
    /// directory). Without a filter every path is walked.
    pub fn set_filter(mut self, filter: Option<PathBuf>) -> Self {
        self.filter = filter;
        self
    }

    fn admits(&self, path: &Path) -> bool {
        match &self.filter {
            Some(prefix) => path == prefix || path.starts_with(prefix),
            None => true,
        }
    }

    /// Add the working directory as a source. Gitlink directories surface
    /// as leaves whose id is the nested repository's HEAD.
    pub fn add_work_tree(mut self, workspace: &Workspace) -> anyhow::Result<Self> {
        let scan = workspace.scan(self.filter.as_deref())?;

        let mut entries = BTreeMap::new();
        for (path, stat) in scan {
            if !self.admits(&path) {
                continue;
            }

            let oid = match stat.mode {
                EntryMode::Gitlink => {
                    let nested = Refs::new(
                        workspace.path().join(&path).join(GIT_DIR).into_boxed_path(),
                    );
                    nested.read_head().unwrap_or(None)
                }
                _ => None,
            };

            entries.insert(
                path,
                SourceEntry {
                    mode: stat.mode,
                    oid,
                    size: stat.size,
                    mtime_ms: stat.mtime_millis(),
                },
            );
        }

        self.sources.push((SourceKind::WorkTree, entries));
        Ok(self)
    }

    /// Add the staged index as a source.
    pub fn add_index(mut self, index: &Index) -> Self {
        let entries = index
            .entries()
            .filter(|entry| self.admits(&entry.name))
            .map(|entry| {
                (
                    entry.name.clone(),
                    SourceEntry {
                        mode: entry.metadata.mode,
                        oid: Some(entry.oid.clone()),
                        size: entry.metadata.size,
                        mtime_ms: entry.metadata.mtime_millis(),
                    },
                )
            })
            .collect();

        self.sources.push((SourceKind::Index, entries));
        self
    }

    /// Add a committed tree as a source, flattened to its leaves.
    pub fn add_tree(mut self, database: &Database, tree_oid: &ObjectId) -> anyhow::Result<Self> {
        let mut flattened = BTreeMap::new();
        database.flatten_tree(tree_oid, None, &mut flattened)?;

        let entries = flattened
            .into_iter()
            .filter(|(path, _)| self.admits(path))
            .map(|(path, record)| {
                (
                    path,
                    SourceEntry {
                        mode: record.mode,
                        oid: Some(record.oid),
                        size: 0,
                        mtime_ms: 0,
                    },
                )
            })
            .collect();

        self.sources.push((SourceKind::HeadTree, entries));
        Ok(self)
    }

    pub fn source_kinds(&self) -> Vec<SourceKind> {
        self.sources.iter().map(|(kind, _)| *kind).collect()
    }

    /// Merge the sources and emit one record per path, in canonical index
    /// order.
    pub fn records(&self) -> Vec<WalkRecord> {
        let mut paths = std::collections::BTreeSet::new();
        for (_, entries) in &self.sources {
            paths.extend(entries.keys().cloned());
        }

        paths
            .into_iter()
            .map(|path| {
                let slots = self
                    .sources
                    .iter()
                    .map(|(_, entries)| entries.get(&path).cloned())
                    .collect();
                WalkRecord { path, slots }
            })
            .collect()
    }
}
