//! The staged index (dir-cache)
//!
//! The index records, per path, what will be included in the next commit:
//! mode, size, timestamps and the staged blob's object id. Entries are kept
//! in canonical path order; the serialized file is the DIRC v2 format with
//! a trailing SHA-1 checksum.
//!
//! ## Locking
//!
//! Reads take a shared advisory lock on the index file. Writes go through
//! an exclusive `index.lock` file committed by atomic rename; only one
//! writer at a time per repository, enforced purely through the
//! filesystem.

use crate::areas::database::Database;
use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::{ENTRY_BLOCK, ENTRY_MIN_SIZE, IndexEntry};
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::lockfile::{LockError, Lockfile};
use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::errors::GitError;
use anyhow::anyhow;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.git/index`)
    path: Box<Path>,
    /// Tracked files mapped by path, in canonical order
    entries: BTreeMap<PathBuf, IndexEntry>,
    /// Directory hierarchy for parent-child lookups
    children: BTreeMap<PathBuf, BTreeSet<PathBuf>>,
    /// Index file header metadata
    header: IndexHeader,
    /// Set when the in-memory view diverges from disk
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            children: BTreeMap::new(),
            header: IndexHeader::empty(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entry_by_path(&self, path: &Path) -> Option<&IndexEntry> {
        self.entries.get(path)
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// True when the path is a file entry or a directory with tracked
    /// children.
    pub fn is_directly_tracked(&self, path: &Path) -> bool {
        self.entries.contains_key(path) || self.children.contains_key(path)
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.children.clear();
        self.header = IndexHeader::empty();
        self.changed = false;
    }

    /// Load the index from disk, verifying the trailing checksum. A missing
    /// or empty file yields an empty index.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        if !self.path.exists() {
            self.clear();
            std::fs::File::create(&self.path)?;
        }

        let mut index_file = std::fs::OpenOptions::new().read(true).open(&self.path)?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        self.clear();

        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(&mut **lock);
        let entries_count = Self::parse_header(&mut reader)?;
        self.parse_entries(entries_count, &mut reader)?;

        reader.verify()
    }

    fn parse_header(reader: &mut Checksum<&mut std::fs::File>) -> anyhow::Result<u32> {
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = IndexHeader::deserialize(std::io::Cursor::new(header_bytes))?;

        if header.marker != SIGNATURE {
            return Err(anyhow!("invalid index file signature"));
        }

        if header.version != VERSION {
            return Err(anyhow!("unsupported index file version: {}", header.version));
        }

        Ok(header.entries_count)
    }

    fn parse_entries(
        &mut self,
        entries_count: u32,
        reader: &mut Checksum<&mut std::fs::File>,
    ) -> anyhow::Result<()> {
        for _ in 0..entries_count {
            let entry_bytes = reader.read(ENTRY_MIN_SIZE)?;
            let mut entry_bytes = entry_bytes.to_vec();

            // entries are padded to 8-byte blocks ending in NUL
            while entry_bytes[entry_bytes.len() - 1] != 0 {
                entry_bytes = [entry_bytes, reader.read(ENTRY_BLOCK)?.to_vec()].concat();
            }

            let entry_bytes = Bytes::from(entry_bytes);
            let entry = IndexEntry::deserialize(std::io::Cursor::new(entry_bytes))?;

            self.store_entry(&entry);
        }

        self.header.entries_count = entries_count;

        Ok(())
    }

    /// Remove entries that conflict with the new one: parent directories
    /// that are file entries, and children when a directory becomes a file.
    fn discard_conflicts(&mut self, entry: &IndexEntry) {
        for parent in entry.parent_dirs() {
            self.remove_entry(&parent.to_path_buf());
        }
        self.remove_children(&entry.name.clone());
    }

    fn store_entry(&mut self, entry: &IndexEntry) {
        let entry_parents = entry
            .parent_dirs()
            .into_iter()
            .map(Path::to_path_buf)
            .collect::<BTreeSet<_>>();

        self.entries.insert(entry.name.clone(), entry.clone());

        for parent in entry_parents {
            self.children
                .entry(parent)
                .or_default()
                .insert(entry.name.clone());
        }
    }

    fn remove_children(&mut self, path: &PathBuf) {
        if let Some(children) = self.children.remove(path) {
            for child in children {
                self.remove_entry(&child);
            }
        }
    }

    fn remove_entry(&mut self, path: &PathBuf) {
        if let Some(entry) = self.entries.remove(path) {
            for parent in entry.parent_dirs() {
                let parent = parent.to_path_buf();
                if let Some(children) = self.children.get_mut(&parent) {
                    children.remove(path);
                    if children.is_empty() {
                        self.children.remove(&parent);
                    }
                }
            }
        }
    }

    pub fn add(&mut self, entry: IndexEntry) {
        self.discard_conflicts(&entry);
        self.store_entry(&entry);

        self.header.entries_count = self.entries.len() as u32;
        self.changed = true;
    }

    pub fn remove(&mut self, path: PathBuf) {
        self.remove_entry(&path);
        self.remove_children(&path);

        self.header.entries_count = self.entries.len() as u32;
        self.changed = true;
    }

    /// Swap in a freshly built entry set (the staging engine's commit
    /// path).
    pub fn replace_entries(&mut self, entries: impl IntoIterator<Item = IndexEntry>) {
        self.entries.clear();
        self.children.clear();

        for entry in entries {
            self.store_entry(&entry);
        }

        self.header.entries_count = self.entries.len() as u32;
        self.changed = true;
    }

    /// Persist the index through `index.lock` + atomic rename. A held lock
    /// surfaces as `IndexUpdateFailed`; the caller may retry.
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let mut lock = match Lockfile::acquire(&self.path) {
            Ok(lock) => lock,
            Err(LockError::Held(path)) => {
                return Err(GitError::IndexUpdateFailed(format!(
                    "index lock {} is held by another process",
                    path.display()
                ))
                .into());
            }
            Err(LockError::Io(err)) => return Err(err.into()),
        };

        let mut writer = Checksum::new(lock.file_mut());

        self.header = IndexHeader {
            entries_count: self.entries.len() as u32,
            ..self.header.clone()
        };
        writer.write(&self.header.serialize()?)?;

        for entry in self.entries.values() {
            writer.write(&entry.serialize()?)?;
        }

        writer.write_checksum()?;

        lock.commit().map_err(|err| {
            GitError::IndexUpdateFailed(format!("unable to commit index lock: {}", err))
        })?;
        self.changed = false;

        Ok(())
    }

    /// Write the staged entries out as canonical tree objects and return
    /// the root tree id.
    pub fn write_tree(&self, database: &Database) -> anyhow::Result<ObjectId> {
        let tree = Tree::build(self.entries.values())?;

        tree.traverse(&|subtree| database.store(subtree).map(|_| ()))?;

        tree.object_id()
    }
}
