//! Working directory operations
//!
//! The workspace is the checked-out file tree next to `.git`. It knows how
//! to scan itself in canonical path order, stat files, turn file contents
//! into blobs and write blobs back out during checkout.

use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::index_entry::EntryMetadata;
use crate::artifacts::objects::blob::Blob;
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const GIT_DIR_NAME: &str = ".git";

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a file into a blob. The caller hashes it when it needs the id.
    pub fn parse_blob(&self, path: &Path) -> anyhow::Result<Blob> {
        let data = self.read_file(path)?;
        Ok(Blob::new(data))
    }

    /// Scan all regular files (and symlinks) under `root`, keyed by their
    /// repository-relative path. The map's ordering is the canonical index
    /// order. Nested repositories are reported as gitlink directories and
    /// not descended into.
    pub fn scan(&self, root: Option<&Path>) -> anyhow::Result<BTreeMap<PathBuf, EntryMetadata>> {
        let scan_root = match root {
            Some(p) => self.path.join(p),
            None => self.path.to_path_buf(),
        };

        let mut files = BTreeMap::new();

        if !scan_root.exists() {
            return Ok(files);
        }

        if scan_root.is_file() || scan_root.is_symlink() {
            let relative = self.relativize(&scan_root)?;
            let stat = self.stat_file(&relative)?;
            files.insert(relative, stat);
            return Ok(files);
        }

        let mut walker = WalkDir::new(&scan_root).into_iter();
        while let Some(entry) = walker.next() {
            let entry = entry?;
            let path = entry.path();

            if entry.file_type().is_dir() {
                if path.file_name().is_some_and(|name| name == GIT_DIR_NAME) {
                    walker.skip_current_dir();
                    continue;
                }
                // a nested repository is a gitlink, not a tree to descend into
                if path != scan_root && path.join(GIT_DIR_NAME).exists() {
                    let relative = self.relativize(path)?;
                    let mut stat = self.stat_file(&relative)?;
                    stat.mode = EntryMode::Gitlink;
                    files.insert(relative, stat);
                    walker.skip_current_dir();
                }
                continue;
            }

            let relative = self.relativize(path)?;
            let stat = self.stat_file(&relative)?;
            files.insert(relative, stat);
        }

        Ok(files)
    }

    fn relativize(&self, path: &Path) -> anyhow::Result<PathBuf> {
        path.strip_prefix(self.path.as_ref())
            .map(Path::to_path_buf)
            .with_context(|| format!("path {} is outside the workspace", path.display()))
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Vec<u8>> {
        let file_path = self.path.join(file_path);
        let content = std::fs::read(&file_path)
            .with_context(|| format!("unable to read {}", file_path.display()))?;

        Ok(content)
    }

    pub fn stat_file(&self, file_path: &Path) -> anyhow::Result<EntryMetadata> {
        let absolute = self.path.join(file_path);
        let metadata = std::fs::symlink_metadata(&absolute)?;

        // executable detection needs the on-disk path, the flags field
        // wants the repository-relative name
        let stat: EntryMetadata = (absolute.as_path(), metadata).try_into()?;
        Ok(stat.with_name_length(file_path))
    }

    /// Write a blob into the working directory, creating parent
    /// directories as needed. Used by checkout.
    pub fn write_file(&self, file_path: &Path, data: &[u8], mode: EntryMode) -> anyhow::Result<()> {
        let path = self.path.join(file_path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("unable to create directory {}", parent.display()))?;
        }

        std::fs::write(&path, data)
            .with_context(|| format!("unable to write {}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(match mode {
                EntryMode::Executable => 0o755,
                _ => 0o644,
            });
            std::fs::set_permissions(&path, permissions)
                .with_context(|| format!("unable to set permissions on {}", path.display()))?;
        }

        Ok(())
    }

    /// Remove a file from the working directory, pruning directories the
    /// removal leaves empty. Used by checkout.
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let path = self.path.join(file_path);

        // gitlink entries resolve to directories; those stay put
        if path.is_file() || path.is_symlink() {
            std::fs::remove_file(&path)
                .with_context(|| format!("unable to remove {}", path.display()))?;
        }

        let mut parent = path.parent();
        while let Some(dir) = parent {
            // remove_dir refuses non-empty directories, which ends the walk
            if dir == self.path.as_ref() || std::fs::remove_dir(dir).is_err() {
                break;
            }
            parent = dir.parent();
        }

        Ok(())
    }
}
