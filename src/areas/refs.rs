//! References (branches, HEAD, remotes)
//!
//! References are human-readable names pointing at commits, stored as text
//! files under `.git`:
//! - a 40-character object id (direct reference), or
//! - `ref: <path>` (symbolic reference, e.g. HEAD -> refs/heads/master).
//!
//! ## Write discipline
//!
//! Every ref write goes through a `NAME.lock` sibling and an atomic
//! rename. A lock file already present means a competing writer holds the
//! ref; the update reports `LockFailure` instead of blocking. Updates are
//! recorded in the reflog under `.git/logs/`.

use crate::artifacts::branch::branch_name::{BranchName, SymRefName};
use crate::artifacts::index::lockfile::{LockError, Lockfile};
use crate::artifacts::objects::commit::Ident;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// All-zero id written as the old side of a reflog line for new refs
const ZERO_OID: &str = "0000000000000000000000000000000000000000";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the git directory (typically `.git`)
    path: Box<Path>,
}

/// A reference file's content: either symbolic or direct.
#[derive(Debug, Clone)]
enum SymRefOrOid {
    SymRef { sym_ref_name: SymRefName },
    Oid(ObjectId),
}

impl SymRefOrOid {
    fn read_symref_or_oid(path: &Path) -> anyhow::Result<Option<SymRefOrOid>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        if let Some(symref_match) = symref_match {
            Ok(Some(SymRefOrOid::SymRef {
                sym_ref_name: SymRefName::new(symref_match[1].to_string()),
            }))
        } else {
            Ok(Some(SymRefOrOid::Oid(ObjectId::try_parse(
                content.to_string(),
            )?)))
        }
    }
}

/// Result of a forced ref update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefUpdateResult {
    /// The ref did not exist before.
    New,
    /// The ref was moved to the new id.
    Forced,
    /// Old and new id are identical.
    NoChange,
    /// A competing writer holds `NAME.lock`.
    LockFailure,
}

impl Refs {
    /// Follow the symref chain starting at `source` (HEAD when `None`) and
    /// return the final symbolic reference in the chain.
    pub fn current_ref(&self, source: Option<SymRefName>) -> anyhow::Result<SymRefName> {
        let source = source.unwrap_or_else(SymRefName::head);

        let ref_content =
            SymRefOrOid::read_symref_or_oid(self.path.join(source.as_ref_path()).as_path())?;

        match ref_content {
            Some(SymRefOrOid::SymRef { sym_ref_name }) => self.current_ref(Some(sym_ref_name)),
            Some(_) | None => Ok(source),
        }
    }

    /// The short name of the currently checked-out branch.
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        BranchName::try_parse_sym_ref_name(&self.current_ref(None)?)
    }

    fn read_symref(&self, path: &Path) -> anyhow::Result<Option<ObjectId>> {
        let ref_content = SymRefOrOid::read_symref_or_oid(path)?;

        match ref_content {
            Some(SymRefOrOid::SymRef { sym_ref_name }) => {
                self.read_symref(self.path.join(sym_ref_name.as_ref_path()).as_path())
            }
            Some(SymRefOrOid::Oid(oid)) => Ok(Some(oid)),
            None => Ok(None),
        }
    }

    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        self.read_symref(&self.head_path())
    }

    /// Resolve a ref name to an object id, following symrefs. Candidates
    /// are searched under `.git`, `.git/refs` and `.git/refs/heads`.
    pub fn read_ref(&self, name: &str) -> anyhow::Result<Option<ObjectId>> {
        let candidates = [
            self.path.join(name),
            self.refs_path().join(name),
            self.heads_path().join(name),
        ];

        match candidates.iter().find(|path| path.exists()) {
            Some(path) => self.read_symref(path),
            None => Ok(None),
        }
    }

    pub fn read_oid(&self, sym_ref_name: &SymRefName) -> anyhow::Result<Option<ObjectId>> {
        self.read_symref(self.path.join(sym_ref_name.as_ref_path()).as_path())
    }

    /// Write a symbolic reference, e.g. HEAD -> refs/heads/master.
    pub fn write_symref(&self, name: &SymRefName, target: &SymRefName) -> anyhow::Result<()> {
        let path = self.path.join(name.as_ref_path());

        let mut lock = Lockfile::acquire(&path)
            .map_err(|err| anyhow::anyhow!("cannot lock ref {}: {}", name, err))?;
        lock.write_all(format!("ref: {}\n", target.as_ref_path()).as_bytes())?;
        lock.commit()?;

        Ok(())
    }

    /// Start a forced update of `name`. The update follows the symref
    /// chain, so updating HEAD moves the branch it points at.
    pub fn update_ref(&'_ self, name: SymRefName) -> RefUpdate<'_> {
        RefUpdate {
            refs: self,
            name,
            new_id: None,
            reflog_message: None,
        }
    }

    /// All branch heads as (full ref name, oid), sorted by ref name.
    pub fn list_heads(&self) -> anyhow::Result<Vec<(SymRefName, ObjectId)>> {
        let heads_path = self.heads_path();
        if !heads_path.exists() {
            return Ok(Vec::new());
        }

        let mut heads = WalkDir::new(heads_path.as_ref())
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let relative = entry.path().strip_prefix(self.path.as_ref()).ok()?;
                let name = SymRefName::new(relative.to_string_lossy().to_string());
                let oid = self.read_oid(&name).ok()??;
                Some((name, oid))
            })
            .collect::<Vec<_>>();

        heads.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(heads)
    }

    /// Resolve the terminal (non-symbolic) ref behind `name`, returning its
    /// name and file path.
    fn final_ref(&self, name: &SymRefName) -> anyhow::Result<(SymRefName, PathBuf)> {
        let path = self.path.join(name.as_ref_path());

        match SymRefOrOid::read_symref_or_oid(&path)? {
            Some(SymRefOrOid::SymRef { sym_ref_name }) => self.final_ref(&sym_ref_name),
            Some(SymRefOrOid::Oid(_)) | None => Ok((name.clone(), path)),
        }
    }

    fn append_reflog(
        &self,
        ref_name: &SymRefName,
        old: Option<&ObjectId>,
        new: &ObjectId,
        message: &str,
    ) -> anyhow::Result<()> {
        let log_path = self.logs_path().join(ref_name.as_ref_path());
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("unable to create reflog directory for {}", ref_name))?;
        }

        let ident = Ident::load_from_env()
            .unwrap_or_else(|_| Ident::new("sgit".to_string(), "sgit@localhost".to_string()));

        let old = old.map(|oid| oid.as_ref().to_string());
        let line = format!(
            "{} {} {}{}\n",
            old.as_deref().unwrap_or(ZERO_OID),
            new.as_ref(),
            ident.display(),
            message
        );

        let mut log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("unable to open reflog {}", log_path.display()))?;
        log_file.write_all(line.as_bytes())?;

        Ok(())
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }

    pub fn remotes_path(&self) -> Box<Path> {
        self.refs_path().join("remotes").into_boxed_path()
    }

    pub fn logs_path(&self) -> Box<Path> {
        self.path.join("logs").into_boxed_path()
    }
}

/// An in-flight ref update, committed by `force_update`.
pub struct RefUpdate<'r> {
    refs: &'r Refs,
    name: SymRefName,
    new_id: Option<ObjectId>,
    reflog_message: Option<String>,
}

impl RefUpdate<'_> {
    pub fn set_new_object_id(mut self, oid: ObjectId) -> Self {
        self.new_id = Some(oid);
        self
    }

    pub fn set_reflog_message(mut self, message: String) -> Self {
        self.reflog_message = Some(message);
        self
    }

    /// Apply the update regardless of ancestry. Returns `LockFailure`
    /// instead of an error when the ref's lock file is already held.
    pub fn force_update(self) -> anyhow::Result<RefUpdateResult> {
        let new_id = self
            .new_id
            .ok_or_else(|| anyhow::anyhow!("ref update without a new object id"))?;

        let (final_name, final_path) = self.refs.final_ref(&self.name)?;
        let old_id = self.refs.read_symref(&final_path)?;

        let mut lock = match Lockfile::acquire(&final_path) {
            Ok(lock) => lock,
            Err(LockError::Held(_)) => return Ok(RefUpdateResult::LockFailure),
            Err(LockError::Io(err)) => return Err(err.into()),
        };
        lock.write_all(new_id.as_ref().as_bytes())?;
        lock.write_all(b"\n")?;
        lock.commit()?;

        if let Some(message) = &self.reflog_message {
            self.refs
                .append_reflog(&final_name, old_id.as_ref(), &new_id, message)?;
            if final_name != self.name {
                self.refs
                    .append_reflog(&self.name, old_id.as_ref(), &new_id, message)?;
            }
        }

        match old_id {
            None => Ok(RefUpdateResult::New),
            Some(old) if old == new_id => Ok(RefUpdateResult::NoChange),
            Some(_) => Ok(RefUpdateResult::Forced),
        }
    }
}
