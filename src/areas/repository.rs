//! Repository handle and factories
//!
//! `Repository` is the porcelain façade: it owns the lower-level areas
//! (database, index, workspace, refs, config) and the ignore rules, and
//! the command implementations hang off it as `impl Repository` blocks.
//!
//! A handle is obtained through one of the factories:
//! - `init_at` — create a fresh repository (fails when one exists)
//! - `existing` — open one if present, `None` otherwise
//! - `open` — open one that must be present
//!
//! ## Thread safety
//!
//! The index is behind `Arc<Mutex<_>>` so commands serialize in-process;
//! handles in different processes serialize through the file locks.

use crate::areas::config::Config;
use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::branch_name::{BranchName, SymRefName};
use crate::artifacts::ignore::IgnoreRules;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitError;
use std::cell::{Ref, RefCell, RefMut};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Git directory name
pub const GIT_DIR: &str = ".git";

/// Object database directory name
const DATABASE_DIR: &str = "objects";

/// Index file name
const INDEX_FILE: &str = "index";

/// Config file name
const CONFIG_FILE: &str = "config";

/// Branch a fresh repository points its HEAD at
pub const DEFAULT_BRANCH: &str = "master";

pub struct Repository {
    /// Repository root path (the working directory)
    path: Box<Path>,
    /// Output writer (stdout or a capture buffer in tests)
    writer: RefCell<Box<dyn std::io::Write>>,
    /// Staged index with serialized access
    index: Arc<Mutex<Index>>,
    /// Object database
    database: Database,
    /// Working directory
    workspace: Workspace,
    /// Reference manager
    refs: Refs,
    /// Repository configuration
    config: RefCell<Config>,
    /// Layered .gitignore matcher
    ignores: IgnoreRules,
}

impl Repository {
    fn assemble(path: PathBuf, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path.canonicalize()?;
        let git_dir = path.join(GIT_DIR);

        let index = Index::new(git_dir.join(INDEX_FILE).into_boxed_path());
        let database = Database::new(git_dir.join(DATABASE_DIR).into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(git_dir.clone().into_boxed_path());
        let config = Config::load(git_dir.join(CONFIG_FILE).into_boxed_path())?;
        let ignores = IgnoreRules::new(path.clone().into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: Arc::new(Mutex::new(index)),
            database,
            workspace,
            refs,
            config: RefCell::new(config),
            ignores,
        })
    }

    /// Create a new repository rooted at `<work_dir>/.git`. Fails when the
    /// directory already contains one.
    pub fn init_at(work_dir: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        if work_dir.join(GIT_DIR).exists() {
            return Err(GitError::PreconditionFailed(format!(
                "{} already contains a repository",
                work_dir.display()
            ))
            .into());
        }

        std::fs::create_dir_all(work_dir)?;
        let git_dir = work_dir.join(GIT_DIR);
        std::fs::create_dir_all(git_dir.join(DATABASE_DIR))?;
        std::fs::create_dir_all(git_dir.join("refs").join("heads"))?;
        std::fs::create_dir_all(git_dir.join("logs"))?;

        let repository = Self::assemble(work_dir.to_path_buf(), writer)?;

        repository.refs.write_symref(
            &SymRefName::head(),
            &SymRefName::new(format!("refs/heads/{}", DEFAULT_BRANCH)),
        )?;

        repository
            .config
            .borrow_mut()
            .set_bool("core", None, "bare", false);
        repository.config.borrow().save()?;

        Ok(repository)
    }

    /// Open the repository at `work_dir`, or `None` when there is none.
    pub fn existing(
        work_dir: &Path,
        writer: Box<dyn std::io::Write>,
    ) -> anyhow::Result<Option<Self>> {
        if !work_dir.join(GIT_DIR).exists() {
            return Ok(None);
        }

        Self::assemble(work_dir.to_path_buf(), writer).map(Some)
    }

    /// Open the repository at `work_dir`; it must exist.
    pub fn open(work_dir: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        Self::existing(work_dir, writer)?.ok_or_else(|| {
            GitError::RepositoryMissing(work_dir.display().to_string()).into()
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn git_dir(&self) -> PathBuf {
        self.path.join(GIT_DIR)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Arc<Mutex<Index>> {
        self.index.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn config(&'_ self) -> Ref<'_, Config> {
        self.config.borrow()
    }

    pub fn config_mut(&'_ self) -> RefMut<'_, Config> {
        self.config.borrow_mut()
    }

    pub fn ignores(&self) -> &IgnoreRules {
        &self.ignores
    }

    /// Resolve a revision spec to an object id: `HEAD`, a branch name, a
    /// full ref name, or a full 40-hex object id.
    pub fn resolve(&self, revspec: &str) -> anyhow::Result<Option<ObjectId>> {
        if revspec.is_empty() {
            return Err(
                GitError::PreconditionFailed("revision spec must not be empty".into()).into(),
            );
        }

        if let Some(oid) = self.refs.read_ref(revspec)? {
            return Ok(Some(oid));
        }

        if revspec.len() == 40
            && let Ok(oid) = ObjectId::try_parse(revspec.to_string())
            && self.database.contains(&oid)
        {
            return Ok(Some(oid));
        }

        Ok(None)
    }

    /// Short name of the currently checked-out branch.
    pub fn get_branch(&self) -> anyhow::Result<BranchName> {
        self.refs.current_branch()
    }
}
