//! Exclusive lock files with atomic commit
//!
//! Both the staged index and ref files serialize writers through a `.lock`
//! sibling: the lock is created exclusively (an existing lock means another
//! writer holds it), the new content is written into the lock, and an
//! atomic rename moves it into place. Dropping an uncommitted lock removes
//! the lock file, so every exit path releases it, including unwinding.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const LOCK_SUFFIX: &str = ".lock";

#[derive(Debug)]
pub enum LockError {
    /// The `.lock` file already exists: a competing writer holds the lock.
    Held(PathBuf),
    Io(std::io::Error),
}

impl std::fmt::Display for LockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LockError::Held(path) => write!(f, "lock file {} is held", path.display()),
            LockError::Io(err) => write!(f, "lock file error: {}", err),
        }
    }
}

impl std::error::Error for LockError {}

#[derive(Debug)]
pub struct Lockfile {
    target: PathBuf,
    lock_path: PathBuf,
    file: Option<File>,
    committed: bool,
}

impl Lockfile {
    /// Acquire the lock for `target` by exclusively creating
    /// `<target>.lock`.
    pub fn acquire(target: &Path) -> Result<Self, LockError> {
        let lock_path = Self::lock_path_for(target);

        if let Some(parent) = lock_path.parent() {
            std::fs::create_dir_all(parent).map_err(LockError::Io)?;
        }

        let file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock_path)
            .map_err(|err| match err.kind() {
                std::io::ErrorKind::AlreadyExists => LockError::Held(lock_path.clone()),
                _ => LockError::Io(err),
            })?;

        Ok(Lockfile {
            target: target.to_path_buf(),
            lock_path,
            file: Some(file),
            committed: false,
        })
    }

    pub fn lock_path_for(target: &Path) -> PathBuf {
        let mut name = target.as_os_str().to_os_string();
        name.push(LOCK_SUFFIX);
        PathBuf::from(name)
    }

    pub fn write_all(&mut self, data: &[u8]) -> std::io::Result<()> {
        self.file
            .as_mut()
            .expect("lock file already committed")
            .write_all(data)
    }

    /// Hand the underlying file out for streaming writers.
    pub fn file_mut(&mut self) -> &mut File {
        self.file.as_mut().expect("lock file already committed")
    }

    /// Atomically rename the lock into place.
    pub fn commit(mut self) -> std::io::Result<()> {
        let file = self.file.take().expect("lock file already committed");
        file.sync_all()?;
        drop(file);

        std::fs::rename(&self.lock_path, &self.target)?;
        self.committed = true;

        Ok(())
    }
}

impl Drop for Lockfile {
    fn drop(&mut self) {
        if !self.committed {
            self.file.take();
            let _ = std::fs::remove_file(&self.lock_path);
        }
    }
}
