use colored::Colorize;
use derive_new::new;
use std::path::PathBuf;

/// Working directory vs. staged index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IndexStatus {
    /// Present on the filesystem but unknown to the index
    Untracked,
    /// Staged in the index; filesystem and index agree
    Added,
    /// Tracked, but the filesystem content diverged from the index
    Modified,
    /// Gone from the filesystem while still staged
    Deleted,
    /// Filesystem, index and repository all agree
    Unchanged,
}

impl IndexStatus {
    pub fn code(&self) -> char {
        match self {
            IndexStatus::Untracked => '?',
            IndexStatus::Added => 'A',
            IndexStatus::Modified => 'M',
            IndexStatus::Deleted => 'D',
            IndexStatus::Unchanged => '-',
        }
    }
}

/// Staged index vs. HEAD tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RepoStatus {
    /// Not present in the repository
    Untracked,
    /// Staged with content different from the repository
    Added,
    /// Marked in the index as to be removed from the repository
    Removed,
    /// Index and HEAD agree
    Unchanged,
}

impl RepoStatus {
    pub fn code(&self) -> char {
        match self {
            RepoStatus::Untracked => '?',
            RepoStatus::Added => 'A',
            RepoStatus::Removed => 'R',
            RepoStatus::Unchanged => '-',
        }
    }
}

/// One line of `status` output.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct StatusEntry {
    pub path: PathBuf,
    pub index_status: IndexStatus,
    pub repo_status: RepoStatus,
}

impl StatusEntry {
    /// Two-column porcelain rendering: index code, repo code, path.
    pub fn porcelain(&self) -> String {
        format!(
            "{}{} {}",
            self.index_status.code(),
            self.repo_status.code(),
            self.path.display()
        )
    }
}

impl std::fmt::Display for StatusEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let codes = format!("{}{}", self.index_status.code(), self.repo_status.code());
        let codes = match self.index_status {
            IndexStatus::Untracked => codes.red(),
            IndexStatus::Modified | IndexStatus::Deleted => codes.red(),
            IndexStatus::Added => codes.green(),
            IndexStatus::Unchanged => codes.normal(),
        };
        write!(f, "{} {}", codes, self.path.display())
    }
}
