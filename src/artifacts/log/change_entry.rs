use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;

/// One line of `whatchanged`: the commit's metadata plus, when requested,
/// the files its tree changed relative to the first parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEntry {
    pub commit_hash: ObjectId,
    pub tree_hash: ObjectId,
    pub author_name: String,
    pub author_email: String,
    pub author_date: chrono::DateTime<chrono::FixedOffset>,
    pub committer_name: String,
    pub committer_email: String,
    pub committer_date: chrono::DateTime<chrono::FixedOffset>,
    /// First line of the commit message
    pub subject: String,
    /// Remaining lines of the commit message
    pub body: String,
    pub files: Option<Vec<PathBuf>>,
}

impl ChangeEntry {
    pub fn from_commit(oid: ObjectId, commit: &Commit, files: Option<Vec<PathBuf>>) -> Self {
        ChangeEntry {
            commit_hash: oid,
            tree_hash: commit.tree_oid().clone(),
            author_name: commit.author().name().to_string(),
            author_email: commit.author().email().to_string(),
            author_date: commit.author().timestamp(),
            committer_name: commit.committer().name().to_string(),
            committer_email: commit.committer().email().to_string(),
            committer_date: commit.committer().timestamp(),
            subject: commit.subject(),
            body: commit.body(),
            files,
        }
    }
}
