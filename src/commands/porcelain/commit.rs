use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::SymRefName;
use crate::artifacts::objects::commit::{Commit, Ident};
use crate::artifacts::objects::object_id::ObjectId;
use crate::areas::refs::RefUpdateResult;
use crate::errors::GitError;
use std::io::Write;

impl Repository {
    /// `commit`: snapshot the staged index.
    ///
    /// The index lock is released before the HEAD ref update so a
    /// concurrent reader never waits on a ref operation. An absent HEAD
    /// means a root commit with an empty parent list.
    pub async fn commit(
        &self,
        author: Option<Ident>,
        committer: Option<Ident>,
        message: &str,
    ) -> anyhow::Result<ObjectId> {
        let message = message.trim();
        if message.is_empty() {
            return Err(
                GitError::PreconditionFailed("commit message must not be empty".into()).into(),
            );
        }

        let parent = self.refs().read_head()?;

        let author = match author {
            Some(author) => author,
            None => Ident::load_from_env()?,
        };
        let committer = committer.unwrap_or_else(|| author.clone());

        // index stays locked through the tree and commit writes only
        let (commit, commit_oid) = {
            let index = self.index();
            let mut index = index.lock().await;
            index.rehydrate()?;

            let tree_oid = index.write_tree(self.database())?;
            let commit = Commit::new(
                parent.clone().into_iter().collect(),
                tree_oid,
                author,
                committer,
                message.to_string(),
            );
            let commit_oid = self.database().store(&commit)?;

            (commit, commit_oid)
        };

        let update_result = self
            .refs()
            .update_ref(SymRefName::head())
            .set_new_object_id(commit_oid.clone())
            .set_reflog_message(build_reflog_message(message, false))
            .force_update()?;

        if update_result == RefUpdateResult::LockFailure {
            return Err(GitError::CommitFailed {
                oid: commit_oid,
                reason: "reflog locked!".to_string(),
            }
            .into());
        }

        let label = match parent {
            Some(_) => self
                .get_branch()
                .map(|branch| branch.to_string())
                .unwrap_or_else(|_| "detached HEAD".to_string()),
            None => "(root-commit)".to_string(),
        };

        writeln!(
            self.writer(),
            "[{} {}] {}",
            label,
            commit_oid,
            commit.subject()
        )?;

        Ok(commit_oid)
    }
}

/// The reflog line for a commit carries the message's first line.
fn build_reflog_message(commit_message: &str, amending: bool) -> String {
    let first_line = commit_message.lines().next().unwrap_or("");
    let commit_str = if amending {
        "\tcommit (amend): "
    } else {
        "\tcommit: "
    };
    format!("{}{}", commit_str, first_line)
}
