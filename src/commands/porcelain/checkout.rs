use crate::areas::refs::RefUpdateResult;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::SymRefName;
use crate::artifacts::checkout::WorkDirCheckout;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::transport::monitor::ProgressMonitor;
use crate::errors::GitError;
use std::io::Write;

impl Repository {
    /// `checkout`: point HEAD at a branch (or ref) and materialize its
    /// tree. HEAD stays where it is when the argument is literally
    /// `HEAD`; an unresolvable target surfaces as `RefNotResolvable`.
    pub async fn checkout(
        &self,
        branch_or_refspec: &str,
        monitor: &mut dyn ProgressMonitor,
    ) -> anyhow::Result<()> {
        if branch_or_refspec.is_empty() {
            return Err(
                GitError::PreconditionFailed("branch name must not be empty".into()).into(),
            );
        }

        if branch_or_refspec != "HEAD" {
            let target = if branch_or_refspec.starts_with("refs/") {
                SymRefName::new(branch_or_refspec.to_string())
            } else {
                SymRefName::new(format!("refs/heads/{}", branch_or_refspec))
            };
            self.refs().write_symref(&SymRefName::head(), &target)?;
        }

        let head_oid = self
            .resolve(branch_or_refspec)?
            .ok_or_else(|| GitError::RefNotResolvable(branch_or_refspec.to_string()))?;

        self.checkout_commit(&head_oid, monitor).await?;

        writeln!(self.writer(), "Switched to '{}'", branch_or_refspec)?;

        Ok(())
    }

    /// Shared tail of `checkout` and `clone`: force HEAD onto the commit
    /// and rebuild working directory and index from its tree.
    pub(crate) async fn checkout_commit(
        &self,
        head_oid: &ObjectId,
        _monitor: &mut dyn ProgressMonitor,
    ) -> anyhow::Result<()> {
        let commit = self
            .database()
            .parse_object_as_commit(head_oid)?
            .ok_or_else(|| GitError::CorruptObject(head_oid.clone()))?;

        // the ref must move before the work tree is touched; a held lock
        // aborts the whole checkout
        let update_result = self
            .refs()
            .update_ref(SymRefName::head())
            .set_new_object_id(head_oid.clone())
            .force_update()?;

        if update_result == RefUpdateResult::LockFailure {
            return Err(GitError::CheckoutFailed {
                oid: head_oid.clone(),
                reason: "ref locked!".to_string(),
            }
            .into());
        }

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        WorkDirCheckout::new(self, commit.tree_oid().clone()).checkout(&mut index)?;
        index.write_updates()?;

        Ok(())
    }
}
