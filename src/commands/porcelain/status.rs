use crate::areas::repository::Repository;
use crate::artifacts::status::reconciler::StatusReconciler;
use crate::artifacts::status::status_entry::StatusEntry;
use std::io::Write;

impl Repository {
    /// `status`: the ordered (IndexStatus, RepoStatus) classification of
    /// every path. `list_unchanged` also emits clean paths; `lenient`
    /// logs unclassifiable records instead of failing.
    pub async fn status(
        &self,
        list_unchanged: bool,
        lenient: bool,
    ) -> anyhow::Result<Vec<StatusEntry>> {
        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;

        let entries = StatusReconciler::new(self).reconcile(&index, list_unchanged, lenient)?;

        for entry in &entries {
            writeln!(self.writer(), "{}", entry)?;
        }

        Ok(entries)
    }
}
