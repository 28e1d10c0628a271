use crate::areas::repository::Repository;
use crate::artifacts::ls_files::{LsFileEntry, LsFilesMerge};
use std::io::Write;

impl Repository {
    /// `ls-files`: the staged index merged with the working tree, one
    /// tagged line per path.
    pub async fn ls_files(&self) -> anyhow::Result<Vec<LsFileEntry>> {
        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;

        let entries = LsFilesMerge::new(self).merge(&index)?;

        for entry in &entries {
            writeln!(
                self.writer(),
                "{} {}",
                entry.status.tag(),
                entry.path.display()
            )?;
        }

        Ok(entries)
    }
}
