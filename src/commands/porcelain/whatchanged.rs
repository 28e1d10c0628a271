use crate::areas::repository::Repository;
use crate::artifacts::log::change_entry::ChangeEntry;
use crate::artifacts::log::rev_walk::RevSort;
use crate::artifacts::log::{HistoryBounds, HistoryQuery};
use std::io::Write;

impl Repository {
    /// `whatchanged`: rev-list projected into commit metadata plus the
    /// files each commit touched relative to its first parent.
    pub async fn whatchanged(
        &self,
        sorts: Option<Vec<RevSort>>,
        bounds: &HistoryBounds,
        max_lines: i64,
    ) -> anyhow::Result<Vec<ChangeEntry>> {
        let changes = HistoryQuery::new(self).whatchanged(sorts, bounds, max_lines)?;

        for change in &changes {
            writeln!(self.writer(), "commit {}", change.commit_hash)?;
            writeln!(self.writer(), "tree {}", change.tree_hash)?;
            writeln!(
                self.writer(),
                "Author: {} <{}>",
                change.author_name,
                change.author_email
            )?;
            writeln!(
                self.writer(),
                "Date:   {}",
                change.author_date.format("%a %b %-d %H:%M:%S %Y %z")
            )?;
            writeln!(self.writer())?;
            writeln!(self.writer(), "    {}", change.subject)?;
            if let Some(files) = &change.files {
                writeln!(self.writer())?;
                for file in files {
                    writeln!(self.writer(), ":{}", file.display())?;
                }
            }
            writeln!(self.writer())?;
        }

        Ok(changes)
    }
}
