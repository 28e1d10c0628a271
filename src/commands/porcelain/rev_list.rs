use crate::areas::repository::Repository;
use crate::artifacts::log::{HistoryBounds, HistoryQuery};
use crate::artifacts::log::rev_walk::RevSort;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// `rev-list`: commit ids within the requested bounds, newest first.
    /// `max_lines == -1` means unbounded.
    pub async fn rev_list(
        &self,
        sorts: Option<Vec<RevSort>>,
        bounds: &HistoryBounds,
        max_lines: i64,
    ) -> anyhow::Result<Vec<ObjectId>> {
        let oids = HistoryQuery::new(self).rev_list(sorts, bounds, max_lines)?;

        for oid in &oids {
            writeln!(self.writer(), "{}", oid)?;
        }

        Ok(oids)
    }
}
