use crate::areas::repository::Repository;
use crate::artifacts::stage::IndexStager;
use std::path::Path;

impl Repository {
    /// `add`: stage files or directories. With `also_remove`, paths gone
    /// from the working tree are dropped from the index as well.
    pub async fn add(&self, paths: &[String], also_remove: bool) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;

        let stager = IndexStager::new(self);
        for path in paths {
            stager.stage(&mut index, Path::new(path), also_remove)?;
        }

        Ok(())
    }
}
