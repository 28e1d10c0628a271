use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// `hash-object [-w]`: hash a file as a blob, optionally storing it.
    pub fn hash_object(&self, file: &str, write: bool) -> anyhow::Result<()> {
        let data = std::fs::read(Path::new(file))?;
        let blob = Blob::new(data);

        let oid = if write {
            self.database().store(&blob)?
        } else {
            blob.object_id()?
        };

        writeln!(self.writer(), "{}", oid)?;

        Ok(())
    }
}
