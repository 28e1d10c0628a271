use crate::areas::repository::Repository;
use crate::artifacts::objects::object::{Object, ObjectBox};
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// `cat-file -p`: pretty-print an object by id.
    pub fn cat_file(&self, sha: &str) -> anyhow::Result<()> {
        let oid = ObjectId::try_parse(sha.to_string())?;

        match self.database().parse_object(&oid)? {
            // blobs are written verbatim, without a trailing newline
            ObjectBox::Blob(blob) => write!(self.writer(), "{}", blob.display())?,
            ObjectBox::Tree(tree) => writeln!(self.writer(), "{}", tree.display())?,
            ObjectBox::Commit(commit) => writeln!(self.writer(), "{}", commit.display())?,
        }

        Ok(())
    }
}
