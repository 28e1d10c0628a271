use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::GitError;
use std::collections::BTreeMap;
use std::io::Write;

impl Repository {
    /// `ls-tree [-r]`: list a tree-ish. With `recursive`, subtrees are
    /// flattened into full leaf paths.
    pub fn ls_tree(&self, revspec: &str, recursive: bool) -> anyhow::Result<()> {
        let oid = self
            .resolve(revspec)?
            .ok_or_else(|| GitError::RefNotResolvable(revspec.to_string()))?;

        let tree_oid = match self.database().parse_object_as_commit(&oid)? {
            Some(commit) => commit.tree_oid().clone(),
            None => oid,
        };

        if recursive {
            let mut flattened = BTreeMap::new();
            self.database()
                .flatten_tree(&tree_oid, None, &mut flattened)?;

            for (path, record) in flattened {
                writeln!(
                    self.writer(),
                    "{} {} {}\t{}",
                    record.mode.as_str(),
                    ObjectType::Blob.as_str(),
                    record.oid,
                    path.display()
                )?;
            }
        } else {
            let tree = self
                .database()
                .parse_object_as_tree(&tree_oid)?
                .ok_or(GitError::CorruptObject(tree_oid))?;
            writeln!(self.writer(), "{}", tree.display())?;
        }

        Ok(())
    }
}
