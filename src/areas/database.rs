//! Object database
//!
//! Content-addressed storage for blobs, trees and commits. Objects are
//! zlib-compressed and stored loose under `.git/objects/ab/cdef...`,
//! written through a temp file and an atomic rename. The store is
//! append-only: concurrent readers are always safe, and a writer never
//! rewrites an existing object.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectBox, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::{Tree, TreeRecord};
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    /// Path to the objects directory (typically `.git/objects`)
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).exists()
    }

    /// Store an object unless it already exists.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let oid = object.object_id()?;
        let object_path = self.path.join(oid.to_path());

        if !object_path.exists() {
            let object_content = Self::compress(object.serialize()?)?;
            self.write_raw_at(object_path, object_content)?;
        }

        Ok(oid)
    }

    /// Load and decompress an object's bytes, header included.
    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        let object_content = std::fs::read(&object_path)
            .with_context(|| format!("unable to read object {}", object_id))?;

        Self::decompress(object_content.into())
    }

    /// Parse an object of unknown type.
    pub fn parse_object(&self, object_id: &ObjectId) -> anyhow::Result<ObjectBox> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Ok(ObjectBox::Blob(Box::new(Blob::deserialize(object_reader)?))),
            ObjectType::Tree => Ok(ObjectBox::Tree(Box::new(Tree::deserialize(object_reader)?))),
            ObjectType::Commit => Ok(ObjectBox::Commit(Box::new(Commit::deserialize(
                object_reader,
            )?))),
        }
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Option<Blob>> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Ok(Some(Blob::deserialize(object_reader)?)),
            _ => Ok(None),
        }
    }

    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> anyhow::Result<Option<Tree>> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Tree => Ok(Some(Tree::deserialize(object_reader)?)),
            _ => Ok(None),
        }
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Option<Commit>> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Commit => Ok(Some(Commit::deserialize(object_reader)?)),
            _ => Ok(None),
        }
    }

    pub fn object_type(&self, object_id: &ObjectId) -> anyhow::Result<ObjectType> {
        let (object_type, _) = self.parse_object_as_bytes(object_id)?;
        Ok(object_type)
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<(ObjectType, impl BufRead)> {
        let object_content = self.load(object_id)?;
        let mut object_reader = Cursor::new(object_content);

        let object_type = ObjectType::parse_header(&mut object_reader)?;

        Ok((object_type, object_reader))
    }

    /// Flatten the tree identified by `tree_oid` into `out`, keyed by the
    /// repository-relative leaf path. Subtrees are descended into;
    /// gitlinks are carried as leaves.
    pub fn flatten_tree(
        &self,
        tree_oid: &ObjectId,
        prefix: Option<&Path>,
        out: &mut BTreeMap<PathBuf, TreeRecord>,
    ) -> anyhow::Result<()> {
        let tree = self
            .parse_object_as_tree(tree_oid)?
            .ok_or_else(|| anyhow::anyhow!("object {} is not a tree", tree_oid))?;

        for (name, record) in tree.records() {
            let path = match prefix {
                Some(prefix) => prefix.join(name),
                None => PathBuf::from(name),
            };

            if record.mode.is_tree() {
                self.flatten_tree(&record.oid, Some(&path), out)?;
            } else {
                out.insert(path, record.clone());
            }
        }

        Ok(())
    }

    /// All object ids reachable from the given tips: commits, their parent
    /// chains, trees and blobs. Used to decide what a transport must copy.
    pub fn reachable_closure(&self, tips: &[ObjectId]) -> anyhow::Result<BTreeSet<ObjectId>> {
        let mut seen = BTreeSet::new();
        let mut queue: VecDeque<ObjectId> = tips.iter().cloned().collect();

        while let Some(oid) = queue.pop_front() {
            if !seen.insert(oid.clone()) {
                continue;
            }

            match self.parse_object(&oid)? {
                ObjectBox::Commit(commit) => {
                    queue.push_back(commit.tree_oid().clone());
                    queue.extend(commit.parents().iter().cloned());
                }
                ObjectBox::Tree(tree) => {
                    for (_, record) in tree.records() {
                        if record.mode.is_tree() || record.mode.is_file() {
                            queue.push_back(record.oid.clone());
                        }
                    }
                }
                ObjectBox::Blob(_) => {}
            }
        }

        Ok(seen)
    }

    /// Raw (still compressed) bytes of a loose object, for transports that
    /// copy objects between stores without re-encoding them.
    pub fn read_raw(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());
        let content = std::fs::read(&object_path)
            .with_context(|| format!("unable to read object {}", object_id))?;

        Ok(content.into())
    }

    /// Write raw compressed bytes at the object's path, atomically.
    pub fn write_raw(&self, object_id: &ObjectId, content: Bytes) -> anyhow::Result<()> {
        let object_path = self.path.join(object_id.to_path());
        if object_path.exists() {
            return Ok(());
        }

        self.write_raw_at(object_path, content)
    }

    fn write_raw_at(&self, object_path: PathBuf, content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .with_context(|| format!("invalid object path {}", object_path.display()))?;
        std::fs::create_dir_all(object_dir).with_context(|| {
            format!("unable to create object directory {}", object_dir.display())
        })?;

        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .with_context(|| format!("unable to open {}", temp_object_path.display()))?;

        file.write_all(&content)
            .with_context(|| format!("unable to write {}", temp_object_path.display()))?;

        std::fs::rename(&temp_object_path, &object_path)
            .with_context(|| format!("unable to rename into {}", object_path.display()))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("unable to compress object content")?;

        encoder
            .finish()
            .map(Bytes::from)
            .context("unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .context("unable to decompress object content")?;

        Ok(decompressed.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
