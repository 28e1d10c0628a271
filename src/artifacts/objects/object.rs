//! Core object traits
//!
//! - `Packable`: serialization to the on-disk binary format
//! - `Unpackable`: deserialization from that format (header already consumed)
//! - `Object`: common operations shared by blobs, trees and commits

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;
use std::path::PathBuf;

/// Serialize the object to bytes, including the `<type> <size>\0` header.
pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

/// Deserialize the object from a reader positioned after the header.
pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    /// Human-readable rendering, used by `cat-file -p`.
    fn display(&self) -> String;

    /// The object id is the SHA-1 of the serialized form.
    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        let mut hasher = Sha1::new();
        hasher.update(&content);

        let oid = hasher.finalize();
        ObjectId::try_parse(format!("{oid:x}"))
    }

    /// Where the loose object lives, relative to the objects directory.
    fn object_path(&self) -> Result<PathBuf> {
        Ok(self.object_id()?.to_path())
    }
}

/// Type-erased object, for callers that cannot know the kind up front.
pub enum ObjectBox {
    Blob(Box<Blob>),
    Tree(Box<Tree>),
    Commit(Box<Commit>),
}
