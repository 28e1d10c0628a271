//! Tree objects — content-addressed directory listings
//!
//! On disk a tree is `tree <size>\0` followed by one record per entry:
//! `<octal mode> <name>\0<20-byte oid>`. Entries are sorted by name with
//! directory names carrying an implicit trailing `/`, which is exactly the
//! order a `BTreeMap` keyed on `name/` produces.
//!
//! Trees are built in two directions:
//! - from staged index entries, to write the next commit's snapshot;
//! - from database bytes, to read a committed snapshot back.

use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::Path;

/// One member of a committed tree as read back from the database.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeRecord {
    pub oid: ObjectId,
    pub mode: EntryMode,
}

/// A node of a tree under construction.
#[derive(Debug, Clone)]
enum TreeNode {
    Leaf(IndexEntry),
    Subtree(Tree),
}

impl TreeNode {
    fn mode(&self) -> EntryMode {
        match self {
            TreeNode::Leaf(entry) => entry.metadata.mode,
            TreeNode::Subtree(_) => EntryMode::Tree,
        }
    }

    fn oid(&self) -> anyhow::Result<ObjectId> {
        match self {
            TreeNode::Leaf(entry) => Ok(entry.oid.clone()),
            TreeNode::Subtree(tree) => tree.object_id(),
        }
    }

    fn object_type(&self) -> ObjectType {
        match self {
            TreeNode::Leaf(_) => ObjectType::Blob,
            TreeNode::Subtree(_) => ObjectType::Tree,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Tree {
    /// Members read back from the database
    records: BTreeMap<String, TreeRecord>,
    /// Members being assembled from the index (directory keys end in `/`)
    nodes: BTreeMap<String, TreeNode>,
}

impl Tree {
    /// Assemble the hierarchical tree for a flat, ordered list of index
    /// entries. Intermediate directories are created as encountered.
    pub fn build<'e>(entries: impl Iterator<Item = &'e IndexEntry>) -> anyhow::Result<Self> {
        let mut root = Self::default();

        for entry in entries {
            let parents = entry.parent_dirs();
            root.add_entry(&parents, entry)?;
        }

        Ok(root)
    }

    fn add_entry(&mut self, parents: &[&Path], entry: &IndexEntry) -> anyhow::Result<()> {
        if parents.is_empty() {
            self.nodes
                .insert(entry.basename()?.to_string(), TreeNode::Leaf(entry.clone()));
            return Ok(());
        }

        let dir_name = parents[0]
            .file_name()
            .and_then(|s| s.to_str())
            .context("invalid directory name in entry path")?;
        let key = format!("{}/", dir_name);

        let subtree = match self.nodes.entry(key) {
            std::collections::btree_map::Entry::Occupied(slot) => match slot.into_mut() {
                TreeNode::Subtree(tree) => tree,
                node => {
                    // a file is being replaced by a directory of the same name
                    *node = TreeNode::Subtree(Tree::default());
                    match node {
                        TreeNode::Subtree(tree) => tree,
                        _ => unreachable!(),
                    }
                }
            },
            std::collections::btree_map::Entry::Vacant(slot) => {
                match slot.insert(TreeNode::Subtree(Tree::default())) {
                    TreeNode::Subtree(tree) => tree,
                    _ => unreachable!(),
                }
            }
        };

        subtree.add_entry(&parents[1..], entry)
    }

    /// Post-order traversal: children are visited before their parent so
    /// child oids exist by the time the parent is stored.
    pub fn traverse<F>(&self, func: &F) -> anyhow::Result<()>
    where
        F: Fn(&Tree) -> anyhow::Result<()>,
    {
        for node in self.nodes.values() {
            if let TreeNode::Subtree(tree) = node {
                tree.traverse(func)?;
            }
        }
        func(self)
    }

    /// Members read back from the database.
    pub fn records(&self) -> impl Iterator<Item = (&String, &TreeRecord)> {
        self.records.iter()
    }

    pub fn record(&self, name: &str) -> Option<&TreeRecord> {
        self.records.get(name)
    }
}

impl Packable for Tree {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut content_bytes = Vec::new();

        for (name, node) in &self.nodes {
            let name = name.trim_end_matches('/');
            let header = format!("{:o} {}", node.mode().as_u32(), name);
            content_bytes.write_all(header.as_bytes())?;
            content_bytes.push(0);
            node.oid()?.write_raw_to(&mut content_bytes)?;
        }

        let mut tree_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), content_bytes.len());
        tree_bytes.write_all(header.as_bytes())?;
        tree_bytes.write_all(&content_bytes)?;

        Ok(Bytes::from(tree_bytes))
    }
}

impl Unpackable for Tree {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut records = BTreeMap::new();

        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            let n = reader.read_until(b' ', &mut mode_bytes)?;
            if n == 0 {
                break; // clean EOF, no more records
            }
            if mode_bytes.pop() != Some(b' ') {
                anyhow::bail!("unexpected EOF in tree record mode");
            }

            let mode_str = std::str::from_utf8(&mode_bytes)?;
            let mode = EntryMode::from_octal_str(mode_str)?;

            name_bytes.clear();
            let n = reader.read_until(b'\0', &mut name_bytes)?;
            if n == 0 || name_bytes.pop() != Some(b'\0') {
                anyhow::bail!("unexpected EOF in tree record name");
            }
            let name = std::str::from_utf8(&name_bytes)?.to_owned();

            let oid = ObjectId::read_raw_from(&mut reader)
                .context("unexpected EOF in tree record object id")?;

            records.insert(name, TreeRecord::new(oid, mode));
        }

        Ok(Tree {
            records,
            nodes: BTreeMap::new(),
        })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        if !self.records.is_empty() {
            return self
                .records
                .iter()
                .map(|(name, record)| {
                    let object_type = if record.mode.is_tree() {
                        ObjectType::Tree
                    } else {
                        ObjectType::Blob
                    };
                    format!(
                        "{} {} {}\t{}",
                        record.mode.as_str(),
                        object_type.as_str(),
                        record.oid.as_ref(),
                        name
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
        }

        self.nodes
            .iter()
            .map(|(name, node)| {
                format!(
                    "{} {} {}\t{}",
                    node.mode().as_str(),
                    node.object_type().as_str(),
                    node.oid().unwrap_or_default().as_ref(),
                    name.trim_end_matches('/')
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
