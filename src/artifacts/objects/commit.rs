//! Commit objects
//!
//! A commit ties a tree snapshot to its history:
//!
//! ```text
//! commit <size>\0
//! tree <tree-oid>
//! parent <parent-oid>          (zero or more)
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <message>
//! ```
//!
//! A commit without parents is a root commit; the parent list is empty in
//! that case, never a placeholder id.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::io::{BufRead, Write};

/// Author or committer identity with timestamp.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Ident {
    name: String,
    email: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Ident {
    pub fn new(name: String, email: String) -> Self {
        Ident {
            name,
            email,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    pub fn new_with_timestamp(
        name: String,
        email: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> Self {
        Ident {
            name,
            email,
            timestamp,
        }
    }

    /// Read the identity from `GIT_AUTHOR_NAME` / `GIT_AUTHOR_EMAIL`,
    /// with an optional `GIT_AUTHOR_DATE`. The current time is used when
    /// no date is given.
    pub fn load_from_env() -> anyhow::Result<Self> {
        let name = std::env::var("GIT_AUTHOR_NAME").context("GIT_AUTHOR_NAME not set")?;
        let email = std::env::var("GIT_AUTHOR_EMAIL").context("GIT_AUTHOR_EMAIL not set")?;
        let timestamp = std::env::var("GIT_AUTHOR_DATE").ok().and_then(|date_str| {
            chrono::DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| chrono::DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .ok()
        });

        match timestamp {
            Some(ts) => Ok(Ident::new_with_timestamp(name, email, ts)),
            None => Ok(Ident::new(name, email)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }

    /// `Name <email@example.com>`
    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// `Name <email> <unix-seconds> <timezone>` as written into objects.
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }
}

impl TryFrom<&str> for Ident {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        // "name <email> timestamp timezone"; split from the right so names
        // containing spaces survive
        let parts: Vec<&str> = value.rsplitn(3, ' ').collect();
        if parts.len() < 3 {
            anyhow::bail!("invalid ident format: {}", value);
        }

        let timezone = parts[0];
        let timestamp = parts[1]
            .parse::<i64>()
            .map_err(|_| anyhow::anyhow!("invalid ident timestamp"))?;
        let name_email = parts[2];

        let email_start = name_email
            .find('<')
            .ok_or_else(|| anyhow::anyhow!("invalid ident: missing '<'"))?;
        let email_end = name_email
            .find('>')
            .ok_or_else(|| anyhow::anyhow!("invalid ident: missing '>'"))?;

        let name = name_email[..email_start].trim().to_string();
        let email = name_email[email_start + 1..email_end].to_string();

        let datetime = chrono::DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| anyhow::anyhow!("invalid ident timestamp"))?;
        let datetime = chrono::DateTime::parse_from_str(
            &format!("{} {}", datetime.format("%Y-%m-%d %H:%M:%S"), timezone),
            "%Y-%m-%d %H:%M:%S %z",
        )
        .map_err(|_| anyhow::anyhow!("invalid ident timezone"))?;

        Ok(Ident {
            name,
            email,
            timestamp: datetime,
        })
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    parents: Vec<ObjectId>,
    tree_oid: ObjectId,
    author: Ident,
    committer: Ident,
    message: String,
}

impl Commit {
    pub fn new(
        parents: Vec<ObjectId>,
        tree_oid: ObjectId,
        author: Ident,
        committer: Ident,
        message: String,
    ) -> Self {
        Commit {
            parents,
            tree_oid,
            author,
            committer,
            message,
        }
    }

    /// First line of the message, for one-line displays.
    pub fn subject(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    /// Everything after the first line (and its blank separator).
    pub fn body(&self) -> String {
        self.message
            .lines()
            .skip(1)
            .skip_while(|line| line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn first_parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn author(&self) -> &Ident {
        &self.author
    }

    pub fn committer(&self) -> &Ident {
        &self.committer
    }

    /// Commit time, as recorded by the committer.
    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.committer.timestamp()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut lines = vec![format!("tree {}", self.tree_oid.as_ref())];
        for parent in &self.parents {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        lines.push(format!("author {}", self.author.display()));
        lines.push(format!("committer {}", self.committer.display()));
        lines.push(String::new());
        lines.push(self.message.to_string());

        let content = lines.join("\n");

        let mut commit_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), content.len());
        commit_bytes.write_all(header.as_bytes())?;
        commit_bytes.write_all(content.as_bytes())?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader.bytes().collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;
        let mut lines = content.lines();

        let tree_line = lines.next().context("commit is missing its tree line")?;
        let tree_oid = tree_line
            .strip_prefix("tree ")
            .context("commit has an invalid tree line")?
            .to_string();
        let tree_oid = ObjectId::try_parse(tree_oid)?;

        let mut parents = Vec::new();
        let mut next_line = lines.next().context("commit is missing its author line")?;

        while let Some(parent_oid) = next_line.strip_prefix("parent ") {
            parents.push(ObjectId::try_parse(parent_oid.to_string())?);
            next_line = lines.next().context("commit is missing its author line")?;
        }

        let author = next_line
            .strip_prefix("author ")
            .context("commit has an invalid author line")?;
        let author = Ident::try_from(author)?;

        let committer_line = lines.next().context("commit is missing its committer line")?;
        let committer = committer_line
            .strip_prefix("committer ")
            .context("commit has an invalid committer line")?;
        let committer = Ident::try_from(committer)?;

        // skip the blank separator
        lines.next();

        let message = lines.collect::<Vec<&str>>().join("\n");
        Ok(Self::new(parents, tree_oid, author, committer, message))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        let mut lines = vec![format!("tree {}", self.tree_oid.as_ref())];
        for parent in &self.parents {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        lines.push(format!("author {}", self.author.display()));
        lines.push(format!("committer {}", self.committer.display()));
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines.join("\n")
    }
}
