use std::io::BufRead;

/// Kind tag carried in every serialized object header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Tree => "tree",
            ObjectType::Commit => "commit",
        }
    }

    /// Consume the `<type> <size>\0` header from a reader positioned at the
    /// start of a decompressed object and return the parsed type.
    pub fn parse_header(reader: &mut impl BufRead) -> anyhow::Result<Self> {
        let mut type_bytes = Vec::new();
        reader.read_until(b' ', &mut type_bytes)?;
        if type_bytes.pop() != Some(b' ') {
            anyhow::bail!("truncated object header");
        }

        let mut size_bytes = Vec::new();
        reader.read_until(b'\0', &mut size_bytes)?;
        if size_bytes.pop() != Some(b'\0') {
            anyhow::bail!("truncated object header");
        }

        match type_bytes.as_slice() {
            b"blob" => Ok(ObjectType::Blob),
            b"tree" => Ok(ObjectType::Tree),
            b"commit" => Ok(ObjectType::Commit),
            other => anyhow::bail!("unknown object type: {}", String::from_utf8_lossy(other)),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
