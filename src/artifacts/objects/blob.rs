use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use std::io::{BufRead, Write};

/// File contents, stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Blob {
    data: Bytes,
}

impl Blob {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Blob { data: data.into() }
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Packable for Blob {
    fn serialize(&self) -> Result<Bytes> {
        let mut blob_bytes = Vec::with_capacity(self.data.len() + 16);
        let header = format!("{} {}\0", self.object_type().as_str(), self.data.len());
        blob_bytes.write_all(header.as_bytes())?;
        blob_bytes.write_all(&self.data)?;

        Ok(Bytes::from(blob_bytes))
    }
}

impl Unpackable for Blob {
    fn deserialize(reader: impl BufRead) -> Result<Self> {
        let data = reader.bytes().collect::<Result<Vec<u8>, std::io::Error>>()?;

        Ok(Blob::new(data))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn display(&self) -> String {
        String::from_utf8_lossy(&self.data).to_string()
    }
}
