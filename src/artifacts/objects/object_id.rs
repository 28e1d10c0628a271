//! Object identifier (SHA-1 hash)
//!
//! An object id is the 20-byte SHA-1 of an object's serialized form,
//! carried here as its 40-character hexadecimal rendering. Equality is
//! byte equality. Loose objects live at
//! `.git/objects/<first-2-chars>/<remaining-38-chars>`.

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object id from its hexadecimal form.
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            anyhow::bail!("invalid object id length: {}", id.len());
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            anyhow::bail!("invalid object id characters: {}", id);
        }
        Ok(Self(id))
    }

    /// Write the id as 20 raw bytes, used inside tree and index records.
    pub fn write_raw_to<W: io::Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        for i in (0..OBJECT_ID_LENGTH).step_by(2) {
            let byte = u8::from_str_radix(&self.0[i..i + 2], 16)
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "invalid hex digit"))?;
            writer.write_all(&[byte])?;
        }

        Ok(())
    }

    /// Read an id from its 20-byte raw form.
    pub fn read_raw_from<R: io::Read + ?Sized>(reader: &mut R) -> anyhow::Result<Self> {
        let mut raw = [0u8; OBJECT_ID_LENGTH / 2];
        reader.read_exact(&mut raw)?;

        let mut hex = String::with_capacity(OBJECT_ID_LENGTH);
        for byte in raw {
            hex.push_str(&format!("{:02x}", byte));
        }

        Self::try_parse(hex)
    }

    /// Path of the loose object relative to the objects directory,
    /// e.g. `abc123...` becomes `ab/c123...`.
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// The standard 7-character abbreviation.
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
