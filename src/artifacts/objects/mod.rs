//! Content-addressed objects
//!
//! Everything the object database stores is one of three object kinds:
//! blobs (file contents), trees (directory listings) and commits. Objects
//! are serialized as `<type> <size>\0<content>`, hashed with SHA-1 and
//! stored zlib-compressed under `.git/objects/`.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of an object id in hexadecimal form
pub const OBJECT_ID_LENGTH: usize = 40;
