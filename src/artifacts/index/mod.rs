//! Staged index (dir-cache) file format
//!
//! The index records what will go into the next commit, one entry per
//! path, in canonical path order.
//!
//! ## File Format (Version 2)
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "DIRC" (4 bytes)
//!   - Version: 2 (4 bytes)
//!   - Entry count (4 bytes)
//!
//! Entries (variable length):
//!   - Each entry padded to 8-byte alignment
//!   - Contains stat metadata, object id, flags and path
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```

pub mod checksum;
pub mod entry_mode;
pub mod index_entry;
pub mod index_header;
pub mod lockfile;

/// Size of the trailing SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of the index header in bytes
pub const HEADER_SIZE: usize = 12;

/// Magic signature identifying index files
pub const SIGNATURE: &str = "DIRC";

/// Index file format version
pub const VERSION: u32 = 2;
