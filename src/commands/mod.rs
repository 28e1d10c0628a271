//! Command implementations
//!
//! Organized the way git organizes itself:
//!
//! - `plumbing`: low-level object access (cat-file, hash-object, ls-tree)
//! - `porcelain`: user-facing workflows (init, clone, fetch, push,
//!   checkout, add, commit, status, ls-files, rev-list, whatchanged)
//!
//! Each command is an `impl Repository` block that drives the engines in
//! `artifacts` and reports through the repository's writer.

pub mod plumbing;
pub mod porcelain;
