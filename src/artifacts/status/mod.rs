//! Working-tree status
//!
//! Classifies every path of the repository into the product of two
//! comparisons: working directory vs. staged index (`IndexStatus`) and
//! staged index vs. HEAD tree (`RepoStatus`).

pub mod reconciler;
pub mod status_entry;
