//! Branch and symbolic ref names
//!
//! Validation and conversion between the user-facing branch name
//! (`master`, `feature/x`) and the full ref form (`refs/heads/master`).

pub mod branch_name;

/// Regex pattern for invalid characters and shapes in branch names
pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";
