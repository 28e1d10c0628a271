#[path = "../common/mod.rs"]
mod common;

mod commit_appends_reflog_message;
mod commit_then_status_is_clean;
mod commit_while_head_ref_is_locked_fails;
mod root_commit_has_no_parents;
mod second_commit_references_the_first;
