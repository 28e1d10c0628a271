#[path = "../common/mod.rs"]
mod common;

mod add_commit_push_round_trip;
mod clone_checks_out_the_source_tree;
mod fetch_updates_tracking_refs;
mod ls_files_after_clone;
mod push_non_fast_forward_is_rejected;
mod push_up_to_date_succeeds;
mod status_after_clone_reports_untracked_file;
