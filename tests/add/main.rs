#[path = "../common/mod.rs"]
mod common;

mod add_files_from_nested_directories;
mod add_is_idempotent_on_index_bytes;
mod add_outside_repository_fails;
mod add_single_file_to_index;
mod adding_a_non_existent_path_fails;
mod ignored_files_are_not_staged;
mod keep_deleted_files_without_all_flag;
mod remove_deleted_files_with_all_flag;
