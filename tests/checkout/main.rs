#[path = "../common/mod.rs"]
mod common;

mod checkout_head_keeps_the_symref;
mod checkout_removes_files_absent_from_target;
mod checkout_restores_deleted_files;
mod checkout_unknown_branch_fails;
mod checkout_writes_head_ref;
