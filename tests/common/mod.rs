#![allow(dead_code)]

pub mod command;
pub mod file;

const PLAYGROUND: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/playground");

/// Keep the temp dirs on the same filesystem as the repository so atomic
/// renames inside the tests never cross a device boundary.
pub fn redirect_temp_dir() {
    std::fs::create_dir_all(PLAYGROUND).expect("Failed to create playground dir");
    unsafe {
        std::env::set_var("TMPDIR", PLAYGROUND);
    }
}
