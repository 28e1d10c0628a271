use crate::common::command::{repository_dir, run_sgit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

// Re-staging an unchanged file keeps paths, modes, lengths, mtimes and
// object ids identical, so the serialized index is byte-for-byte stable.
#[rstest]
fn add_is_idempotent_on_index_bytes(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_sgit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    for (path, content) in [("1.txt", "one"), ("a/2.txt", "two")] {
        write_file(FileSpec::new(
            repository_dir.path().join(path),
            content.to_string(),
        ));
    }

    run_sgit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();
    let first = std::fs::read(repository_dir.path().join(".git").join("index"))?;

    run_sgit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();
    let second = std::fs::read(repository_dir.path().join(".git").join("index"))?;

    assert_eq!(first, second);

    Ok(())
}
