use crate::common::command::{init_repository_dir, run_sgit_command};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

// The literal argument "HEAD" does not rewrite the HEAD ref.
#[rstest]
fn checkout_head_keeps_the_symref(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    let head_path = repository_dir.path().join(".git").join("HEAD");
    let before = std::fs::read_to_string(&head_path)?;

    run_sgit_command(repository_dir.path(), &["checkout", "HEAD"])
        .assert()
        .success();

    let after = std::fs::read_to_string(&head_path)?;
    assert_eq!(before, after);
    assert!(after.starts_with("ref: "));

    Ok(())
}
