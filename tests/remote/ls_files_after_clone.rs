use crate::common::command::{repository_dir, run_sgit_command, sgit_commit, sgit_stdout};
use crate::common::file::{FileSpec, write_file, write_generated_files};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn ls_files_after_clone(
    repository_dir: TempDir,
    #[from(repository_dir)] clone_parent: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = repository_dir;

    run_sgit_command(source.path(), &["init"]).assert().success();
    write_generated_files(source.path(), 8);
    run_sgit_command(source.path(), &["add", "."])
        .assert()
        .success();
    sgit_commit(source.path(), "Eight tracked files")
        .assert()
        .success();

    run_sgit_command(
        clone_parent.path(),
        &[
            "clone",
            source.path().to_str().expect("path is valid UTF-8"),
            "cloned",
        ],
    )
    .assert()
    .success();
    let cloned = clone_parent.path().join("cloned");

    let listing = sgit_stdout(&cloned, &["ls-files"]);
    assert_eq!(listing.lines().count(), 8);
    assert!(listing.lines().all(|line| line.starts_with("H ")));

    // one new file on disk makes it nine
    write_file(FileSpec::new(cloned.join("ninth.txt"), "nine".to_string()));
    let listing = sgit_stdout(&cloned, &["ls-files"]);
    assert_eq!(listing.lines().count(), 9);
    assert!(listing.contains("? ninth.txt"));

    Ok(())
}
