use crate::common::command::{init_repository_dir, run_sgit_command, sgit_commit};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn commit_appends_reflog_message(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    write_file(FileSpec::new(
        repository_dir.path().join("2nd.txt"),
        "second".to_string(),
    ));
    run_sgit_command(repository_dir.path(), &["add", "2nd.txt"])
        .assert()
        .success();
    sgit_commit(repository_dir.path(), "Second commit\n\nwith a body")
        .assert()
        .success();

    let reflog = std::fs::read_to_string(
        repository_dir
            .path()
            .join(".git")
            .join("logs")
            .join("refs")
            .join("heads")
            .join("master"),
    )?;
    let lines = reflog.lines().collect::<Vec<_>>();

    assert_eq!(lines.len(), 2);
    assert!(
        lines[0].ends_with("\tcommit: Initial commit"),
        "unexpected reflog line: {}",
        lines[0]
    );
    // only the first line of the message makes it into the reflog
    assert!(
        lines[1].ends_with("\tcommit: Second commit"),
        "unexpected reflog line: {}",
        lines[1]
    );

    Ok(())
}
