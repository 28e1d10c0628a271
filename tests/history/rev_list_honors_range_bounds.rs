use crate::common::command::{repository_dir, run_sgit_command, sgit_commit, sgit_stdout};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

const COMMITS: usize = 21;

// A linear history of 21 commits: the full walk yields all of them, an
// exclusive lower bound cuts off itself and its ancestors, and max-count
// truncates the stream.
#[rstest]
fn rev_list_honors_range_bounds(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_sgit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    for i in 0..COMMITS {
        write_file(FileSpec::new(
            repository_dir.path().join("counter.txt"),
            format!("revision {}", i),
        ));
        run_sgit_command(repository_dir.path(), &["add", "counter.txt"])
            .assert()
            .success();
        sgit_commit(repository_dir.path(), &format!("commit {}", i))
            .assert()
            .success();
    }

    let full = sgit_stdout(repository_dir.path(), &["rev-list"]);
    let oids = full.lines().map(str::to_string).collect::<Vec<_>>();
    assert_eq!(oids.len(), COMMITS);

    // exclusive lower bound: the bound and its ancestor drop out
    let bounded = sgit_stdout(
        repository_dir.path(),
        &["rev-list", "--from", oids[19].as_str()],
    );
    assert_eq!(bounded.lines().count(), 19);
    assert!(!bounded.contains(oids[19].as_str()));
    assert!(bounded.contains(oids[0].as_str()));

    // both bounds at once
    let ranged = sgit_stdout(
        repository_dir.path(),
        &[
            "rev-list",
            "--from",
            oids[17].as_str(),
            "--to",
            oids[0].as_str(),
        ],
    );
    assert_eq!(ranged.lines().count(), 17);

    let truncated = sgit_stdout(repository_dir.path(), &["rev-list", "-n", "5"]);
    assert_eq!(truncated.lines().count(), 5);
    assert_eq!(truncated.lines().next(), Some(oids[0].as_str()));

    Ok(())
}
