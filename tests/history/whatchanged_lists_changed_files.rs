use crate::common::command::{repository_dir, run_sgit_command, sgit_commit, sgit_stdout};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn whatchanged_lists_changed_files(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_sgit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    for (file, message) in [
        ("alpha.txt", "Add alpha"),
        ("beta.txt", "Add beta"),
        ("gamma.txt", "Add gamma"),
    ] {
        write_file(FileSpec::new(
            repository_dir.path().join(file),
            file.to_string(),
        ));
        run_sgit_command(repository_dir.path(), &["add", file])
            .assert()
            .success();
        sgit_commit(repository_dir.path(), message).assert().success();
    }

    let output = sgit_stdout(repository_dir.path(), &["whatchanged"]);

    // newest first, each commit listing exactly the file it introduced
    let gamma_at = output.find(":gamma.txt").expect("gamma change missing");
    let beta_at = output.find(":beta.txt").expect("beta change missing");
    let alpha_at = output.find(":alpha.txt").expect("alpha change missing");
    assert!(gamma_at < beta_at && beta_at < alpha_at);

    assert!(output.contains("Add gamma"));
    assert!(output.contains("tree "));

    // the limit applies per commit, not per file
    let limited = sgit_stdout(repository_dir.path(), &["whatchanged", "-n", "1"]);
    assert_eq!(limited.matches("commit ").count(), 1);
    assert!(limited.contains(":gamma.txt"));
    assert!(!limited.contains(":beta.txt"));

    Ok(())
}
