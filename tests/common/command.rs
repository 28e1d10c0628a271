use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use derive_new::new;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository with three committed files: `1.txt`, `a/2.txt` and
/// `a/b/3.txt`.
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_sgit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let file1 = FileSpec::new(repository_dir.path().join("1.txt"), "one".to_string());
    write_file(file1);

    let file2 = FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    );
    write_file(file2);

    let file3 = FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    );
    write_file(file3);

    run_sgit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    sgit_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_sgit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("sgit").expect("Failed to find sgit binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

#[derive(Debug, Clone, new)]
struct RandomAuthor {
    name: String,
    email: String,
}

fn generate_random_author() -> RandomAuthor {
    use fake::Fake;
    use fake::faker::internet::en::FreeEmail;
    use fake::faker::name::en::Name;

    let name = Name().fake::<String>().replace(" ", "_");
    let email = FreeEmail().fake::<String>();
    RandomAuthor::new(name, email)
}

pub fn sgit_commit(dir: &Path, message: &str) -> Command {
    let author = generate_random_author();
    let mut cmd = run_sgit_command(dir, &["commit", "-m", message]);
    cmd.envs(vec![
        ("GIT_AUTHOR_NAME", &author.name),
        ("GIT_AUTHOR_EMAIL", &author.email),
    ]);
    cmd
}

/// Stdout of a successful sgit invocation.
pub fn sgit_stdout(dir: &Path, args: &[&str]) -> String {
    let output = run_sgit_command(dir, args).assert().success();
    String::from_utf8(output.get_output().stdout.clone()).expect("stdout is not UTF-8")
}

/// The commit id HEAD currently resolves to.
pub fn head_oid(dir: &Path) -> String {
    let head = std::fs::read_to_string(dir.join(".git").join("HEAD")).expect("missing HEAD");
    let head = head.trim();

    match head.strip_prefix("ref: ") {
        Some(ref_name) => std::fs::read_to_string(dir.join(".git").join(ref_name))
            .expect("missing branch ref")
            .trim()
            .to_string(),
        None => head.to_string(),
    }
}
