use crate::common::command::{repository_dir, run_gitlet_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

#[rstest]
fn init_creates_repository_directory(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let gitlet_dir = repository_dir.path().join(".gitlet");
    assert!(gitlet_dir.join("refs").join("HEAD").is_file());
    assert_eq!(
        std::fs::read_to_string(gitlet_dir.join("refs").join("HEAD"))?.trim(),
        "main"
    );
    assert!(gitlet_dir.join("refs").join("branches").join("main").is_file());

    Ok(())
}

#[rstest]
fn init_twice_reports_existing_repository(repository_dir: TempDir) {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "A Gitlet version-control system already exists in the current directory.\n",
        ));
}

#[rstest]
fn two_repositories_share_the_root_commit() -> Result<(), Box<dyn std::error::Error>> {
    let first = TempDir::new()?;
    let second = TempDir::new()?;

    for dir in [&first, &second] {
        run_gitlet_command(dir.path(), &["init"]).assert().success();
    }

    assert_eq!(
        common::command::get_head_commit_id(first.path())?,
        common::command::get_head_commit_id(second.path())?
    );

    Ok(())
}

#[rstest]
#[case(&["status"])]
#[case(&["log"])]
#[case(&["add", "f.txt"])]
#[case(&["commit", "message"])]
#[case(&["merge", "main"])]
fn commands_outside_a_repository_are_refused(repository_dir: TempDir, #[case] args: &[&str]) {
    run_gitlet_command(repository_dir.path(), args)
        .assert()
        .success()
        .stdout(predicate::eq("Not in an initialized Gitlet directory.\n"));

    assert!(!repository_dir.path().join(".gitlet").exists());
}
