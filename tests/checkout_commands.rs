use crate::common::command::{
    commit_file, get_head_commit_id, get_log_commit_ids, init_repository_dir, run_gitlet_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

mod common;

#[rstest]
fn checkout_file_restores_the_head_version(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "scribbles\n".to_string()));

    run_gitlet_command(dir, &["checkout", "--", "1.txt"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(read_file(&dir.join("1.txt")), "one\n");
}

#[rstest]
fn checkout_file_from_an_abbreviated_commit_id(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let first = get_head_commit_id(dir)?;
    commit_file(dir, "1.txt", "one, revised\n", "Revise 1");

    run_gitlet_command(dir, &["checkout", &first[..8], "--", "1.txt"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(read_file(&dir.join("1.txt")), "one\n");

    Ok(())
}

#[rstest]
#[case(&["checkout", "--", "missing.txt"], "File does not exist in that commit.\n")]
#[case(&["checkout", "0000000", "--", "1.txt"], "No commit with that id exists.\n")]
#[case(&["checkout", "ghost"], "No such branch exists.\n")]
#[case(&["checkout", "main"], "No need to checkout the current branch.\n")]
#[case(&["checkout"], "Incorrect operands.\n")]
fn checkout_failures(init_repository_dir: TempDir, #[case] args: &[&str], #[case] message: &str) {
    run_gitlet_command(init_repository_dir.path(), args)
        .assert()
        .success()
        .stdout(predicate::eq(message));
}

#[rstest]
fn checkout_branch_replaces_the_working_tree(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    commit_file(dir, "a/main_only.txt", "main\n", "Main only");

    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(!dir.join("a").join("main_only.txt").exists());
    assert_eq!(read_file(&dir.join("a").join("2.txt")), "two\n");

    run_gitlet_command(dir, &["checkout", "main"]).assert().success();
    assert_eq!(read_file(&dir.join("a").join("main_only.txt")), "main\n");
}

#[rstest]
fn checkout_branch_with_untracked_file_in_the_way_changes_nothing(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    commit_file(dir, "f.txt", "tracked\n", "Track f");
    run_gitlet_command(dir, &["checkout", "other"]).assert().success();
    write_file(FileSpec::new(dir.join("f.txt"), "untracked\n".to_string()));

    run_gitlet_command(dir, &["checkout", "main"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "There is an untracked file in the way; delete it, or add and commit it first.\n",
        ));

    assert_eq!(read_file(&dir.join("f.txt")), "untracked\n");
    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("*other\n"));
}

#[rstest]
fn reset_moves_the_branch_and_restores_the_snapshot(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let target = get_head_commit_id(dir)?;
    commit_file(dir, "later.txt", "later\n", "Later work");

    run_gitlet_command(dir, &["reset", &target])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(get_head_commit_id(dir)?, target);
    assert!(!dir.join("later.txt").exists());
    assert_eq!(get_log_commit_ids(dir)?.first(), Some(&target));

    run_gitlet_command(dir, &["reset", "fffffff"])
        .assert()
        .success()
        .stdout(predicate::eq("No commit with that id exists.\n"));

    Ok(())
}
