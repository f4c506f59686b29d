use crate::common::command::{commit_file, init_repository_dir, repository_dir, run_gitlet_command};
use crate::common::file::{FileSpec, delete_file, write_file, write_generated_files};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

fn status_output(
    branches: &str,
    staged: &str,
    removed: &str,
    modified: &str,
    untracked: &str,
) -> String {
    format!(
        "=== Branches ===\n{}\n\
         === Staged Files ===\n{}\n\
         === Removed Files ===\n{}\n\
         === Modifications Not Staged For Commit ===\n{}\n\
         === Untracked Files ===\n{}\n",
        branches, staged, removed, modified, untracked
    )
}

#[rstest]
fn status_of_a_clean_repository(init_repository_dir: TempDir) {
    run_gitlet_command(init_repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::eq(status_output("*main\n", "", "", "", "")));
}

#[rstest]
fn adding_a_missing_file_is_reported(init_repository_dir: TempDir) {
    run_gitlet_command(init_repository_dir.path(), &["add", "missing.txt"])
        .assert()
        .success()
        .stdout(predicate::eq("File does not exist.\n"));
}

#[rstest]
fn added_files_are_listed_as_staged_in_name_order(repository_dir: TempDir) {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let mut files = write_generated_files(repository_dir.path(), 4)
        .into_iter()
        .map(|file| {
            file.path
                .file_name()
                .unwrap()
                .to_string_lossy()
                .to_string()
        })
        .collect::<Vec<_>>();
    files.sort();

    for file in &files {
        run_gitlet_command(repository_dir.path(), &["add", file])
            .assert()
            .success();
    }

    let staged = files
        .iter()
        .map(|file| format!("{}\n", file))
        .collect::<String>();
    run_gitlet_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::eq(status_output("*main\n", &staged, "", "", "")));
}

#[rstest]
fn add_then_rm_before_any_commit_leaves_the_file_untracked(repository_dir: TempDir) {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("x"),
        "x\n".to_string(),
    ));

    run_gitlet_command(repository_dir.path(), &["add", "x"])
        .assert()
        .success();
    run_gitlet_command(repository_dir.path(), &["rm", "x"])
        .assert()
        .success();

    run_gitlet_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::eq(status_output("*main\n", "", "", "", "x\n")));
}

#[rstest]
fn rm_of_a_tracked_file_stages_removal_and_deletes_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_gitlet_command(dir, &["rm", "a/2.txt"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(!dir.join("a").join("2.txt").exists());
    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::eq(status_output("*main\n", "", "a/2.txt\n", "", "")));
}

#[rstest]
fn rm_of_an_unknown_file_is_reported(init_repository_dir: TempDir) {
    write_file(FileSpec::new(
        init_repository_dir.path().join("loose.txt"),
        "loose\n".to_string(),
    ));

    run_gitlet_command(init_repository_dir.path(), &["rm", "loose.txt"])
        .assert()
        .success()
        .stdout(predicate::eq("No reason to remove the file.\n"));
}

#[rstest]
fn reverting_a_change_unstages_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    commit_file(dir, "f.txt", "original\n", "add f");

    write_file(FileSpec::new(dir.join("f.txt"), "changed\n".to_string()));
    run_gitlet_command(dir, &["add", "f.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("f.txt"), "original\n".to_string()));
    run_gitlet_command(dir, &["add", "f.txt"]).assert().success();

    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::eq(status_output("*main\n", "", "", "", "")));
}

#[rstest]
fn unstaged_modifications_and_deletions_are_reported(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    write_file(FileSpec::new(dir.join("1.txt"), "one, edited\n".to_string()));
    delete_file(&dir.join("a").join("2.txt"));

    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::eq(status_output(
            "*main\n",
            "",
            "",
            "1.txt (modified)\na/2.txt (deleted)\n",
            "",
        )));
}
