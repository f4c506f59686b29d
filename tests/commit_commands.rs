use crate::common::command::{
    COMMIT_DATE_DISPLAY, commit_file, get_head_commit_id, get_log_commit_ids, gitlet_commit,
    init_repository_dir, run_gitlet_command,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

mod common;

#[rstest]
fn commit_advances_the_current_branch(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let parent = get_head_commit_id(dir)?;

    commit_file(dir, "b.txt", "bee\n", "Add b");

    let head = get_head_commit_id(dir)?;
    assert_ne!(head, parent);
    assert_eq!(head.len(), 40);
    assert!(
        dir.join(".gitlet")
            .join("objects")
            .join("commits")
            .join(&head)
            .is_file()
    );
    assert_eq!(get_log_commit_ids(dir)?[..2], [head, parent]);

    Ok(())
}

#[rstest]
fn commit_without_staged_changes_is_refused(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head = get_head_commit_id(dir)?;

    gitlet_commit(dir, "nothing here")
        .assert()
        .success()
        .stdout(predicate::eq("No changes added to the commit.\n"));

    assert_eq!(get_head_commit_id(dir)?, head);

    Ok(())
}

#[rstest]
fn commit_with_empty_message_is_refused(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("b.txt"), "bee\n".to_string()));
    run_gitlet_command(dir, &["add", "b.txt"]).assert().success();

    gitlet_commit(dir, "")
        .assert()
        .success()
        .stdout(predicate::eq("Please enter a commit message.\n"));
}

#[rstest]
fn identical_content_is_stored_once(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let blobs_dir = dir.join(".gitlet").join("objects").join("blobs");
    let blob_count = || std::fs::read_dir(&blobs_dir).map(|entries| entries.count());
    let before = blob_count()?;

    commit_file(dir, "copy.txt", "one\n", "Same content as 1.txt");

    assert_eq!(blob_count()?, before);

    Ok(())
}

#[rstest]
fn log_prints_the_first_parent_chain(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    commit_file(dir, "b.txt", "bee\n", "Add b");
    let ids = get_log_commit_ids(dir)?;

    let expected = format!(
        "===\ncommit {}\nDate: {}\nAdd b\n\n\
         ===\ncommit {}\nDate: {}\nInitial files\n\n\
         ===\ncommit {}\nDate: Thu Jan 1 00:00:00 1970 +0000\ninitial commit\n\n",
        ids[0], COMMIT_DATE_DISPLAY, ids[1], COMMIT_DATE_DISPLAY, ids[2]
    );

    run_gitlet_command(dir, &["log"])
        .assert()
        .success()
        .stdout(predicate::eq(expected));

    Ok(())
}

#[rstest]
fn global_log_and_find_see_commits_on_every_branch(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "side"]).assert().success();
    run_gitlet_command(dir, &["checkout", "side"]).assert().success();
    commit_file(dir, "side.txt", "side\n", "Side work");
    let side_commit = get_head_commit_id(dir)?;
    run_gitlet_command(dir, &["checkout", "main"]).assert().success();

    run_gitlet_command(dir, &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Side work").not());

    run_gitlet_command(dir, &["global-log"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("commit {}\n", side_commit)))
        .stdout(predicate::str::contains("initial commit"));

    run_gitlet_command(dir, &["find", "Side work"])
        .assert()
        .success()
        .stdout(predicate::eq(format!("{}\n", side_commit)));

    run_gitlet_command(dir, &["find", "No such message"])
        .assert()
        .success()
        .stdout(predicate::eq("Found no commit with that message.\n"));

    Ok(())
}
