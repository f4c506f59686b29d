use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";
pub const COMMIT_DATE_DISPLAY: &str = "Sun Jan 1 12:00:00 2023 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Repository with one commit tracking `1.txt` and `a/2.txt`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one\n".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two\n".to_string(),
    ));

    for file in ["1.txt", "a/2.txt"] {
        run_gitlet_command(repository_dir.path(), &["add", file])
            .assert()
            .success();
    }

    gitlet_commit(repository_dir.path(), "Initial files")
        .assert()
        .success();

    repository_dir
}

pub fn run_gitlet_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitlet").expect("Failed to find gitlet binary");
    cmd.envs(vec![("NO_PAGER", "1"), ("GITLET_COMMIT_DATE", COMMIT_DATE)]);
    cmd.env_remove("GITLET_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn gitlet_commit(dir: &Path, message: &str) -> Command {
    run_gitlet_command(dir, &["commit", message])
}

/// Write, stage and commit one file
pub fn commit_file(dir: &Path, path: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(path), content.to_string()));
    run_gitlet_command(dir, &["add", path]).assert().success();
    gitlet_commit(dir, message).assert().success();
}

/// Commit id the current branch points at
pub fn get_head_commit_id(dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let refs_dir = dir.join(".gitlet").join("refs");
    let branch = std::fs::read_to_string(refs_dir.join("HEAD"))?;
    let commit_id = std::fs::read_to_string(refs_dir.join("branches").join(branch.trim()))?;

    Ok(commit_id.trim().to_string())
}

/// Commit ids printed by `log`, newest first
pub fn get_log_commit_ids(dir: &Path) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let output = run_gitlet_command(dir, &["log"]).output()?;
    let stdout = String::from_utf8(output.stdout)?;

    Ok(stdout
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .map(str::to_string)
        .collect())
}
