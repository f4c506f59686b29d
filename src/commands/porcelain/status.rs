use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::{Status, StatusInfo};

impl Repository {
    pub fn status(&self) -> anyhow::Result<()> {
        let mut staging = self.staging();
        staging.rehydrate()?;

        let status_info = Status::new(self).initialize(&staging)?;
        drop(staging);

        self.print_branches(&status_info)?;
        self.print_section("Staged Files", status_info.staged_files.iter())?;
        self.print_section("Removed Files", status_info.removed_files.iter())?;
        self.print_section(
            "Modifications Not Staged For Commit",
            status_info
                .workspace_changeset
                .iter()
                .map(|(path, change)| format!("{} {}", path, change)),
        )?;
        self.print_section("Untracked Files", status_info.untracked_files.iter())?;

        Ok(())
    }

    fn print_branches(&self, status_info: &StatusInfo) -> anyhow::Result<()> {
        self.print_section(
            "Branches",
            status_info.branches.iter().map(|branch| {
                if branch == &status_info.current_branch {
                    format!("*{}", branch)
                } else {
                    branch.to_string()
                }
            }),
        )
    }

    fn print_section<T: std::fmt::Display>(
        &self,
        title: &str,
        lines: impl Iterator<Item = T>,
    ) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "=== {} ===", title)?;
        for line in lines {
            writeln!(writer, "{}", line)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::porcelain::fixtures::{TestRepository, repo};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn clean_repository_status(repo: TestRepository) {
        repo.repository.status().unwrap();

        assert_eq!(
            repo.output.take(),
            "=== Branches ===\n*main\n\n\
             === Staged Files ===\n\n\
             === Removed Files ===\n\n\
             === Modifications Not Staged For Commit ===\n\n\
             === Untracked Files ===\n\n"
        );
    }

    #[rstest]
    fn adding_then_removing_before_any_commit_leaves_nothing_staged(mut repo: TestRepository) {
        repo.write("x.txt", "x\n");
        repo.repository.add("x.txt").unwrap();
        repo.repository.rm("x.txt").unwrap();

        repo.repository.status().unwrap();

        assert_eq!(
            repo.output.take(),
            "=== Branches ===\n*main\n\n\
             === Staged Files ===\n\n\
             === Removed Files ===\n\n\
             === Modifications Not Staged For Commit ===\n\n\
             === Untracked Files ===\nx.txt\n\n"
        );
    }

    #[rstest]
    fn status_reports_every_section(mut repo: TestRepository) {
        repo.commit_file("tracked.txt", "v1\n", "c1");
        repo.commit_file("doomed.txt", "d\n", "c2");
        repo.commit_file("vanished.txt", "v\n", "c3");
        repo.repository.branch("other-branch").unwrap();

        repo.write("staged.txt", "s\n");
        repo.repository.add("staged.txt").unwrap();
        repo.repository.rm("doomed.txt").unwrap();
        repo.write("tracked.txt", "v2\n");
        repo.remove("vanished.txt");
        repo.write("random.stuff", "r\n");

        repo.repository.status().unwrap();

        assert_eq!(
            repo.output.take(),
            "=== Branches ===\n*main\nother-branch\n\n\
             === Staged Files ===\nstaged.txt\n\n\
             === Removed Files ===\ndoomed.txt\n\n\
             === Modifications Not Staged For Commit ===\ntracked.txt (modified)\nvanished.txt (deleted)\n\n\
             === Untracked Files ===\nrandom.stuff\n\n"
        );
    }
}
