use crate::areas::repository::Repository;
use crate::artifacts::log::history::all_commits;
use crate::errors::RepositoryError;

impl Repository {
    /// Print the id of every commit whose message is exactly `message`
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        let matching = all_commits(self.database())?
            .into_iter()
            .filter(|(_, commit)| commit.message() == message)
            .map(|(commit_oid, _)| commit_oid)
            .collect::<Vec<_>>();

        if matching.is_empty() {
            return Err(RepositoryError::NoCommitWithMessage.into());
        }

        for commit_oid in matching {
            writeln!(self.writer(), "{}", commit_oid)?;
        }

        Ok(())
    }
}
