use crate::areas::repository::Repository;
use crate::artifacts::log::history::{History, all_commits};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Show the current branch's history along first parents
    pub fn log(&self) -> anyhow::Result<()> {
        let head_oid = self.refs().head_oid()?;

        for entry in History::new(self.database(), head_oid) {
            let (commit_oid, commit) = entry?;
            self.display_commit(&commit_oid, &commit)?;
        }

        Ok(())
    }

    /// Show every commit ever made, in no particular order
    pub fn global_log(&self) -> anyhow::Result<()> {
        for (commit_oid, commit) in all_commits(self.database())? {
            self.display_commit(&commit_oid, &commit)?;
        }

        Ok(())
    }

    fn display_commit(&self, commit_oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "commit {}", commit_oid)?;
        if let (Some(parent), Some(merge_parent)) = (commit.parent(), commit.merge_parent()) {
            writeln!(
                writer,
                "Merge: {} {}",
                parent.to_short_oid(),
                merge_parent.to_short_oid()
            )?;
        }
        writeln!(writer, "Date: {}", commit.timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
