use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

/// Lazy walk from a commit to the root along first parents
///
/// Each step loads one commit; a commit that cannot be loaded is yielded as
/// an error and ends the walk.
#[derive(Clone)]
pub struct History<'d> {
    database: &'d Database,
    current_commit_oid: Option<ObjectId>,
}

impl<'d> History<'d> {
    pub fn new(database: &'d Database, start: ObjectId) -> Self {
        History {
            database,
            current_commit_oid: Some(start),
        }
    }
}

impl Iterator for History<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.current_commit_oid.take()?;

        match self.database.get_commit(&commit_oid) {
            Ok(commit) => {
                self.current_commit_oid = commit.parent().cloned();
                Some(Ok((commit_oid, commit)))
            }
            Err(error) => Some(Err(error)),
        }
    }
}

/// Every stored commit, in storage enumeration order
pub fn all_commits(database: &Database) -> anyhow::Result<Vec<(ObjectId, Commit)>> {
    database
        .commit_ids()?
        .into_iter()
        .map(|commit_oid| {
            let commit = database.get_commit(&commit_oid)?;
            Ok((commit_oid, commit))
        })
        .collect()
}
