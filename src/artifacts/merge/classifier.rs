use crate::artifacts::objects::object_id::ObjectId;

/// What a merge does with one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// Leave the current version, present or not, untouched
    Keep,
    /// Check out and stage the other branch's version
    TakeOther(ObjectId),
    /// Stop tracking the path and delete it from the working tree
    Remove,
    /// Both sides changed the path differently; `None` marks a deleted side
    Conflict {
        current: Option<ObjectId>,
        other: Option<ObjectId>,
    },
}

/// Classify one path by its blob id (or absence) in the split point, the
/// current tip and the other tip
///
/// A side has changed when its id differs from the split point's, absence
/// included. A path added on both sides with different content is a conflict.
pub fn classify(
    split: Option<&ObjectId>,
    current: Option<&ObjectId>,
    other: Option<&ObjectId>,
) -> MergeAction {
    let changed_in_current = current != split;
    let changed_in_other = other != split;

    match (changed_in_current, changed_in_other) {
        (false, true) => match other {
            Some(other) => MergeAction::TakeOther(other.clone()),
            None => MergeAction::Remove,
        },
        (true, true) if current != other => MergeAction::Conflict {
            current: current.cloned(),
            other: other.cloned(),
        },
        _ => MergeAction::Keep,
    }
}
