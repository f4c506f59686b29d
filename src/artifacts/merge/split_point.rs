//! Split point search
//!
//! The split point of two commits is their nearest common ancestor, the
//! baseline of a three-way merge. Ancestry follows every parent edge, so both
//! sides of earlier merges are explored.
//!
//! ## Algorithm
//!
//! 1. Collect the full ancestor set of the first tip (the tip included)
//! 2. Walk breadth-first from the second tip in generation order; every commit
//!    found in that set is a common ancestor and is not expanded further
//! 3. Mark every proper ancestor of a common ancestor found in step 2 as
//!    stale, since a closer common ancestor exists
//! 4. Return the first common ancestor, in visit order, that is not stale
//!
//! If the second tip is an ancestor of the first, it is its own split point,
//! and symmetrically for the first tip.
//!
//! ## Debug Logging
//!
//! Building with the `debug_merge` feature traces every visited commit and
//! its state at the `trace` level.

use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// Trace the search, enabled with the `debug_merge` feature
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            tracing::trace!($($arg)*);
        }
    };
}

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const VISITED_FROM_SOURCE = 0b01;
        const VISITED_FROM_TARGET = 0b10;
        const VISITED_FROM_BOTH = Self::VISITED_FROM_SOURCE.bits() | Self::VISITED_FROM_TARGET.bits();
        const STALE = 0b100; // a closer common ancestor exists
        const RESULT = 0b1000; // common ancestor on the search frontier
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::VISITED_FROM_SOURCE) {
            flags.push("SOURCE");
        }
        if self.contains(VisitState::VISITED_FROM_TARGET) {
            flags.push("TARGET");
        }
        if self.contains(VisitState::STALE) {
            flags.push("STALE");
        }
        if self.contains(VisitState::RESULT) {
            flags.push("RESULT");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Finds the split point of two commits
///
/// Generic over the function loading the parent ids of a commit, so the
/// search runs the same over the object store and over in-memory graphs.
/// Loaded parent lists are cached for the lifetime of the finder.
pub struct SplitPointFinder<ParentsLoaderFn>
where
    ParentsLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    parents_loader: ParentsLoaderFn,
    parents_cache: RefCell<HashMap<ObjectId, Vec<ObjectId>>>,
}

impl<ParentsLoaderFn> SplitPointFinder<ParentsLoaderFn>
where
    ParentsLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    pub fn new(parents_loader: ParentsLoaderFn) -> Self {
        Self {
            parents_loader,
            parents_cache: RefCell::new(HashMap::new()),
        }
    }

    fn parents(&self, commit_id: &ObjectId) -> anyhow::Result<Vec<ObjectId>> {
        if let Some(parents) = self.parents_cache.borrow().get(commit_id) {
            return Ok(parents.clone());
        }

        let parents = (self.parents_loader)(commit_id)?;
        self.parents_cache
            .borrow_mut()
            .insert(commit_id.clone(), parents.clone());

        Ok(parents)
    }

    /// Mark `start` and all of its ancestors with `flag`
    ///
    /// Commits already carrying the flag are not expanded again.
    fn mark_ancestors(
        &self,
        states: &mut HashMap<ObjectId, VisitState>,
        start: Vec<ObjectId>,
        flag: VisitState,
    ) -> anyhow::Result<()> {
        let mut queue = VecDeque::from(start);

        while let Some(commit_id) = queue.pop_front() {
            let state = states.entry(commit_id.clone()).or_insert(VisitState::NONE);
            if state.contains(flag) {
                continue;
            }
            *state |= flag;

            queue.extend(self.parents(&commit_id)?);
        }

        Ok(())
    }

    /// Nearest common ancestor of `tip_a` and `tip_b`
    ///
    /// `None` only when the two histories share no commit at all.
    pub fn find_split_point(
        &self,
        tip_a: &ObjectId,
        tip_b: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let mut states = HashMap::<ObjectId, VisitState>::new();
        self.mark_ancestors(&mut states, vec![tip_a.clone()], VisitState::VISITED_FROM_SOURCE)?;

        let mut common_ancestors = Vec::new();
        let mut queue = VecDeque::from([tip_b.clone()]);

        while let Some(commit_id) = queue.pop_front() {
            let state = states.entry(commit_id.clone()).or_insert(VisitState::NONE);
            if state.contains(VisitState::VISITED_FROM_TARGET) {
                continue;
            }
            *state |= VisitState::VISITED_FROM_TARGET;

            debug_log!("Processing commit {}: state={}", &commit_id, state);

            if state.contains(VisitState::VISITED_FROM_BOTH) {
                *state |= VisitState::RESULT;
                common_ancestors.push(commit_id);
                continue;
            }

            queue.extend(self.parents(&commit_id)?);
        }

        for common_ancestor in &common_ancestors {
            let parents = self.parents(common_ancestor)?;
            self.mark_ancestors(&mut states, parents, VisitState::STALE)?;
        }

        debug_log!(
            "Common ancestors: {}",
            common_ancestors
                .iter()
                .map(|oid| format!("{}: {}", oid, states[oid]))
                .collect::<Vec<_>>()
                .join(", ")
        );

        let split_point = common_ancestors.into_iter().find(|commit_id| {
            !states
                .get(commit_id)
                .copied()
                .unwrap_or(VisitState::NONE)
                .contains(VisitState::STALE)
        });

        tracing::debug!(%tip_a, %tip_b, split_point = ?split_point, "found split point");

        Ok(split_point)
    }
}
