//! Commit graph traversal
//!
//! A `RevWalk` enumerates commits reachable from its start set, minus
//! everything reachable from the uninteresting set (exclusive lower
//! bounds). Two orders are supported and compose:
//!
//! - `CommitTimeDesc`: newest commit time first;
//! - `Topo`: no parent surfaces before all of its enumerated children,
//!   with commit time breaking ties.

use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitError;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, VecDeque};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevSort {
    Topo,
    CommitTimeDesc,
}

pub struct RevWalk<'d> {
    database: &'d Database,
    starts: Vec<ObjectId>,
    uninteresting: Vec<ObjectId>,
    sorts: Vec<RevSort>,
}

impl<'d> RevWalk<'d> {
    pub fn new(database: &'d Database) -> Self {
        RevWalk {
            database,
            starts: Vec::new(),
            uninteresting: Vec::new(),
            sorts: Vec::new(),
        }
    }

    pub fn sort(&mut self, order: RevSort) {
        if !self.sorts.contains(&order) {
            self.sorts.push(order);
        }
    }

    pub fn mark_start(&mut self, oid: ObjectId) {
        self.starts.push(oid);
    }

    pub fn mark_uninteresting(&mut self, oid: ObjectId) {
        self.uninteresting.push(oid);
    }

    /// Parse a commit, surfacing unreadable or mistyped objects as
    /// `CorruptObject`.
    pub fn parse_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        self.database
            .parse_object_as_commit(oid)
            .map_err(|_| GitError::CorruptObject(oid.clone()))?
            .ok_or_else(|| GitError::CorruptObject(oid.clone()).into())
    }

    /// The tree id behind a commit-ish object.
    pub fn parse_tree(&self, oid: &ObjectId) -> anyhow::Result<ObjectId> {
        Ok(self.parse_commit(oid)?.tree_oid().clone())
    }

    fn paint(&self, tips: &[ObjectId]) -> anyhow::Result<BTreeSet<ObjectId>> {
        let mut painted = BTreeSet::new();
        let mut queue: VecDeque<ObjectId> = tips.iter().cloned().collect();

        while let Some(oid) = queue.pop_front() {
            if !painted.insert(oid.clone()) {
                continue;
            }
            let commit = self.parse_commit(&oid)?;
            queue.extend(commit.parents().iter().cloned());
        }

        Ok(painted)
    }

    /// Enumerate the walk in the configured order.
    pub fn walk(&self) -> anyhow::Result<Vec<(ObjectId, Commit)>> {
        let excluded = self.paint(&self.uninteresting)?;

        let mut commits: BTreeMap<ObjectId, Commit> = BTreeMap::new();
        let mut queue: VecDeque<ObjectId> = self.starts.iter().cloned().collect();

        while let Some(oid) = queue.pop_front() {
            if excluded.contains(&oid) || commits.contains_key(&oid) {
                continue;
            }
            let commit = self.parse_commit(&oid)?;
            queue.extend(commit.parents().iter().cloned());
            commits.insert(oid, commit);
        }

        if self.sorts.contains(&RevSort::Topo) {
            Self::topo_order(commits)
        } else {
            let mut ordered = commits.into_iter().collect::<Vec<_>>();
            ordered.sort_by(|(a_oid, a), (b_oid, b)| {
                b.timestamp()
                    .cmp(&a.timestamp())
                    .then_with(|| a_oid.cmp(b_oid))
            });
            Ok(ordered)
        }
    }

    /// Kahn's algorithm over the enumerated subgraph: a commit becomes
    /// ready once every enumerated child has been emitted; among ready
    /// commits the newest commit time wins.
    fn topo_order(commits: BTreeMap<ObjectId, Commit>) -> anyhow::Result<Vec<(ObjectId, Commit)>> {
        let mut pending_children: BTreeMap<ObjectId, usize> =
            commits.keys().map(|oid| (oid.clone(), 0)).collect();

        for commit in commits.values() {
            for parent in commit.parents() {
                if let Some(count) = pending_children.get_mut(parent) {
                    *count += 1;
                }
            }
        }

        let mut ready = BinaryHeap::new();
        for (oid, count) in &pending_children {
            if *count == 0 {
                ready.push((commits[oid].timestamp(), oid.clone()));
            }
        }

        let mut ordered = Vec::with_capacity(commits.len());
        while let Some((_, oid)) = ready.pop() {
            let commit = commits[&oid].clone();

            for parent in commit.parents() {
                if let Some(count) = pending_children.get_mut(parent) {
                    *count -= 1;
                    if *count == 0 {
                        ready.push((commits[parent].timestamp(), parent.clone()));
                    }
                }
            }

            ordered.push((oid, commit));
        }

        if ordered.len() != commits.len() {
            anyhow::bail!("commit graph contains a cycle");
        }

        Ok(ordered)
    }
}
