//! Group-space: the bounded-size connected-component tracker built atop
//! the [`crate::bfm::Bfm`] and the [`crate::rope_graph::RopeGraph`].
//!
//! Where vertex-space tracks unbounded maximal components, group-space
//! partitions tracked vertices into groups of at most `L` members
//! (`grouplimit`), and tracks the inter-group adjacency separately via a
//! rope graph so coarse connectivity queries stay amortised O(1) except
//! when a group's internal connectivity changes (`repair`).

use std::collections::{HashMap, HashSet};

use crate::bfm::{Bfm, BfmOptions};
use crate::grid::CellData;
use crate::ids::IdAllocator;
use crate::rope_graph::{GroupId, RopeGraph};
use crate::vertex::{Vertex, VertexHash, VertexHasher};

/// Callbacks fired around group-space mutations, mirroring the shape of
/// [`crate::vertex_space::VertexSpaceCallbacks`] for groups: the same
/// lifecycle hooks apply by analogy, keyed by [`GroupId`] instead of a
/// graph id.
pub trait GroupSpaceCallbacks<Cell> {
    fn group_new(&mut self, _id: GroupId) {}
    fn group_append(&mut self, _id: GroupId, _hash: VertexHash) {}
    fn group_delete_pre(&mut self, _id: GroupId) {}
    fn group_delete_post(&mut self, _id: GroupId) {}
    fn group_assign(&mut self, _id: GroupId, _hashes: &[VertexHash]) {}
    fn enter(&mut self) {}
    fn exit(&mut self) {}
}

impl<Cell> GroupSpaceCallbacks<Cell> for () {}

/// The bounded-size connectivity tracker.
pub struct GroupSpace<Cell, S, T, CB> {
    ropegraph: RopeGraph,
    maptogroup: HashMap<VertexHash, GroupId>,
    groups: HashMap<GroupId, HashMap<VertexHash, Vertex<Cell>>>,
    ids: IdAllocator,
    grouplimit: usize,
    successor: S,
    testvertex: T,
    hasher: VertexHasher<Cell>,
    callbacks: CB,
}

impl<Cell, S, T, CB> GroupSpace<Cell, S, T, CB>
where
    Cell: CellData,
    S: FnMut(&Vertex<Cell>, &VertexHash) -> HashMap<VertexHash, Vertex<Cell>>,
    T: FnMut(&Vertex<Cell>, &VertexHash) -> bool,
    CB: GroupSpaceCallbacks<Cell>,
{
    pub fn new(grouplimit: usize, successor: S, testvertex: T, callbacks: CB) -> Self {
        Self {
            ropegraph: RopeGraph::new(),
            maptogroup: HashMap::new(),
            groups: HashMap::new(),
            ids: IdAllocator::new(),
            grouplimit,
            successor,
            testvertex,
            hasher: VertexHasher::new(),
            callbacks,
        }
    }

    pub fn hash_of(&self, vertex: &Vertex<Cell>) -> VertexHash {
        self.hasher.hash(vertex)
    }

    pub fn whichgroup(&self, hash: VertexHash) -> Option<GroupId> {
        self.maptogroup.get(&hash).copied()
    }

    pub fn groupof(&self, id: GroupId) -> Option<impl Iterator<Item = &Vertex<Cell>>> {
        self.groups.get(&id).map(|members| members.values())
    }

    pub fn group_size(&self, id: GroupId) -> Option<usize> {
        self.groups.get(&id).map(|members| members.len())
    }

    /// Neighbouring group ids, via the rope graph's `successor`.
    pub fn rope_successor(&self, group: GroupId) -> impl Iterator<Item = GroupId> + '_ {
        self.ropegraph.successor(group)
    }

    pub fn rope_graph(&self) -> &RopeGraph {
        &self.ropegraph
    }

    /// Insert a previously-untracked vertex.
    pub fn add(&mut self, vertex: Vertex<Cell>, hash: VertexHash) -> bool {
        self.callbacks.enter();
        if self.maptogroup.contains_key(&hash) {
            self.callbacks.exit();
            return false;
        }

        let limit = self.grouplimit;
        let Self {
            maptogroup,
            groups,
            ropegraph,
            ids,
            successor,
            callbacks,
            ..
        } = self;

        let successors = successor(&vertex, &hash);
        let mut successor_groups: HashMap<VertexHash, Option<GroupId>> = HashMap::new();
        let mut home: Option<GroupId> = None;
        for shash in successors.keys() {
            let g = maptogroup.get(shash).copied();
            if g.is_none() {
                tracing::warn!(hash = %shash, "group-space add: untracked successor, ignored for placement");
            }
            successor_groups.insert(*shash, g);
            if home.is_none() {
                if let Some(gid) = g {
                    let size = groups.get(&gid).map_or(0, |m| m.len());
                    if size < limit {
                        home = Some(gid);
                    }
                }
            }
        }

        let home_id = match home {
            Some(g) => g,
            None => {
                let new_id = ids.allocate();
                callbacks.group_new(new_id);
                new_id
            }
        };

        groups.entry(home_id).or_default().insert(hash, vertex.clone());
        maptogroup.insert(hash, home_id);
        callbacks.group_append(home_id, hash);
        ropegraph.update(hash, home_id, &successor_groups);

        callbacks.exit();
        true
    }

    /// Re-examine a tracked-or-untracked vertex after a mutation
    /// notification, treating the mutation's `alive` flag as the same
    /// thing `vertex-space` calls `isalive`.
    ///
    /// Group-space exposes no separate `remove` operation, so a vertex's
    /// death is reported the same way as any other connectivity-affecting
    /// mutation: through `update`, which always defers to `repair` while
    /// the dying vertex is still nominally a member of its group. `repair`
    /// itself is what drops it for good (see its doc comment).
    pub fn update(&mut self, vertex: Vertex<Cell>, hash: VertexHash) {
        let group = self.maptogroup.get(&hash).copied();
        let is_alive = (self.testvertex)(&vertex, &hash);
        match group {
            None if !is_alive => {}
            None => {
                self.add(vertex, hash);
            }
            Some(g) => {
                self.repair(g);
            }
        }
    }

    /// Detect whether `group` has split after a mutation and, if so,
    /// rebuild the partition. Returns `true` if `group` is no longer valid
    /// (it split or was invalid to begin with).
    ///
    /// A member whose `testvertex` now fails is never re-materialised into
    /// a residual group of its own (step 6): it is unmapped along with
    /// every other former member when `group` is torn down, and the
    /// residual loop drops its hash instead of flooding from it. This is
    /// the mechanism by which a dead vertex actually leaves group-space —
    /// this crate's `update` has no separate removal path (see its doc
    /// comment).
    pub fn repair(&mut self, group: GroupId) -> bool {
        self.callbacks.enter();
        let Some(original_members) = self.groups.get(&group).cloned() else {
            tracing::warn!(group = %group, "group-space repair: unknown group");
            self.callbacks.exit();
            return false;
        };
        if original_members.is_empty() {
            tracing::warn!(group = %group, "group-space repair: called on an empty group");
            self.callbacks.exit();
            return false;
        }

        let limit = self.grouplimit;
        // Prefer seeding the exhaustive flood from a still-live member: a
        // member whose `testvertex` now fails has typically already lost
        // its live edges (that is how its death was detected in the first
        // place), so seeding from it would only ever find itself.
        let (seed_hash, seed_vertex) = original_members
            .iter()
            .find(|&(h, v)| (self.testvertex)(v, h))
            .or_else(|| original_members.iter().next())
            .map(|(h, v)| (*h, v.clone()))
            .expect("checked non-empty above");
        let mut remaining: HashSet<VertexHash> = original_members.keys().copied().collect();

        let found = {
            let Self {
                maptogroup,
                successor,
                ..
            } = self;
            let wrapped = |v: &Vertex<Cell>, h: &VertexHash| -> HashMap<VertexHash, Vertex<Cell>> {
                successor(v, h)
                    .into_iter()
                    .filter(|(sh, _)| maptogroup.get(sh) == Some(&group))
                    .collect()
            };
            struct TrackRemaining<'a> {
                remaining: &'a mut HashSet<VertexHash>,
            }
            impl<'a, Cell> crate::bfm::BfmCallbacks<Vertex<Cell>, VertexHash> for TrackRemaining<'a> {
                fn visitor(&mut self, _v: &Vertex<Cell>, h: &VertexHash) {
                    self.remaining.remove(h);
                }
            }
            let cb = TrackRemaining {
                remaining: &mut remaining,
            };
            let mut bfm = Bfm::new(
                Some((seed_vertex, seed_hash)),
                wrapped,
                cb,
                BfmOptions {
                    vertex_limit: Some(limit),
                },
            );
            bfm.run();
            if bfm.stats().frontier_remaining > 0 {
                tracing::warn!(
                    group = %group,
                    "group-space repair: frontier remained after a size-bounded repair"
                );
            }
            bfm.into_visited().unwrap_or_default()
        };

        if remaining.is_empty() {
            self.callbacks.exit();
            return false;
        }

        self.callbacks.group_delete_pre(group);
        for hash in original_members.keys() {
            self.ropegraph.update(*hash, group, &HashMap::new());
            self.maptogroup.remove(hash);
        }
        self.groups.remove(&group);
        self.callbacks.group_delete_post(group);

        // A fragment with no live member left (the seed was forced onto a
        // dead vertex because nothing else in the group was alive) is
        // dropped rather than materialised: group-space has no standing
        // group of purely dead vertices.
        if found.iter().any(|(h, v)| (self.testvertex)(v, h)) {
            self.materialize_group(found);
        }

        while let Some(&next_hash) = remaining.iter().next() {
            remaining.remove(&next_hash);
            if self.maptogroup.contains_key(&next_hash) {
                continue;
            }
            let Some(next_vertex) = original_members.get(&next_hash) else {
                continue;
            };
            let next_vertex = next_vertex.clone();
            if !(self.testvertex)(&next_vertex, &next_hash) {
                continue;
            }

            let visited = {
                let Self {
                    maptogroup,
                    successor,
                    ..
                } = self;
                let wrapped = |v: &Vertex<Cell>, h: &VertexHash| -> HashMap<VertexHash, Vertex<Cell>> {
                    successor(v, h)
                        .into_iter()
                        .filter(|(sh, _)| {
                            original_members.contains_key(sh) && maptogroup.get(sh).is_none()
                        })
                        .collect()
                };
                let mut bfm = Bfm::new(
                    Some((next_vertex, next_hash)),
                    wrapped,
                    (),
                    BfmOptions {
                        vertex_limit: Some(limit),
                    },
                );
                bfm.run();
                bfm.into_visited().unwrap_or_default()
            };

            for h in visited.keys() {
                remaining.remove(h);
            }
            if !visited.is_empty() {
                self.materialize_group(visited);
            }
        }

        self.callbacks.exit();
        true
    }

    /// Materialise a fresh group from `members`, registering each member's
    /// group membership and rope-graph adjacency.
    fn materialize_group(&mut self, members: HashMap<VertexHash, Vertex<Cell>>) -> GroupId {
        let new_id = self.ids.allocate();
        self.callbacks.group_new(new_id);
        let hashes: Vec<VertexHash> = members.keys().copied().collect();

        let Self {
            maptogroup,
            groups,
            ropegraph,
            successor,
            ..
        } = self;

        for hash in members.keys() {
            maptogroup.insert(*hash, new_id);
        }
        groups.insert(new_id, members.clone());

        for (hash, vertex) in &members {
            let succs = successor(vertex, hash);
            let succ_groups: HashMap<VertexHash, Option<GroupId>> = succs
                .keys()
                .map(|s| (*s, maptogroup.get(s).copied()))
                .collect();
            ropegraph.update(*hash, new_id, &succ_groups);
        }

        self.callbacks.group_assign(new_id, &hashes);
        new_id
    }
}

#[cfg(test)]
#[path = "unit_tests/group_space.rs"]
mod tests;
