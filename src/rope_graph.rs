//! The rope graph: a refcounted multigraph recording, for every pair of
//! group-space groups that currently share an edge, how many edges they
//! share.
//!
//! A "rope" exists between two distinct groups whenever at least one
//! tracked vertex in one group has a successor vertex in the other. Ropes
//! are canonicalised — `(A, B)` and `(B, A)` name the same rope, the
//! lesser [`GroupId`] first — so the coarse adjacency the rope graph
//! exposes via [`RopeGraph::successor`] is a simple undirected multigraph
//! keyed by unordered pairs.

use std::collections::{HashMap, HashSet};

use crate::ids::ComponentId;
use crate::vertex::VertexHash;

/// The opaque handle group-space mints for its groups; shares its
/// representation with vertex-space's graph ids.
pub type GroupId = ComponentId;

/// One cross-group edge between two tracked vertices, canonicalised so the
/// pair `(a, b)` and `(b, a)` name the same edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    a: VertexHash,
    b: VertexHash,
}

impl Edge {
    fn canonical(a: VertexHash, b: VertexHash) -> Self {
        if a <= b {
            Edge { a, b }
        } else {
            Edge { a: b, b: a }
        }
    }
}

/// The canonical key identifying a rope: the two group ids it connects,
/// lesser first. `RopeKey::new` returns `None` for a self-pair, since a
/// group never ropes to itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct RopeKey(GroupId, GroupId);

impl RopeKey {
    fn new(a: GroupId, b: GroupId) -> Option<Self> {
        if a == b {
            None
        } else if a < b {
            Some(RopeKey(a, b))
        } else {
            Some(RopeKey(b, a))
        }
    }
}

/// A refcounted multi-edge between two distinct groups.
#[derive(Debug, Clone)]
pub struct Rope {
    a: GroupId,
    b: GroupId,
    edges: HashSet<Edge>,
}

impl Rope {
    /// The number of tracked vertex-pair edges currently composing this
    /// rope. Invariant: equals the number of `ropemap` entries pointing at
    /// it.
    pub fn count(&self) -> usize {
        self.edges.len()
    }

    pub fn groups(&self) -> (GroupId, GroupId) {
        (self.a, self.b)
    }
}

/// The inter-group multigraph.
///
/// Tracked through four tables: `vertexmap` (which edges touch a given
/// vertex), `ropemap` (which rope an edge belongs to), `ropes` (the
/// refcounted rope itself), and `groupmap` (the coarse group adjacency
/// derived from the ropes that currently exist).
#[derive(Debug, Default)]
pub struct RopeGraph {
    vertexmap: HashMap<VertexHash, HashSet<Edge>>,
    ropemap: HashMap<Edge, RopeKey>,
    ropes: HashMap<RopeKey, Rope>,
    groupmap: HashMap<GroupId, HashSet<GroupId>>,
}

impl RopeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// The neighbouring group ids of `group`, i.e. every group a rope
    /// currently connects it to. Never contains `group` itself.
    pub fn successor(&self, group: GroupId) -> impl Iterator<Item = GroupId> + '_ {
        self.groupmap
            .get(&group)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    pub fn rope_between(&self, a: GroupId, b: GroupId) -> Option<&Rope> {
        let key = RopeKey::new(a, b)?;
        self.ropes.get(&key)
    }

    /// Re-examine `hash`'s cross-group edges given its current home group
    /// and the groups of its current successors: drop every edge
    /// currently incident on `hash`, recreate one per successor that sits
    /// in a distinct group, then sweep any rope whose refcount fell to
    /// zero as a result.
    ///
    /// `successor_groups` maps each successor's [`VertexHash`] to its
    /// current group, or `None` if that successor is untracked. Calling
    /// this with an empty map is how a vertex's removal is represented
    /// ("removal of a vertex entirely is `update` with empty
    /// successor maps").
    pub fn update(
        &mut self,
        hash: VertexHash,
        home_group: GroupId,
        successor_groups: &HashMap<VertexHash, Option<GroupId>>,
    ) {
        let mut touched_ropes = HashSet::new();

        // Step 1-2: drop every edge currently incident on `hash`.
        if let Some(old_edges) = self.vertexmap.remove(&hash) {
            for edge in old_edges {
                let other = if edge.a == hash { edge.b } else { edge.a };
                if let Some(other_edges) = self.vertexmap.get_mut(&other) {
                    other_edges.remove(&edge);
                }
                if let Some(key) = self.ropemap.remove(&edge) {
                    if let Some(rope) = self.ropes.get_mut(&key) {
                        rope.edges.remove(&edge);
                    }
                    touched_ropes.insert(key);
                }
            }
        }

        // Step 3: recreate edges to every successor in a distinct group.
        for (&succ_hash, succ_group) in successor_groups {
            let Some(succ_group) = *succ_group else {
                continue;
            };
            let Some(key) = RopeKey::new(home_group, succ_group) else {
                continue;
            };

            let is_new = !self.ropes.contains_key(&key);
            let rope = self.ropes.entry(key).or_insert_with(|| Rope {
                a: key.0,
                b: key.1,
                edges: HashSet::new(),
            });
            let edge = Edge::canonical(hash, succ_hash);
            rope.edges.insert(edge);
            self.ropemap.insert(edge, key);
            self.vertexmap.entry(hash).or_default().insert(edge);
            self.vertexmap.entry(succ_hash).or_default().insert(edge);

            if is_new {
                self.groupmap.entry(key.0).or_default().insert(key.1);
                self.groupmap.entry(key.1).or_default().insert(key.0);
            }
            touched_ropes.insert(key);
        }

        // Step 4: sweep every rope this call touched; delete any whose
        // refcount fell to zero.
        for key in touched_ropes {
            let empty = self.ropes.get(&key).is_some_and(|r| r.count() == 0);
            if empty {
                self.ropes.remove(&key);
                if let Some(set) = self.groupmap.get_mut(&key.0) {
                    set.remove(&key.1);
                }
                if let Some(set) = self.groupmap.get_mut(&key.1) {
                    set.remove(&key.0);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "unit_tests/rope_graph.rs"]
mod tests;
