//! Vertex-space: the unbounded connected-component tracker.
//!
//! Maintains, at all times, a partition of every tracked vertex into
//! maximal connected components ("graphs"), driven by [`Bfm`] runs over a
//! client-supplied successor function — typically [`crate::voxel_successor::VoxelSuccessor::successors`],
//! though vertex-space is generic over any function with that shape.

use std::collections::{HashMap, HashSet};

use crate::bfm::{Bfm, BfmCallbacks, BfmOptions};
use crate::grid::CellData;
use crate::ids::{ComponentId, IdAllocator};
use crate::vertex::{Vertex, VertexHash, VertexHasher};

/// The opaque handle minted for vertex-space's connected components.
pub type GraphId = ComponentId;

/// Callbacks fired around vertex-space mutations. Every method defaults
/// to a no-op; `enter`/`exit` bracket every public operation, the seam a
/// caller hangs a [`crate::cache::WriteBackCache`] bracket on.
pub trait VertexSpaceCallbacks<Cell> {
    /// A graph id was freshly allocated.
    fn graph_new(&mut self, _id: GraphId) {}
    /// A vertex was inserted into an existing or newly-allocated graph.
    fn graph_append(&mut self, _id: GraphId, _hash: VertexHash) {}
    /// A graph is about to be destroyed (its member set is still intact).
    fn graph_delete_pre(&mut self, _id: GraphId) {}
    /// A graph has just been destroyed.
    fn graph_delete_post(&mut self, _id: GraphId) {}
    /// A batch of vertices was assigned to `id` in one step (e.g. a flood
    /// promoted wholesale into a new graph).
    fn graph_assign(&mut self, _id: GraphId, _hashes: &[VertexHash]) {}
    /// A single vertex was removed from `id` without destroying the graph.
    fn graph_remove_single(&mut self, _id: GraphId, _hash: VertexHash) {}
    /// Fires before every public operation.
    fn enter(&mut self) {}
    /// Fires after every public operation.
    fn exit(&mut self) {}
}

impl<Cell> VertexSpaceCallbacks<Cell> for () {}

/// Callback table driving the BFM that underlies [`VertexSpace::addvertex`]'s
/// general path: every visited vertex is unconditionally reassigned to
/// `new_id`, consuming (destroying) whichever graph it previously belonged
/// to the first time that graph is encountered.
struct MergeCallbacks<'a, Cell, CB> {
    maptograph: &'a mut HashMap<VertexHash, GraphId>,
    graphs: &'a mut HashMap<GraphId, HashMap<VertexHash, Vertex<Cell>>>,
    new_id: GraphId,
    consumed: HashSet<GraphId>,
    user: &'a mut CB,
}

impl<'a, Cell, CB> BfmCallbacks<Vertex<Cell>, VertexHash> for MergeCallbacks<'a, Cell, CB>
where
    Cell: Clone,
    CB: VertexSpaceCallbacks<Cell>,
{
    fn visitor(&mut self, v: &Vertex<Cell>, h: &VertexHash) {
        if let Some(&old_id) = self.maptograph.get(h) {
            if old_id != self.new_id && self.consumed.insert(old_id) {
                self.user.graph_delete_pre(old_id);
                self.graphs.remove(&old_id);
                self.user.graph_delete_post(old_id);
            }
        }
        self.maptograph.insert(*h, self.new_id);
        self.graphs
            .entry(self.new_id)
            .or_default()
            .insert(*h, v.clone());
        self.user.graph_append(self.new_id, *h);
    }
}

/// Callback table for the repair-style floods `removevertex` runs: tracks
/// which of a caller-supplied set of hashes have been reached so far,
/// without otherwise touching the partition. Also watches for a flood
/// reaching a vertex still mapped to a graph other than the one being
/// torn down, which would mean two graphs were adjacent before the
/// removal — a partition invariant violation this tracker only detects
/// and reports, never repairs.
struct OutstandingTracker<'a> {
    outstanding: &'a mut HashSet<VertexHash>,
    maptograph: &'a HashMap<VertexHash, GraphId>,
    expected_graph: GraphId,
}

impl<'a, Cell> BfmCallbacks<Vertex<Cell>, VertexHash> for OutstandingTracker<'a> {
    fn visitor(&mut self, _v: &Vertex<Cell>, h: &VertexHash) {
        self.outstanding.remove(h);
        if let Some(&graph) = self.maptograph.get(h) {
            if graph != self.expected_graph {
                tracing::warn!(
                    hash = %h,
                    graph = %graph,
                    expected = %self.expected_graph,
                    "removal search reached a vertex belonging to a foreign graph"
                );
            }
        }
    }
}

/// The unbounded connectivity tracker.
pub struct VertexSpace<Cell, S, CB> {
    maptograph: HashMap<VertexHash, GraphId>,
    graphs: HashMap<GraphId, HashMap<VertexHash, Vertex<Cell>>>,
    ids: IdAllocator,
    successor: S,
    hasher: VertexHasher<Cell>,
    callbacks: CB,
}

impl<Cell, S, CB> VertexSpace<Cell, S, CB>
where
    Cell: CellData,
    S: FnMut(&Vertex<Cell>, &VertexHash) -> HashMap<VertexHash, Vertex<Cell>>,
    CB: VertexSpaceCallbacks<Cell>,
{
    pub fn new(successor: S, callbacks: CB) -> Self {
        Self {
            maptograph: HashMap::new(),
            graphs: HashMap::new(),
            ids: IdAllocator::new(),
            successor,
            hasher: VertexHasher::new(),
            callbacks,
        }
    }

    pub fn whichgraph(&self, hash: VertexHash) -> Option<GraphId> {
        self.maptograph.get(&hash).copied()
    }

    pub fn graphof(&self, id: GraphId) -> Option<impl Iterator<Item = &Vertex<Cell>>> {
        self.graphs.get(&id).map(|members| members.values())
    }

    pub fn graph_size(&self, id: GraphId) -> Option<usize> {
        self.graphs.get(&id).map(|members| members.len())
    }

    pub fn is_tracked(&self, hash: VertexHash) -> bool {
        self.maptograph.contains_key(&hash)
    }

    /// Insert `vertex` into the tracker, merging or extending graphs as
    /// needed. Returns `false` without side effects if `vertex` is already
    /// tracked.
    ///
    /// Implements this two-path algorithm:
    ///
    /// - **Optimisation path.** If every successor of `vertex` already
    ///   belongs to the same existing graph, `vertex` joins it in O(1).
    /// - **General path.** Otherwise a fresh graph id is allocated and a
    ///   BFM runs from `vertex`; every graph the flood touches is consumed
    ///   into the new id, handling both the "merge several graphs" and
    ///   "absorb an untracked region" cases uniformly.
    pub fn addvertex(&mut self, vertex: Vertex<Cell>) -> bool {
        self.callbacks.enter();
        let hash = self.hasher.hash(&vertex);
        if self.maptograph.contains_key(&hash) {
            self.callbacks.exit();
            return false;
        }

        let Self {
            maptograph,
            graphs,
            ids,
            successor,
            callbacks,
            ..
        } = self;

        let successors = successor(&vertex, &hash);
        let mut common: Option<Option<GraphId>> = None;
        let mut uniform = true;
        for shash in successors.keys() {
            let g = maptograph.get(shash).copied();
            match common {
                None => common = Some(g),
                Some(c) if c != g => uniform = false,
                _ => {}
            }
        }

        if uniform {
            if let Some(Some(g)) = common {
                maptograph.insert(hash, g);
                graphs.entry(g).or_default().insert(hash, vertex.clone());
                callbacks.graph_append(g, hash);
                callbacks.exit();
                return true;
            }
        }

        let new_id = ids.allocate();
        callbacks.graph_new(new_id);
        {
            let cb = MergeCallbacks {
                maptograph,
                graphs,
                new_id,
                consumed: HashSet::new(),
                user: callbacks,
            };
            let mut bfm = Bfm::new(
                Some((vertex, hash)),
                |v: &Vertex<Cell>, h: &VertexHash| successor(v, h),
                cb,
                BfmOptions::default(),
            );
            bfm.run();
        }
        callbacks.exit();
        true
    }

    /// Remove a tracked vertex, splitting its graph if the removal
    /// disconnects it. `prior_successors` must be the vertex's successor
    /// set computed *before* the removal, because by the time this runs
    /// `vertex` may already be unlinked from its neighbours in the
    /// underlying world.
    pub fn removevertex(
        &mut self,
        vertex: Vertex<Cell>,
        prior_successors: HashMap<VertexHash, Vertex<Cell>>,
    ) -> bool {
        self.callbacks.enter();
        let hash = self.hasher.hash(&vertex);
        let Some(old_id) = self.maptograph.get(&hash).copied() else {
            self.callbacks.exit();
            return false;
        };
        self.maptograph.remove(&hash);

        let mut destroyed_old = false;
        if let Some(members) = self.graphs.get_mut(&old_id) {
            if members.remove(&hash).is_none() {
                tracing::warn!(hash = %hash, graph = %old_id, "removevertex: hash did not exist in its mapped graph");
            }
            if members.is_empty() {
                self.callbacks.graph_delete_pre(old_id);
                self.graphs.remove(&old_id);
                self.callbacks.graph_delete_post(old_id);
                destroyed_old = true;
            }
        } else {
            tracing::warn!(hash = %hash, graph = %old_id, "removevertex: hash did not exist in its mapped graph");
        }
        self.callbacks.graph_remove_single(old_id, hash);

        if destroyed_old {
            self.callbacks.exit();
            return true;
        }

        let mut outstanding: HashSet<VertexHash> = prior_successors
            .keys()
            .filter(|h| self.maptograph.get(h) == Some(&old_id))
            .copied()
            .collect();

        if outstanding.is_empty() {
            self.callbacks.exit();
            return true;
        }

        let Self {
            maptograph,
            graphs,
            ids,
            successor,
            callbacks,
            ..
        } = self;

        let seed_hash = *outstanding.iter().next().expect("checked non-empty above");
        let seed_vertex = prior_successors
            .get(&seed_hash)
            .expect("seed_hash drawn from prior_successors' keys")
            .clone();

        let mut still_outstanding = outstanding.clone();
        let first_visited = {
            let cb = OutstandingTracker {
                outstanding: &mut still_outstanding,
                maptograph: &*maptograph,
                expected_graph: old_id,
            };
            let mut bfm = Bfm::new(
                Some((seed_vertex, seed_hash)),
                |v: &Vertex<Cell>, h: &VertexHash| successor(v, h),
                cb,
                BfmOptions::default(),
            );
            bfm.run();
            bfm.into_visited()
                .expect("an unbounded BFM always finishes")
        };

        if still_outstanding.is_empty() {
            callbacks.exit();
            return true;
        }

        // The removal split the graph: tear down old_id entirely and
        // rebuild from scratch, starting with the first flood's result.
        callbacks.graph_delete_pre(old_id);
        graphs.remove(&old_id);
        callbacks.graph_delete_post(old_id);

        let mut remaining = still_outstanding;

        let promoted_id = ids.allocate();
        callbacks.graph_new(promoted_id);
        let promoted_hashes: Vec<VertexHash> = first_visited.keys().copied().collect();
        for (h2, v2) in first_visited {
            maptograph.insert(h2, promoted_id);
            graphs.entry(promoted_id).or_default().insert(h2, v2);
        }
        callbacks.graph_assign(promoted_id, &promoted_hashes);

        while let Some(&next_hash) = remaining.iter().next() {
            let next_vertex = prior_successors
                .get(&next_hash)
                .expect("remaining drawn from prior_successors' keys")
                .clone();
            let visited = {
                let cb = OutstandingTracker {
                    outstanding: &mut remaining,
                    maptograph: &*maptograph,
                    expected_graph: old_id,
                };
                let mut bfm = Bfm::new(
                    Some((next_vertex, next_hash)),
                    |v: &Vertex<Cell>, h: &VertexHash| successor(v, h),
                    cb,
                    BfmOptions::default(),
                );
                bfm.run();
                bfm.into_visited()
                    .expect("an unbounded BFM always finishes")
            };
            let fresh_id = ids.allocate();
            callbacks.graph_new(fresh_id);
            let fresh_hashes: Vec<VertexHash> = visited.keys().copied().collect();
            for (h3, v3) in visited {
                maptograph.insert(h3, fresh_id);
                graphs.entry(fresh_id).or_default().insert(h3, v3);
            }
            callbacks.graph_assign(fresh_id, &fresh_hashes);
            remaining.remove(&next_hash);
        }

        callbacks.exit();
        true
    }
}

#[cfg(test)]
#[path = "unit_tests/vertex_space.rs"]
mod tests;
