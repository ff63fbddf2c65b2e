//! The breadth-first mapper (BFM): the generic exhaustive flood
//! traversal every other subsystem in this crate runs on top of.
//!
//! Callback tables are modeled as a single trait with default no-op
//! methods, preferring a trait-based abstraction over an ad-hoc table of
//! optional closures. The `finished` remainder is exposed as a
//! single-pass iterator borrowing from the BFM's own state rather than a
//! materialized collection.

use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;

/// Snapshot of a BFM run's progress. Mentioned in this crate's overview table
/// ("vertexLimit, stats") without its fields being enumerated there;
/// exposed here so a caller can observe progress without waiting for
/// `finished`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BfmStats {
    pub visited: usize,
    pub discarded: usize,
    pub frontier_remaining: usize,
}

/// Callbacks a BFM run invokes. Every method defaults to a no-op, so a
/// caller only overrides what it needs; missing callbacks are
/// indistinguishable from no-ops.
pub trait BfmCallbacks<V, H> {
    /// Predicate run on a popped frontier; if false, the vertex is dropped
    /// without visiting or expanding it. Default: accept.
    fn testvertex(&mut self, _v: &V, _h: &H) -> bool {
        true
    }

    /// Invoked when a vertex transitions popped → visited.
    fn visitor(&mut self, _v: &V, _h: &H) {}

    /// Invoked when a vertex enters the pending set.
    fn markfrontier(&mut self, _v: &V, _h: &H) {}

    /// Invoked exactly once when the search terminates. `remainder`
    /// enumerates frontiers left behind, populated only when termination
    /// was caused by the vertex limit.
    fn finished(&mut self, _remainder: FrontierRemainder<'_, V, H>) {}

    /// Diagnostic trace sink.
    fn debugger(&mut self, _msg: &str) {}
}

/// The default no-op callback table.
impl<V, H> BfmCallbacks<V, H> for () {}

/// A single-pass iterator over the frontiers a BFM run left un-expanded,
/// borrowing directly from the BFM's frontier queue. Once the BFM this
/// iterator borrows from is dropped, the iterator cannot outlive it
/// (enforced by the borrow checker, not by a runtime check).
pub struct FrontierRemainder<'a, V, H> {
    inner: std::collections::vec_deque::Iter<'a, (V, H)>,
}

impl<'a, V, H> Iterator for FrontierRemainder<'a, V, H> {
    type Item = &'a (V, H);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// Construction options recognised by [`Bfm::new`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BfmOptions {
    /// Caps the number of visited vertices; excess frontiers remain queued
    /// and are reported through `finished`'s remainder instead of being
    /// visited.
    pub vertex_limit: Option<usize>,
}

/// Generic breadth-first mapper. `V` is the vertex payload, `H` its hash
/// key, `S` the successor function, `C` the callback table.
///
/// `advance()` is the sole suspension point: callers may interleave other
/// logic between calls only if they don't mutate any graph state the
/// in-flight run observes.
pub struct Bfm<V, H, S, C> {
    frontier: VecDeque<(V, H)>,
    pending: HashSet<H>,
    visited: HashMap<H, V>,
    finished: bool,
    visited_count: usize,
    discarded_count: usize,
    vertex_limit: Option<usize>,
    successor: S,
    callbacks: C,
}

impl<V, H, S, C> Bfm<V, H, S, C>
where
    V: Clone,
    H: Eq + Hash + Clone,
    S: FnMut(&V, &H) -> HashMap<H, V>,
    C: BfmCallbacks<V, H>,
{
    /// Construct a BFM seeded at `initial`/`initial_hash`, or empty if
    /// `initial` is `None` (the first `advance` then returns `false`).
    pub fn new(
        initial: Option<(V, H)>,
        successor: S,
        callbacks: C,
        opts: BfmOptions,
    ) -> Self {
        let mut frontier = VecDeque::new();
        let mut pending = HashSet::new();
        if let Some((v, h)) = initial {
            pending.insert(h.clone());
            frontier.push_back((v, h));
        }
        Self {
            frontier,
            pending,
            visited: HashMap::new(),
            finished: false,
            visited_count: 0,
            discarded_count: 0,
            vertex_limit: opts.vertex_limit,
            successor,
            callbacks,
        }
    }

    pub fn stats(&self) -> BfmStats {
        BfmStats {
            visited: self.visited_count,
            discarded: self.discarded_count,
            frontier_remaining: self.frontier.len(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Single BFM step, implementing this seven-step contract
    /// exactly. Returns `false` once the run has terminated (the vertex
    /// limit was reached, or the frontier emptied).
    pub fn advance(&mut self) -> bool {
        if self.finished {
            return false;
        }

        if let Some(limit) = self.vertex_limit {
            if self.visited_count >= limit {
                self.terminate();
                return false;
            }
        }

        let Some((v, h)) = self.frontier.pop_front() else {
            self.terminate();
            return false;
        };
        self.pending.remove(&h);

        if !self.callbacks.testvertex(&v, &h) {
            self.discarded_count += 1;
            return true;
        }

        let successors = (self.successor)(&v, &h);
        for (succ_hash, succ_vertex) in successors {
            if self.visited.contains_key(&succ_hash) {
                continue;
            }
            if self.pending.contains(&succ_hash) {
                continue;
            }
            self.pending.insert(succ_hash.clone());
            self.callbacks.markfrontier(&succ_vertex, &succ_hash);
            self.frontier.push_back((succ_vertex, succ_hash));
        }

        self.callbacks.visitor(&v, &h);
        self.visited.insert(h, v);
        self.visited_count += 1;
        true
    }

    /// Drive the run to completion, returning visited-vertex count.
    pub fn run(&mut self) -> usize {
        while self.advance() {}
        self.visited_count
    }

    fn terminate(&mut self) {
        self.finished = true;
        let remainder = FrontierRemainder {
            inner: self.frontier.iter(),
        };
        self.callbacks.finished(remainder);
    }

    /// The visited map, available only once the run has finished
    /// ("returns the visited map only after `finished`").
    pub fn getvisited(&self) -> Option<&HashMap<H, V>> {
        self.finished.then_some(&self.visited)
    }

    /// Consume the BFM and take ownership of the visited map, once
    /// finished.
    pub fn into_visited(self) -> Option<HashMap<H, V>> {
        self.finished.then_some(self.visited)
    }

    /// Access the callback table, e.g. to read accumulated state out of a
    /// stateful callback implementation after the run completes.
    pub fn callbacks(&self) -> &C {
        &self.callbacks
    }

    pub fn callbacks_mut(&mut self) -> &mut C {
        &mut self.callbacks
    }
}

#[cfg(test)]
#[path = "unit_tests/bfm.rs"]
mod tests;
