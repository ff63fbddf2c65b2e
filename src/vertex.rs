//! Vertices, hashes, and the grid-identity registry.
//!
//! A vertex is a `(grid, position)` pair. Vertices compare equal iff their
//! [`VertexHash`]es compare equal; within one tracker instance hash
//! equality implies vertex equality. [`VertexHasher`] is the "voxel
//! hasher": it retains a strong [`Rc`] to every grid it has ever hashed a
//! vertex for, so a grid's [`GridId`] can never be reused by a different
//! grid instance while the hasher (and thus the tracker built on it) is
//! alive. `Rc` rather than `Arc` is enough because the tracker commits to
//! a single-threaded cooperative scheduling model with no internal
//! threads.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::grid::{Grid, GridId, Position};

/// A `(grid, position)` pair identifying a cell in some tracked world.
#[derive(Clone)]
pub struct Vertex<C> {
    pub grid: Rc<dyn Grid<C>>,
    pub position: Position,
}

impl<C> fmt::Debug for Vertex<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vertex")
            .field("grid", &self.grid.id())
            .field("position", &self.position)
            .finish()
    }
}

impl<C> Vertex<C> {
    pub fn new(grid: Rc<dyn Grid<C>>, position: Position) -> Self {
        Self { grid, position }
    }
}

/// The opaque, equality-comparable token a tracked vertex resolves to, a
/// `(gridId, position)` pair. Two vertices are equal iff their
/// `VertexHash`es are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexHash {
    grid_id: GridId,
    position: Position,
}

impl VertexHash {
    pub fn grid_id(&self) -> GridId {
        self.grid_id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Construct a hash directly from its parts, bypassing a hasher.
    ///
    /// Crate-internal: every externally-observable `VertexHash` must come
    /// from [`VertexHasher::hash`] so the hasher's grid-retention guarantee
    /// holds. Rope-graph and group-space unit tests use this to build
    /// fixture hashes without standing up a real grid.
    pub(crate) fn from_raw(grid_id: GridId, position: Position) -> Self {
        Self { grid_id, position }
    }
}

impl fmt::Display for VertexHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.position, self.grid_id)
    }
}

/// Computes [`VertexHash`]es while retaining a strong reference to every
/// grid it has seen, preventing a freed grid's identity token from being
/// reused while the hasher is alive.
///
/// A `RefCell` is used rather than requiring `&mut self` at call sites:
/// hashing is logically a pure, read-like operation from the perspective
/// of every other tracker method, and plumbing `&mut` through the BFM's
/// successor closures (this purity assumption) would be far more
/// disruptive than a single interior-mutability registry.
pub struct VertexHasher<C> {
    seen: RefCell<HashMap<GridId, Rc<dyn Grid<C>>>>,
}

impl<C> Default for VertexHasher<C> {
    fn default() -> Self {
        Self {
            seen: RefCell::new(HashMap::new()),
        }
    }
}

impl<C> VertexHasher<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash `vertex`, retaining a strong reference to its grid.
    pub fn hash(&self, vertex: &Vertex<C>) -> VertexHash {
        self.seen
            .borrow_mut()
            .entry(vertex.grid.id())
            .or_insert_with(|| vertex.grid.clone());
        VertexHash {
            grid_id: vertex.grid.id(),
            position: vertex.position,
        }
    }

    /// Number of distinct grids retained by this hasher.
    pub fn grids_retained(&self) -> usize {
        self.seen.borrow().len()
    }
}

#[cfg(test)]
#[path = "unit_tests/vertex.rs"]
mod tests;
