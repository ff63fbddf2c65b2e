//! Chained builders for [`crate::vertex_space::VertexSpace`] and
//! [`crate::group_space::GroupSpace`], in the same
//! `new(...).with_*(...)` style used for constructing registry-style
//! types elsewhere in this crate's ancestry.
//!
//! Every optional field defaults to a no-op: an omitted `testvertex`
//! accepts everything, an omitted callback table is `()` (every
//! [`crate::vertex_space::VertexSpaceCallbacks`]/
//! [`crate::group_space::GroupSpaceCallbacks`] method already no-ops by
//! default). There is no separate "debugger sink" field here: diagnostic
//! conditions are reported directly through `tracing` at the point
//! they're detected, not threaded through construction.

use std::marker::PhantomData;

use crate::grid::CellData;
use crate::group_space::{GroupSpace, GroupSpaceCallbacks};
use crate::vertex::{Vertex, VertexHash};
use crate::vertex_space::{VertexSpace, VertexSpaceCallbacks};

/// Always-accept `testvertex` default: every candidate is considered live.
fn accept_all<Cell>(_v: &Vertex<Cell>, _h: &VertexHash) -> bool {
    true
}

/// Builder for [`VertexSpace`]. Construct with [`VertexSpaceOptions::new`],
/// chain `with_callbacks`, then [`VertexSpaceOptions::build`].
pub struct VertexSpaceOptions<Cell, S, CB = ()> {
    successor: S,
    callbacks: CB,
    _cell: PhantomData<Cell>,
}

impl<Cell, S> VertexSpaceOptions<Cell, S, ()>
where
    Cell: CellData,
    S: FnMut(&Vertex<Cell>, &VertexHash) -> std::collections::HashMap<VertexHash, Vertex<Cell>>,
{
    /// Start a builder with the required successor function and a no-op
    /// callback table.
    pub fn new(successor: S) -> Self {
        Self {
            successor,
            callbacks: (),
            _cell: PhantomData,
        }
    }
}

impl<Cell, S, CB> VertexSpaceOptions<Cell, S, CB>
where
    Cell: CellData,
    S: FnMut(&Vertex<Cell>, &VertexHash) -> std::collections::HashMap<VertexHash, Vertex<Cell>>,
    CB: VertexSpaceCallbacks<Cell>,
{
    /// Attach a callback table, replacing the no-op default.
    pub fn with_callbacks<CB2>(self, callbacks: CB2) -> VertexSpaceOptions<Cell, S, CB2>
    where
        CB2: VertexSpaceCallbacks<Cell>,
    {
        VertexSpaceOptions {
            successor: self.successor,
            callbacks,
            _cell: PhantomData,
        }
    }

    /// Build the configured [`VertexSpace`].
    pub fn build(self) -> VertexSpace<Cell, S, CB> {
        VertexSpace::new(self.successor, self.callbacks)
    }
}

/// Builder for [`GroupSpace`]. Construct with [`GroupSpaceOptions::new`]
/// (which requires `grouplimit` and the successor function), optionally
/// chain `with_testvertex`/`with_callbacks`, then
/// [`GroupSpaceOptions::build`].
pub struct GroupSpaceOptions<Cell, S, T = fn(&Vertex<Cell>, &VertexHash) -> bool, CB = ()> {
    grouplimit: usize,
    successor: S,
    testvertex: T,
    callbacks: CB,
    _cell: PhantomData<Cell>,
}

impl<Cell, S> GroupSpaceOptions<Cell, S, fn(&Vertex<Cell>, &VertexHash) -> bool, ()>
where
    Cell: CellData,
    S: FnMut(&Vertex<Cell>, &VertexHash) -> std::collections::HashMap<VertexHash, Vertex<Cell>>,
{
    /// Start a builder with the required group-size limit and successor
    /// function; `testvertex` defaults to accept-all and callbacks default
    /// to the no-op table.
    pub fn new(grouplimit: usize, successor: S) -> Self {
        Self {
            grouplimit,
            successor,
            testvertex: accept_all::<Cell>,
            callbacks: (),
            _cell: PhantomData,
        }
    }
}

impl<Cell, S, T, CB> GroupSpaceOptions<Cell, S, T, CB>
where
    Cell: CellData,
    S: FnMut(&Vertex<Cell>, &VertexHash) -> std::collections::HashMap<VertexHash, Vertex<Cell>>,
    T: FnMut(&Vertex<Cell>, &VertexHash) -> bool,
    CB: GroupSpaceCallbacks<Cell>,
{
    /// Replace the `testvertex` predicate.
    pub fn with_testvertex<T2>(self, testvertex: T2) -> GroupSpaceOptions<Cell, S, T2, CB>
    where
        T2: FnMut(&Vertex<Cell>, &VertexHash) -> bool,
    {
        GroupSpaceOptions {
            grouplimit: self.grouplimit,
            successor: self.successor,
            testvertex,
            callbacks: self.callbacks,
            _cell: PhantomData,
        }
    }

    /// Attach a callback table, replacing the no-op default.
    pub fn with_callbacks<CB2>(self, callbacks: CB2) -> GroupSpaceOptions<Cell, S, T, CB2>
    where
        CB2: GroupSpaceCallbacks<Cell>,
    {
        GroupSpaceOptions {
            grouplimit: self.grouplimit,
            successor: self.successor,
            testvertex: self.testvertex,
            callbacks,
            _cell: PhantomData,
        }
    }

    /// Build the configured [`GroupSpace`].
    pub fn build(self) -> GroupSpace<Cell, S, T, CB> {
        GroupSpace::new(
            self.grouplimit,
            self.successor,
            self.testvertex,
            self.callbacks,
        )
    }
}

#[cfg(test)]
#[path = "unit_tests/config.rs"]
mod tests;
