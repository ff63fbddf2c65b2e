//! The voxel successor (): composes a [`Grid`], a
//! [`NeighbourSetLut`] and an [`InboundFilterLut`] into the "successors of
//! a vertex" function the BFM consumes.
//!
//! Candidate and filter phases are split because the source need not know
//! the destination's data to enumerate sides, and the destination's
//! acceptance is independent of the source's enumeration policy — each
//! can be registered by separate callers.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::error::LutSignal;
use crate::filter_lut::{FilterArgs, InboundFilterLut};
use crate::grid::{CellData, Grid};
use crate::neighbour_lut::NeighbourSetLut;
use crate::vertex::{Vertex, VertexHash, VertexHasher};

/// The outcome of resolving one `(extradata, offset)` candidate, per the
/// Design Notes' "Sum-typed successor outcomes": a tagged variant instead
/// of overloaded nil returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOutcome {
    /// The candidate resolved to a live, accepting destination.
    Accepted,
    /// The destination exists but its inbound filter rejected the
    /// connection (or no filter is registered for it).
    Rejected,
    /// `Grid::neighbour` or the destination `Grid::get` reported
    /// out-of-bounds.
    OutOfBounds,
    /// The inbound-filter LUT reported `EHOOKFAIL` for the destination.
    FilterError,
}

/// Composes a grid plus the two LUTs into the successor function the BFM
/// drives.
pub struct VoxelSuccessor<C: CellData, X> {
    neighbour_lut: NeighbourSetLut<C, X>,
    filter_lut: InboundFilterLut<C, X>,
}

impl<C: CellData, X> fmt::Debug for VoxelSuccessor<C, X>
where
    C::Name: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoxelSuccessor")
            .field("neighbour_lut", &self.neighbour_lut)
            .field("filter_lut", &self.filter_lut)
            .finish()
    }
}

impl<C: CellData, X: Clone> VoxelSuccessor<C, X> {
    pub fn new(neighbour_lut: NeighbourSetLut<C, X>, filter_lut: InboundFilterLut<C, X>) -> Self {
        Self {
            neighbour_lut,
            filter_lut,
        }
    }

    /// Compute the successors of `vertex`, keyed by [`VertexHash`].
    ///
    /// Implements this two phases:
    ///
    /// 1. **Candidate phase.** `grid.get(vertex.position)`; out-of-bounds
    ///    yields the empty set. Query the neighbour-set LUT with the cell
    ///    data; `ENODATA`/`EHOOKFAIL` also yield the empty set.
    /// 2. **Filter phase.** For each `(extradata, offset)`, resolve the
    ///    neighbour, look up its cell data, and ask the inbound-filter LUT
    ///    whether it accepts. `ENODATA` here is treated as "no filter
    ///    registered → reject", not as acceptance.
    ///
    /// Duplicate hashes among accepted candidates are a precondition
    /// violation ("no two offsets may resolve to the same
    /// destination") and are logged rather than silently deduplicated,
    /// since silently keeping one copy would hide a neighbour-set LUT bug.
    pub fn successors(
        &self,
        vertex: &Vertex<C>,
        hasher: &VertexHasher<C>,
    ) -> HashMap<VertexHash, Vertex<C>>
    where
        X: Eq + Hash,
    {
        let source_cell = match vertex.grid.get(vertex.position) {
            Ok(cell) => cell,
            Err(_) => return HashMap::new(),
        };

        let candidates = match self.neighbour_lut.query(&source_cell) {
            Ok(candidates) => candidates,
            Err(LutSignal::NoData) => return HashMap::new(),
            Err(LutSignal::HookFail) => return HashMap::new(),
        };

        let mut out = HashMap::new();
        for (extradata, offset) in candidates {
            match self.resolve_candidate(vertex, &source_cell, extradata, offset, hasher, &mut out)
            {
                CandidateOutcome::Accepted => {}
                CandidateOutcome::Rejected
                | CandidateOutcome::OutOfBounds
                | CandidateOutcome::FilterError => {}
            }
        }
        out
    }

    #[allow(clippy::too_many_arguments)]
    fn resolve_candidate(
        &self,
        vertex: &Vertex<C>,
        source_cell: &C,
        extradata: X,
        offset: crate::grid::Position,
        hasher: &VertexHasher<C>,
        out: &mut HashMap<VertexHash, Vertex<C>>,
    ) -> CandidateOutcome {
        let resolved = match vertex.grid.neighbour(vertex.position, offset) {
            Ok(resolved) => resolved,
            Err(_) => return CandidateOutcome::OutOfBounds,
        };
        let dest_cell = match resolved.grid.get(resolved.position) {
            Ok(cell) => cell,
            Err(_) => return CandidateOutcome::OutOfBounds,
        };

        let args = FilterArgs {
            src: source_cell.clone(),
            dest: dest_cell.clone(),
            extradata,
            direction: resolved.direction,
        };

        match self.filter_lut.query(&args) {
            Ok(true) => {
                let dest_vertex = Vertex::new(resolved.grid, resolved.position);
                let hash = hasher.hash(&dest_vertex);
                if let Some(existing) = out.insert(hash, dest_vertex) {
                    tracing::warn!(
                        position = %existing.position,
                        "voxel successor: two offsets resolved to the same destination"
                    );
                }
                CandidateOutcome::Accepted
            }
            Ok(false) => CandidateOutcome::Rejected,
            Err(LutSignal::NoData) => CandidateOutcome::Rejected,
            Err(LutSignal::HookFail) => CandidateOutcome::FilterError,
        }
    }
}

#[cfg(test)]
#[path = "unit_tests/voxel_successor.rs"]
mod tests;
