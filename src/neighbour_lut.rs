//! Neighbour-set LUT: a per-cell-kind lookup returning candidate outbound
//! offsets, each possibly tagged with extra data.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::error::TrackerError;
use crate::grid::{CellData, Position};
use crate::handler_lut::{HandlerLut, HandlerOutcome};

/// `extradata-key → offset-vector`, the candidate map a neighbour-set
/// handler returns. An empty map is valid ("no successors"); a `nil`
/// return (modeled here as [`crate::handler_lut::HandlerOutcome::HookFail`])
/// is a distinct error from "no data".
pub type Candidates<X> = HashMap<X, Position>;

/// `cell-name → handler(cell-data) → candidates`.
pub struct NeighbourSetLut<C: CellData, X> {
    inner: HandlerLut<C::Name, C, Candidates<X>>,
}

impl<C: CellData, X> fmt::Debug for NeighbourSetLut<C, X>
where
    C::Name: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NeighbourSetLut").field(&self.inner).finish()
    }
}

impl<C: CellData, X> NeighbourSetLut<C, X> {
    pub fn new() -> Self {
        Self {
            inner: HandlerLut::new("neighbour-set-lut", |cell: &C| cell.cell_name()),
        }
    }

    /// Register the candidate-offset handler for `cell_name`.
    pub fn add_custom_hook(
        &mut self,
        cell_name: C::Name,
        handler: impl Fn(&C) -> HandlerOutcome<Candidates<X>> + 'static,
    ) -> Result<(), TrackerError> {
        self.inner.register(cell_name, handler)
    }

    /// Query the candidate offsets for `cell`. `ENODATA`/`EHOOKFAIL` are
    /// the caller's (the voxel successor's) responsibility to fold into
    /// "no successors"; this method surfaces them unchanged.
    pub fn query(&self, cell: &C) -> Result<Candidates<X>, crate::error::LutSignal> {
        self.inner.query(cell)
    }
}

impl<C: CellData, X> Default for NeighbourSetLut<C, X> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "unit_tests/neighbour_lut.rs"]
mod tests;
