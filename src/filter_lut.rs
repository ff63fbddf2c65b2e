//! Inbound-filter LUT (): a predicate lookup deciding
//! whether a destination cell may accept a connection from a source cell
//! along a given direction.

use std::fmt;

use crate::error::{LutSignal, TrackerError};
use crate::grid::{CellData, Position};
use crate::handler_lut::{HandlerLut, HandlerOutcome};

/// The argument bundle passed to an inbound-filter handler.
#[derive(Debug, Clone)]
pub struct FilterArgs<C, X> {
    pub src: C,
    pub dest: C,
    pub extradata: X,
    pub direction: Position,
}

/// `cell-name → handler({src, dest, extradata, direction}) → bool`.
pub struct InboundFilterLut<C: CellData, X> {
    inner: HandlerLut<C::Name, FilterArgs<C, X>, bool>,
}

impl<C: CellData, X> fmt::Debug for InboundFilterLut<C, X>
where
    C::Name: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InboundFilterLut").field(&self.inner).finish()
    }
}

impl<C: CellData, X> InboundFilterLut<C, X> {
    pub fn new() -> Self {
        Self {
            inner: HandlerLut::new("inbound-filter-lut", |args: &FilterArgs<C, X>| {
                args.dest.cell_name()
            }),
        }
    }

    /// Register the acceptance predicate for destination cell `cell_name`.
    pub fn register(
        &mut self,
        cell_name: C::Name,
        handler: impl Fn(&FilterArgs<C, X>) -> HandlerOutcome<bool> + 'static,
    ) -> Result<(), TrackerError> {
        self.inner.register(cell_name, handler)
    }

    /// Evaluate whether `args.dest` accepts the connection described by
    /// `args`. `ENODATA` here ("no filter registered") is treated by the
    /// voxel successor as a rejection, not as "filter passed"; this
    /// method only surfaces the raw LUT result.
    pub fn query(&self, args: &FilterArgs<C, X>) -> Result<bool, LutSignal> {
        self.inner.query(args)
    }
}

impl<C: CellData, X> Default for InboundFilterLut<C, X> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "unit_tests/filter_lut.rs"]
mod tests;
