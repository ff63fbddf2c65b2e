//! The grid abstraction.
//!
//! `Grid` abstracts over cell lookup and neighbour-position resolution
//! across one or more coordinate spaces, the same way a `Graph` trait
//! abstracts over different graph representations rather than
//! committing callers to one concrete type.
//!
//! This module defines the interface only. The game-world binding that
//! implements `Grid` over a live world (and the flat-array in-memory
//! grid used by tests) are external collaborators specified only by the
//! interface they must satisfy; no concrete production `Grid` lives in
//! this crate.
//!
//! `Grid` is generic over its cell type `C` rather than carrying `Cell` as
//! an associated type: a tracker is wired up for exactly one cell format
//! shared by every grid it touches (portals link grids of the same
//! universe), so fixing `C` as a type parameter lets `Rc<dyn Grid<C>>` be
//! used directly as the "destination grid" a [`ResolvedNeighbour`] points
//! at, with no extra indirection to recover a concrete type.

use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use crate::error::TrackerError;

/// An integer-aligned three-component coordinate.
///
/// Vertex positions and neighbour offsets share this type: an offset is
/// simply a position interpreted as a delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Position {
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Translate `self` by `offset`, as used when resolving a neighbour
    /// candidate's raw offset into a world position.
    pub fn translate(self, offset: Position) -> Position {
        Position::new(self.x + offset.x, self.y + offset.y, self.z + offset.z)
    }

    /// Validates a floating-point triple as an integer-aligned position,
    /// the precondition every vertex must satisfy.
    ///
    /// # Errors
    /// Returns [`TrackerError::NonIntegerCoordinate`] if any component has
    /// a non-zero fractional part.
    pub fn from_f64(x: f64, y: f64, z: f64) -> Result<Position, TrackerError> {
        let components = [x, y, z];
        if components.iter().any(|c| c.fract() != 0.0) {
            return Err(TrackerError::NonIntegerCoordinate(format!(
                "({x}, {y}, {z})"
            )));
        }
        Ok(Position::new(x as i64, y as i64, z as i64))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A stable identity token for a grid instance, used to key the
/// [`crate::vertex::VertexHasher`]'s retained-reference registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridId(pub u64);

impl fmt::Display for GridId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "grid:{}", self.0)
    }
}

/// Sentinel distinguishing "this coordinate is outside what the grid
/// supports" from both `None`-as-absence and valid cell data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds;

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "out of bounds")
    }
}

/// The result of resolving a neighbour: the destination may live on a
/// different grid entirely (a "portal") and the effective inbound
/// direction may differ from the raw offset (a rotation).
#[derive(Debug, Clone)]
pub struct ResolvedNeighbour<C> {
    pub grid: Rc<dyn Grid<C>>,
    pub position: Position,
    pub direction: Position,
}

/// Abstracts over cell lookup and neighbour-position resolution for cell
/// type `C`.
pub trait Grid<C>: fmt::Debug {
    /// A stable identity token for this grid instance.
    fn id(&self) -> GridId;

    /// Look up the cell at `position`.
    fn get(&self, position: Position) -> Result<C, OutOfBounds>;

    /// Resolve the neighbour reached by stepping `offset` from `position`.
    ///
    /// The destination grid may differ from `self` (a "portal") and the
    /// effective inbound direction may differ from the raw `offset` (a
    /// rotation).
    fn neighbour(
        &self,
        position: Position,
        offset: Position,
    ) -> Result<ResolvedNeighbour<C>, OutOfBounds>;
}

/// The minimal shape of cell data the tracker needs: at minimum a name
/// to key LUT lookups by. Ancillary fields are read-only from the
/// tracker's perspective and are opaque to it.
pub trait CellData: Clone + fmt::Debug {
    /// The cell-name type used to key the neighbour-set and inbound-filter
    /// LUTs.
    type Name: Eq + Hash + Clone + fmt::Debug;

    fn cell_name(&self) -> Self::Name;
}

#[cfg(test)]
#[path = "unit_tests/grid.rs"]
mod tests;
