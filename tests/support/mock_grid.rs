//! Flat-array in-memory grid test double.
//!
//! The tracker treats the grid as an external collaborator and specifies
//! only the interface it must satisfy ([`vxconnect::grid::Grid`]). This
//! is the minimal stand-in used by this crate's own integration tests,
//! nothing more: no portals, no rotation, straight-line offset
//! resolution within a single grid instance.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use vxconnect::grid::{CellData, Grid, GridId, OutOfBounds, Position, ResolvedNeighbour};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellName(pub &'static str);

#[derive(Debug, Clone)]
pub struct MockCell {
    pub name: CellName,
}

impl MockCell {
    pub fn new(name: &'static str) -> Self {
        Self {
            name: CellName(name),
        }
    }
}

impl CellData for MockCell {
    type Name = CellName;

    fn cell_name(&self) -> CellName {
        self.name
    }
}

/// A single coordinate space backed by a plain `HashMap`. Cells not
/// explicitly `set` are out-of-bounds — a distinct sentinel, not a
/// `nil`/absence case.
#[derive(Debug)]
pub struct MockGrid {
    id: GridId,
    cells: RefCell<HashMap<Position, MockCell>>,
    self_ref: Weak<MockGrid>,
}

impl MockGrid {
    /// Construct a fresh, empty grid with the given identity token.
    pub fn new(id: u64) -> Rc<Self> {
        Rc::new_cyclic(|weak| Self {
            id: GridId(id),
            cells: RefCell::new(HashMap::new()),
            self_ref: weak.clone(),
        })
    }

    pub fn set(&self, position: Position, cell: MockCell) {
        self.cells.borrow_mut().insert(position, cell);
    }
}

impl Grid<MockCell> for MockGrid {
    fn id(&self) -> GridId {
        self.id
    }

    fn get(&self, position: Position) -> Result<MockCell, OutOfBounds> {
        self.cells
            .borrow()
            .get(&position)
            .cloned()
            .ok_or(OutOfBounds)
    }

    fn neighbour(
        &self,
        position: Position,
        offset: Position,
    ) -> Result<ResolvedNeighbour<MockCell>, OutOfBounds> {
        let dest = position.translate(offset);
        if !self.cells.borrow().contains_key(&dest) {
            return Err(OutOfBounds);
        }
        let grid = self
            .self_ref
            .upgrade()
            .expect("grid must still be alive while resolving its own neighbours");
        Ok(ResolvedNeighbour {
            grid,
            position: dest,
            direction: offset,
        })
    }
}
