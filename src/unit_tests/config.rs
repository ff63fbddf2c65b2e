use super::*;
use crate::grid::{Grid, GridId, OutOfBounds, Position, ResolvedNeighbour};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Name;

#[derive(Clone, Debug)]
struct Cell;

impl CellData for Cell {
    type Name = Name;
    fn cell_name(&self) -> Name {
        Name
    }
}

#[derive(Debug)]
struct MockGrid;

impl Grid<Cell> for MockGrid {
    fn id(&self) -> GridId {
        GridId(1)
    }

    fn get(&self, _position: Position) -> Result<Cell, OutOfBounds> {
        Ok(Cell)
    }

    fn neighbour(
        &self,
        _position: Position,
        _offset: Position,
    ) -> Result<ResolvedNeighbour<Cell>, OutOfBounds> {
        Err(OutOfBounds)
    }
}

fn no_successors(_v: &Vertex<Cell>, _h: &VertexHash) -> HashMap<VertexHash, Vertex<Cell>> {
    HashMap::new()
}

#[test]
fn vertex_space_options_default_callbacks_build_a_working_tracker() {
    let grid: Rc<dyn Grid<Cell>> = Rc::new(MockGrid);
    let mut space = VertexSpaceOptions::new(no_successors).build();
    let v = Vertex::new(grid.clone(), Position::new(0, 0, 0));
    assert!(space.addvertex(v));
}

#[test]
fn group_space_options_default_testvertex_accepts_everything() {
    let grid: Rc<dyn Grid<Cell>> = Rc::new(MockGrid);
    let mut space = GroupSpaceOptions::new(4, no_successors).build();
    let v = Vertex::new(grid.clone(), Position::new(0, 0, 0));
    let h = VertexHash::from_raw(grid.id(), Position::new(0, 0, 0));
    assert!(space.add(v, h));
    assert!(space.whichgroup(h).is_some());
}

#[test]
fn group_space_options_with_testvertex_overrides_the_default() {
    let grid: Rc<dyn Grid<Cell>> = Rc::new(MockGrid);
    let mut space = GroupSpaceOptions::new(4, no_successors)
        .with_testvertex(|_v: &Vertex<Cell>, _h: &VertexHash| false)
        .build();
    let v = Vertex::new(grid.clone(), Position::new(0, 0, 0));
    let h = VertexHash::from_raw(grid.id(), Position::new(0, 0, 0));
    // update() on a dead, untracked vertex is a no-op.
    space.update(v, h);
    assert_eq!(space.whichgroup(h), None);
}
