use super::*;

#[derive(Debug)]
struct StubGrid(u64);

impl Grid<&'static str> for StubGrid {
    fn id(&self) -> GridId {
        GridId(self.0)
    }

    fn get(&self, _position: Position) -> Result<&'static str, crate::grid::OutOfBounds> {
        Ok("stone")
    }

    fn neighbour(
        &self,
        position: Position,
        offset: Position,
    ) -> Result<crate::grid::ResolvedNeighbour<&'static str>, crate::grid::OutOfBounds> {
        unreachable!("not exercised: {position:?} {offset:?}")
    }
}

#[test]
fn equal_grid_and_position_hash_equal() {
    let grid: Rc<dyn Grid<&'static str>> = Rc::new(StubGrid(1));
    let hasher = VertexHasher::new();
    let a = Vertex::new(grid.clone(), Position::new(1, 2, 3));
    let b = Vertex::new(grid, Position::new(1, 2, 3));
    assert_eq!(hasher.hash(&a), hasher.hash(&b));
}

#[test]
fn different_positions_hash_differently() {
    let grid: Rc<dyn Grid<&'static str>> = Rc::new(StubGrid(1));
    let hasher = VertexHasher::new();
    let a = Vertex::new(grid.clone(), Position::new(1, 2, 3));
    let b = Vertex::new(grid, Position::new(1, 2, 4));
    assert_ne!(hasher.hash(&a), hasher.hash(&b));
}

#[test]
fn different_grids_hash_differently_even_at_same_position() {
    let grid_a: Rc<dyn Grid<&'static str>> = Rc::new(StubGrid(1));
    let grid_b: Rc<dyn Grid<&'static str>> = Rc::new(StubGrid(2));
    let hasher = VertexHasher::new();
    let a = Vertex::new(grid_a, Position::new(0, 0, 0));
    let b = Vertex::new(grid_b, Position::new(0, 0, 0));
    assert_ne!(hasher.hash(&a), hasher.hash(&b));
}

#[test]
fn hasher_retains_every_distinct_grid_seen() {
    let hasher = VertexHasher::new();
    for id in 0..5 {
        let grid: Rc<dyn Grid<&'static str>> = Rc::new(StubGrid(id));
        let v = Vertex::new(grid, Position::new(0, 0, 0));
        hasher.hash(&v);
    }
    assert_eq!(hasher.grids_retained(), 5);
}
