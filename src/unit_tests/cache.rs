use super::*;
use crate::grid::{GridId, OutOfBounds, Position, ResolvedNeighbour};
use std::cell::RefCell;

#[derive(Debug)]
struct RecordingGrid {
    id: GridId,
    cells: RefCell<HashMap<Position, i32>>,
    reads_seen: RefCell<usize>,
}

impl RecordingGrid {
    fn new(id: u64) -> Self {
        Self {
            id: GridId(id),
            cells: RefCell::new(HashMap::new()),
            reads_seen: RefCell::new(0),
        }
    }
}

impl Grid<i32> for RecordingGrid {
    fn id(&self) -> GridId {
        self.id
    }

    fn get(&self, position: Position) -> Result<i32, OutOfBounds> {
        *self.reads_seen.borrow_mut() += 1;
        self.cells.borrow().get(&position).copied().ok_or(OutOfBounds)
    }

    fn neighbour(&self, _position: Position, _offset: Position) -> Result<ResolvedNeighbour<i32>, OutOfBounds> {
        Err(OutOfBounds)
    }
}

impl WritableGrid<i32> for RecordingGrid {
    fn write_node(&self, position: Position, cell: i32) {
        self.cells.borrow_mut().insert(position, cell);
    }
}

#[test]
fn second_read_does_not_touch_the_underlying_grid() {
    let grid = RecordingGrid::new(1);
    grid.cells.borrow_mut().insert(Position::new(0, 0, 0), 7);
    let cache: WriteBackCache<i32, ()> = WriteBackCache::new();

    assert_eq!(cache.get(&grid, Position::new(0, 0, 0)).unwrap(), 7);
    assert_eq!(cache.get(&grid, Position::new(0, 0, 0)).unwrap(), 7);
    assert_eq!(*grid.reads_seen.borrow(), 1);
}

#[test]
fn reads_still_see_pre_operation_value_after_a_queued_write() {
    let grid = std::rc::Rc::new(RecordingGrid::new(1));
    grid.cells.borrow_mut().insert(Position::new(0, 0, 0), 7);
    let cache: WriteBackCache<i32, ()> = WriteBackCache::new();

    assert_eq!(cache.get(grid.as_ref(), Position::new(0, 0, 0)).unwrap(), 7);
    cache.write_node(grid.clone() as std::rc::Rc<dyn WritableGrid<i32>>, Position::new(0, 0, 0), 99);
    // The read cache already holds the pre-write value and must not change.
    assert_eq!(cache.get(grid.as_ref(), Position::new(0, 0, 0)).unwrap(), 7);
    // The underlying grid is untouched until exit.
    assert_eq!(*grid.cells.borrow().get(&Position::new(0, 0, 0)).unwrap(), 7);
}

#[test]
fn exit_flushes_node_writes_before_metadata_writes() {
    let grid = std::rc::Rc::new(RecordingGrid::new(1));
    let cache: WriteBackCache<i32, &'static str> = WriteBackCache::new();
    cache.write_node(grid.clone() as std::rc::Rc<dyn WritableGrid<i32>>, Position::new(1, 1, 1), 42);
    cache.write_metadata(GridId(1), Position::new(1, 1, 1), "meta");

    let mut order = Vec::new();
    cache.exit(|_grid_id, _pos, value| order.push(value));

    assert_eq!(*grid.cells.borrow().get(&Position::new(1, 1, 1)).unwrap(), 42);
    assert_eq!(order, vec!["meta"]);
    assert!(!cache.is_open());
}

#[test]
fn enter_discards_leftover_state_from_a_prior_bracket() {
    let grid = RecordingGrid::new(1);
    grid.cells.borrow_mut().insert(Position::new(0, 0, 0), 1);
    let cache: WriteBackCache<i32, ()> = WriteBackCache::new();
    cache.get(&grid, Position::new(0, 0, 0)).unwrap();
    cache.enter();

    grid.cells.borrow_mut().insert(Position::new(0, 0, 0), 2);
    assert_eq!(cache.get(&grid, Position::new(0, 0, 0)).unwrap(), 2);
}
