//! Write-back cache (): a per-`enter`...`exit` bracket
//! read/write cache interposed between a running operation and the real
//! grids so that in-flight callbacks neither observe nor perturb the
//! mutation underway.
//!
//! Both cache levels are keyed by `(GridId, Position)` rather than by
//! vertex hash — this cache has no need for [`crate::vertex::VertexHasher`]'s
//! grid-retention guarantee, since a bracket's lifetime is always shorter
//! than the grids it touches. Distinct `Position` values naming the same
//! cell still coalesce, since `Position` is `Eq`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::grid::{Grid, GridId, OutOfBounds, Position};

type CacheKey = (GridId, Position);

/// Extends [`Grid`] with the write operation the cache flushes into at
/// `exit`. Writing a node back to the world (`swap_node` in this crate's
/// external-collaborator vocabulary) is outside this crate's scope; this
/// trait is the narrow interface the cache needs from whatever does it.
pub trait WritableGrid<C>: Grid<C> {
    fn write_node(&self, position: Position, cell: C);
}

/// The read side: values observed during the bracket, populated lazily
/// from the first uncached read and never invalidated within the
/// bracket, so every read the successor performs sees the pre-operation
/// world.
struct ReadCache<C> {
    entries: HashMap<CacheKey, C>,
}

/// A per-cell metadata write queued during the bracket, flushed only
/// after all node writes at the same position have gone out.
struct MetadataWrite<M> {
    key: CacheKey,
    value: M,
}

/// The two-level cache for a single `enter`...`exit` bracket.
///
/// `C` is the cell-data type; `M` is whatever per-cell metadata reference
/// callbacks acquire during the operation. The cache batches and orders
/// metadata writes but does not interpret them — `exit` takes a sink
/// closure for that.
pub struct WriteBackCache<C, M> {
    reads: RefCell<ReadCache<C>>,
    node_writes: RefCell<HashMap<CacheKey, (Rc<dyn WritableGrid<C>>, C)>>,
    metadata_writes: RefCell<Vec<MetadataWrite<M>>>,
    open: RefCell<bool>,
}

impl<C: Clone, M> WriteBackCache<C, M> {
    /// Construct a cache, already open (as if `enter` had just run).
    pub fn new() -> Self {
        Self {
            reads: RefCell::new(ReadCache {
                entries: HashMap::new(),
            }),
            node_writes: RefCell::new(HashMap::new()),
            metadata_writes: RefCell::new(Vec::new()),
            open: RefCell::new(true),
        }
    }

    pub fn is_open(&self) -> bool {
        *self.open.borrow()
    }

    /// Open a fresh bracket, discarding anything left over from a prior
    /// one. Idempotent to call on an already-open cache.
    pub fn enter(&self) {
        self.reads.borrow_mut().entries.clear();
        self.node_writes.borrow_mut().clear();
        self.metadata_writes.borrow_mut().clear();
        *self.open.borrow_mut() = true;
    }

    /// Read-through get. Populates the first-level cache on a miss;
    /// subsequent reads at the same key within this bracket return the
    /// cached value regardless of what `grid` would now report.
    pub fn get(&self, grid: &dyn Grid<C>, position: Position) -> Result<C, OutOfBounds> {
        let key = (grid.id(), position);
        if let Some(cell) = self.reads.borrow().entries.get(&key) {
            return Ok(cell.clone());
        }
        let cell = grid.get(position)?;
        self.reads
            .borrow_mut()
            .entries
            .insert(key, cell.clone());
        Ok(cell)
    }

    /// Queue a node write, coalescing repeated writes to the same position
    /// within one bracket into the last one.
    pub fn write_node(&self, grid: Rc<dyn WritableGrid<C>>, position: Position, cell: C) {
        let key = (grid.id(), position);
        self.node_writes.borrow_mut().insert(key, (grid, cell));
    }

    /// Queue a metadata write, ordered after every node write at the same
    /// position once flushed.
    pub fn write_metadata(&self, grid_id: GridId, position: Position, value: M) {
        self.metadata_writes.borrow_mut().push(MetadataWrite {
            key: (grid_id, position),
            value,
        });
    }

    /// Flush every queued write — node writes first, then metadata writes
    /// in enqueue order — and close the bracket. `on_metadata` receives
    /// each queued metadata write in turn; it is the caller's business what
    /// "applying" metadata means.
    pub fn exit(&self, mut on_metadata: impl FnMut(GridId, Position, M)) {
        for ((_grid_id, position), (grid, cell)) in self.node_writes.borrow_mut().drain() {
            grid.write_node(position, cell);
        }
        for write in self.metadata_writes.borrow_mut().drain(..) {
            on_metadata(write.key.0, write.key.1, write.value);
        }
        *self.open.borrow_mut() = false;
    }
}

impl<C: Clone, M> Default for WriteBackCache<C, M> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "unit_tests/cache.rs"]
mod tests;
