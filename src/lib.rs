//! # vxconnect
//!
//! Incremental connectivity tracking for voxel-graph worlds.
//!
//! A client that mutates an undirected graph of voxel-like cells one vertex
//! at a time (add/remove/edge-change) needs to know which vertices are
//! reachable from which without rescanning the world on every change. This
//! crate provides two complementary trackers built on a shared
//! breadth-first traversal:
//!
//! - [`vertex_space`] — an unbounded connectivity tracker: maintains a
//!   partition of tracked vertices into maximal connected components
//!   ("graphs"), merging components on insertion and splitting them on
//!   removal.
//! - [`group_space`] plus [`rope_graph`] — a bounded-size connectivity
//!   tracker: partitions vertices into groups of at most `L` members,
//!   tracking inter-group boundaries separately as a refcounted multigraph
//!   so coarse connectivity queries stay amortised O(1) per mutation
//!   (barring a group split).
//!
//! Both trackers are driven by the same [`bfm::Bfm`] (breadth-first mapper)
//! over a client-supplied successor function. [`voxel_successor`] is the
//! adapter that turns a `(grid, position)` vertex into that successor
//! function, by composing a [`grid::Grid`] with a [`neighbour_lut`]
//! (candidate outbound offsets per cell kind) and a [`filter_lut`]
//! (per-destination acceptance predicate).
//!
//! ## Example
//!
//! ```
//! use std::collections::HashMap;
//! use std::rc::Rc;
//! use vxconnect::config::VertexSpaceOptions;
//! use vxconnect::grid::{Grid, GridId, OutOfBounds, Position, ResolvedNeighbour};
//! use vxconnect::vertex::{Vertex, VertexHash};
//!
//! #[derive(Debug, Clone)]
//! struct Cell;
//! impl vxconnect::grid::CellData for Cell {
//!     type Name = ();
//!     fn cell_name(&self) {}
//! }
//!
//! #[derive(Debug)]
//! struct FlatGrid;
//! impl Grid<Cell> for FlatGrid {
//!     fn id(&self) -> GridId { GridId(0) }
//!     fn get(&self, _p: Position) -> Result<Cell, OutOfBounds> { Ok(Cell) }
//!     fn neighbour(&self, _p: Position, _offset: Position) -> Result<ResolvedNeighbour<Cell>, OutOfBounds> {
//!         Err(OutOfBounds) // no edges in this toy example
//!     }
//! }
//!
//! let grid: Rc<dyn Grid<Cell>> = Rc::new(FlatGrid);
//! let mut space = VertexSpaceOptions::new(
//!     |_v: &Vertex<Cell>, _h: &VertexHash| HashMap::new(),
//! ).build();
//! let v = Vertex::new(grid, Position::new(0, 0, 0));
//! assert!(space.addvertex(v)); // a freshly added vertex is a singleton graph
//! ```
//!
//! ## Module map
//!
//! | Module | Responsibility |
//! |---|---|
//! | [`grid`] | The `Grid` abstraction over cell lookup and neighbour resolution. |
//! | [`vertex`] | The `(grid, position)` vertex/hash model and grid-identity registry. |
//! | [`handler_lut`] | Generic key→handler table with uniqueness checks. |
//! | [`neighbour_lut`] | Per-cell-kind candidate-offset lookup. |
//! | [`filter_lut`] | Per-destination inbound-acceptance predicate lookup. |
//! | [`voxel_successor`] | Composes the above into a BFM-ready successor function. |
//! | [`bfm`] | The generic breadth-first mapper. |
//! | [`vertex_space`] | The unbounded connected-component tracker. |
//! | [`rope_graph`] | The refcounted inter-group multigraph. |
//! | [`group_space`] | The bounded-size connected-component tracker. |
//! | [`cache`] | The per-operation write-back cache. |
//! | [`config`] | Chained builders for tracker construction. |
//! | [`error`] | The crate's error taxonomy. |
//! | [`ids`] | The component-id type shared by graphs and groups. |

pub mod bfm;
pub mod cache;
pub mod config;
pub mod error;
pub mod filter_lut;
pub mod grid;
pub mod group_space;
pub mod handler_lut;
pub mod ids;
pub mod neighbour_lut;
pub mod rope_graph;
pub mod vertex;
pub mod vertex_space;
pub mod voxel_successor;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bfm::{Bfm, BfmCallbacks, BfmOptions, BfmStats, FrontierRemainder};
    pub use crate::cache::{WritableGrid, WriteBackCache};
    pub use crate::config::{GroupSpaceOptions, VertexSpaceOptions};
    pub use crate::error::{LutResult, LutSignal, Result, TrackerError};
    pub use crate::filter_lut::{FilterArgs, InboundFilterLut};
    pub use crate::grid::{CellData, Grid, GridId, OutOfBounds, Position, ResolvedNeighbour};
    pub use crate::group_space::{GroupSpace, GroupSpaceCallbacks};
    pub use crate::handler_lut::{HandlerLut, HandlerOutcome};
    pub use crate::ids::ComponentId;
    pub use crate::neighbour_lut::{Candidates, NeighbourSetLut};
    pub use crate::rope_graph::{GroupId, Rope, RopeGraph};
    pub use crate::vertex::{Vertex, VertexHash, VertexHasher};
    pub use crate::vertex_space::{GraphId, VertexSpace, VertexSpaceCallbacks};
    pub use crate::voxel_successor::{CandidateOutcome, VoxelSuccessor};
}

// Re-export commonly used items at crate root
pub use error::{LutSignal, Result, TrackerError};
pub use group_space::GroupSpace;
pub use vertex_space::VertexSpace;
