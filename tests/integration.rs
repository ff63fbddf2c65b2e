//! End-to-end integration tests driving the full pipeline — a real
//! [`Grid`] implementation, through [`VoxelSuccessor`], into
//! [`VertexSpace`] and [`GroupSpace`] — rather than the unit-level
//! adjacency-closure successors the per-module tests use.

mod support;

use std::rc::Rc;

use support::mock_grid::{CellName, MockCell, MockGrid};
use vxconnect::config::{GroupSpaceOptions, VertexSpaceOptions};
use vxconnect::filter_lut::InboundFilterLut;
use vxconnect::grid::{Grid, Position};
use vxconnect::handler_lut::HandlerOutcome;
use vxconnect::neighbour_lut::{Candidates, NeighbourSetLut};
use vxconnect::vertex::{Vertex, VertexHasher};
use vxconnect::voxel_successor::VoxelSuccessor;

const STONE: CellName = CellName("stone");
const AIR: CellName = CellName("air");

fn axis_offsets() -> Candidates<&'static str> {
    let mut m = Candidates::new();
    m.insert("east", Position::new(1, 0, 0));
    m.insert("west", Position::new(-1, 0, 0));
    m.insert("north", Position::new(0, 1, 0));
    m.insert("south", Position::new(0, -1, 0));
    m
}

fn build_voxel_successor() -> VoxelSuccessor<MockCell, &'static str> {
    let mut neighbour_lut: NeighbourSetLut<MockCell, &'static str> = NeighbourSetLut::new();
    neighbour_lut
        .add_custom_hook(STONE, |_| HandlerOutcome::Found(axis_offsets()))
        .unwrap();
    neighbour_lut
        .add_custom_hook(AIR, |_| HandlerOutcome::Found(Candidates::new()))
        .unwrap();

    let mut filter_lut: InboundFilterLut<MockCell, &'static str> = InboundFilterLut::new();
    filter_lut
        .register(STONE, |_| HandlerOutcome::Found(true))
        .unwrap();

    VoxelSuccessor::new(neighbour_lut, filter_lut)
}

/// S2 driven through the real public API: a plus-shaped stone cluster on
/// a flat grid, wired through `VertexSpace::addvertex`, ends up as one
/// five-vertex graph (the centre plus its four arms).
#[test]
fn s2_plus_shape_forms_one_graph_through_vertex_space() {
    let grid = MockGrid::new(7);
    let center = Position::new(2, 2, 0);
    for p in [
        center,
        Position::new(3, 2, 0),
        Position::new(1, 2, 0),
        Position::new(2, 3, 0),
        Position::new(2, 1, 0),
    ] {
        grid.set(p, MockCell::new("stone"));
    }
    // A sixth, disconnected stone elsewhere on the same grid: must stay
    // its own singleton graph.
    grid.set(Position::new(4, 4, 0), MockCell::new("stone"));

    let voxel_successor = build_voxel_successor();
    let hasher = VertexHasher::new();
    let grid_dyn: Rc<dyn Grid<MockCell>> = grid;

    let successor = |v: &Vertex<MockCell>, _h: &vxconnect::vertex::VertexHash| {
        voxel_successor.successors(v, &hasher)
    };
    let mut space = VertexSpaceOptions::new(successor).build();

    for p in [
        center,
        Position::new(3, 2, 0),
        Position::new(1, 2, 0),
        Position::new(2, 3, 0),
        Position::new(2, 1, 0),
    ] {
        space.addvertex(Vertex::new(grid_dyn.clone(), p));
    }
    space.addvertex(Vertex::new(grid_dyn.clone(), Position::new(4, 4, 0)));

    let center_hash = hasher.hash(&Vertex::new(grid_dyn.clone(), center));
    let plus_graph = space.whichgraph(center_hash).unwrap();
    assert_eq!(space.graph_size(plus_graph), Some(5));

    let lone_hash = hasher.hash(&Vertex::new(grid_dyn.clone(), Position::new(4, 4, 0)));
    let lone_graph = space.whichgraph(lone_hash).unwrap();
    assert_ne!(plus_graph, lone_graph);
    assert_eq!(space.graph_size(lone_graph), Some(1));
}

/// The same plus shape through `GroupSpace` with a limit small enough to
/// force a split: the centre and two arms fit in one group, the
/// remaining two arms in another, joined by a rope.
#[test]
fn plus_shape_through_group_space_splits_and_ropes_when_over_limit() {
    let grid = MockGrid::new(9);
    let center = Position::new(2, 2, 0);
    let arms = [
        Position::new(3, 2, 0),
        Position::new(1, 2, 0),
        Position::new(2, 3, 0),
        Position::new(2, 1, 0),
    ];
    grid.set(center, MockCell::new("stone"));
    for &p in &arms {
        grid.set(p, MockCell::new("stone"));
    }

    let voxel_successor = build_voxel_successor();
    let hasher = VertexHasher::new();
    let grid_dyn: Rc<dyn Grid<MockCell>> = grid;
    let successor = |v: &Vertex<MockCell>, _h: &vxconnect::vertex::VertexHash| {
        voxel_successor.successors(v, &hasher)
    };

    let mut space = GroupSpaceOptions::new(3, successor).build();

    let center_vertex = Vertex::new(grid_dyn.clone(), center);
    let center_hash = space.hash_of(&center_vertex);
    space.add(center_vertex, center_hash);

    for &p in &arms {
        let v = Vertex::new(grid_dyn.clone(), p);
        let h = space.hash_of(&v);
        space.add(v, h);
    }

    let groups: std::collections::HashSet<_> = std::iter::once(center)
        .chain(arms)
        .map(|p| space.whichgroup(space.hash_of(&Vertex::new(grid_dyn.clone(), p))).unwrap())
        .collect();
    assert!(
        groups.len() >= 2,
        "5 mutually-adjacent vertices cannot fit in one group of limit 3"
    );
    for &g in &groups {
        assert!(space.group_size(g).unwrap() <= 3);
    }
}

/// A grid identity-token is retained by the hasher for as long as the
/// hasher is alive, even after every `Rc` handle a test holds directly is
/// dropped, as long as a vertex referencing it was hashed.
#[test]
fn hasher_retains_grid_identity_across_drops() {
    let hasher: VertexHasher<MockCell> = VertexHasher::new();
    {
        let grid = MockGrid::new(42);
        let grid_dyn: Rc<dyn Grid<MockCell>> = grid;
        let vertex = Vertex::new(grid_dyn, Position::new(0, 0, 0));
        hasher.hash(&vertex);
    }
    assert_eq!(hasher.grids_retained(), 1);
}
