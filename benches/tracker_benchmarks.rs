//! Benchmarks for vertex-space and group-space mutation throughput on
//! chain-shaped worlds of varying sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use vxconnect::grid::{CellData, Grid, GridId, OutOfBounds, Position, ResolvedNeighbour};
use vxconnect::group_space::GroupSpace;
use vxconnect::vertex::{Vertex, VertexHash};
use vxconnect::vertex_space::VertexSpace;

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

type Adjacency = Rc<RefCell<HashMap<Position, Vec<Position>>>>;

fn chain_adjacency(n: i64) -> Adjacency {
    let adj: Adjacency = Rc::new(RefCell::new(HashMap::new()));
    for i in 0..n {
        let a = Position::new(i, 0, 0);
        if i > 0 {
            adj.borrow_mut()
                .entry(a)
                .or_default()
                .push(Position::new(i - 1, 0, 0));
        }
        if i + 1 < n {
            adj.borrow_mut()
                .entry(a)
                .or_default()
                .push(Position::new(i + 1, 0, 0));
        }
    }
    adj
}

fn make_successor(
    adj: Adjacency,
    grid: Rc<dyn Grid<Cell>>,
) -> impl FnMut(&Vertex<Cell>, &VertexHash) -> HashMap<VertexHash, Vertex<Cell>> {
    move |v, _h| {
        adj.borrow()
            .get(&v.position)
            .into_iter()
            .flatten()
            .map(|&pos| (VertexHash::from_raw(grid.id(), pos), Vertex::new(grid.clone(), pos)))
            .collect()
    }
}

/// Benchmark `VertexSpace::addvertex` building a chain vertex by vertex,
/// the BFM "general path" firing on every insertion that touches an
/// existing graph.
fn bench_vertex_space_chain_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("VertexSpace::addvertex chain");

    for n in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("len", n), n, |b, &n| {
            b.iter(|| {
                let adj = chain_adjacency(n);
                let grid: Rc<dyn Grid<Cell>> = Rc::new(MockGrid);
                let mut space = VertexSpace::new(make_successor(adj, grid.clone()), ());
                for i in 0..n {
                    black_box(space.addvertex(Vertex::new(grid.clone(), Position::new(i, 0, 0))));
                }
            })
        });
    }

    group.finish();
}

/// Benchmark `VertexSpace::removevertex` splitting a fully-built chain at
/// its midpoint, the worst case for the residual-search loop (one BFM run
/// per resulting fragment).
fn bench_vertex_space_midpoint_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("VertexSpace::removevertex midpoint split");

    for n in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("len", n), n, |b, &n| {
            b.iter(|| {
                let adj = chain_adjacency(n);
                let grid: Rc<dyn Grid<Cell>> = Rc::new(MockGrid);
                let mut space = VertexSpace::new(make_successor(adj.clone(), grid.clone()), ());
                for i in 0..n {
                    space.addvertex(Vertex::new(grid.clone(), Position::new(i, 0, 0)));
                }

                let mid = n / 2;
                let mid_pos = Position::new(mid, 0, 0);
                let mut prior = HashMap::new();
                if mid > 0 {
                    let p = Position::new(mid - 1, 0, 0);
                    prior.insert(VertexHash::from_raw(grid.id(), p), Vertex::new(grid.clone(), p));
                }
                if mid + 1 < n {
                    let p = Position::new(mid + 1, 0, 0);
                    prior.insert(VertexHash::from_raw(grid.id(), p), Vertex::new(grid.clone(), p));
                }
                adj.borrow_mut().remove(&mid_pos);
                black_box(space.removevertex(Vertex::new(grid.clone(), mid_pos), prior));
            })
        });
    }

    group.finish();
}

/// Benchmark `GroupSpace::add` building a chain with a small group limit,
/// exercising both group placement and rope-graph bookkeeping on every
/// insertion.
fn bench_group_space_chain_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("GroupSpace::add chain, grouplimit=8");

    for n in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("len", n), n, |b, &n| {
            b.iter(|| {
                let adj = chain_adjacency(n);
                let grid: Rc<dyn Grid<Cell>> = Rc::new(MockGrid);
                let mut space =
                    GroupSpace::new(8, make_successor(adj, grid.clone()), |_v: &Vertex<Cell>, _h: &VertexHash| true, ());
                for i in 0..n {
                    let v = Vertex::new(grid.clone(), Position::new(i, 0, 0));
                    let h = space.hash_of(&v);
                    black_box(space.add(v, h));
                }
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_vertex_space_chain_build,
    bench_vertex_space_midpoint_split,
    bench_group_space_chain_build,
);
criterion_main!(benches);
