use super::*;
use crate::grid::{Grid, GridId, OutOfBounds, Position, ResolvedNeighbour};
use std::cell::RefCell;
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

    fn neighbour(&self, _position: Position, _offset: Position) -> Result<ResolvedNeighbour<Cell>, OutOfBounds> {
        Err(OutOfBounds)
    }
}

type Adjacency = Rc<RefCell<HashMap<Position, Vec<Position>>>>;

fn link(adj: &Adjacency, a: Position, b: Position) {
    adj.borrow_mut().entry(a).or_default().push(b);
    adj.borrow_mut().entry(b).or_default().push(a);
}

fn unlink_all(adj: &Adjacency, p: Position) {
    let neighbours = adj.borrow_mut().remove(&p).unwrap_or_default();
    for n in neighbours {
        if let Some(list) = adj.borrow_mut().get_mut(&n) {
            list.retain(|&x| x != p);
        }
    }
}

fn make_successor(
    adj: Adjacency,
    grid: Rc<dyn Grid<Cell>>,
) -> impl FnMut(&Vertex<Cell>, &VertexHash) -> HashMap<VertexHash, Vertex<Cell>> {
    move |v, _h| {
        let mut out = HashMap::new();
        if let Some(neighbours) = adj.borrow().get(&v.position) {
            for &pos in neighbours {
                let hash = VertexHash::from_raw(grid.id(), pos);
                out.insert(hash, Vertex::new(grid.clone(), pos));
            }
        }
        out
    }
}

fn pos(n: i64) -> Position {
    Position::new(n, 0, 0)
}

#[test]
fn s3_bridge_vertex_merges_three_graphs() {
    let adj: Adjacency = Rc::new(RefCell::new(HashMap::new()));
    let grid: Rc<dyn Grid<Cell>> = Rc::new(MockGrid);
    let mut space = VertexSpace::new(make_successor(adj.clone(), grid.clone()), ());

    let (a, b, c, d) = (pos(0), pos(1), pos(2), pos(3));
    assert!(space.addvertex(Vertex::new(grid.clone(), a)));
    assert!(space.addvertex(Vertex::new(grid.clone(), b)));
    assert!(space.addvertex(Vertex::new(grid.clone(), c)));

    let ga = space.whichgraph(VertexHash::from_raw(grid.id(), a)).unwrap();
    let gb = space.whichgraph(VertexHash::from_raw(grid.id(), b)).unwrap();
    let gc = space.whichgraph(VertexHash::from_raw(grid.id(), c)).unwrap();
    assert_ne!(ga, gb);
    assert_ne!(gb, gc);

    link(&adj, d, a);
    link(&adj, d, b);
    link(&adj, d, c);
    assert!(space.addvertex(Vertex::new(grid.clone(), d)));

    let gd = space.whichgraph(VertexHash::from_raw(grid.id(), d)).unwrap();
    assert_eq!(space.whichgraph(VertexHash::from_raw(grid.id(), a)), Some(gd));
    assert_eq!(space.whichgraph(VertexHash::from_raw(grid.id(), b)), Some(gd));
    assert_eq!(space.whichgraph(VertexHash::from_raw(grid.id(), c)), Some(gd));
    assert_eq!(space.graph_size(gd), Some(4));
}

#[test]
fn second_add_of_the_same_vertex_is_a_no_op() {
    let adj: Adjacency = Rc::new(RefCell::new(HashMap::new()));
    let grid: Rc<dyn Grid<Cell>> = Rc::new(MockGrid);
    let mut space = VertexSpace::new(make_successor(adj, grid.clone()), ());
    let vertex = Vertex::new(grid, pos(0));
    assert!(space.addvertex(vertex.clone()));
    assert!(!space.addvertex(vertex));
}

#[test]
fn s4_removing_an_articulation_vertex_splits_the_graph() {
    let adj: Adjacency = Rc::new(RefCell::new(HashMap::new()));
    let grid: Rc<dyn Grid<Cell>> = Rc::new(MockGrid);
    let (a, b, c, d, e) = (pos(0), pos(1), pos(2), pos(3), pos(4));
    link(&adj, a, b);
    link(&adj, b, c);
    link(&adj, c, d);
    link(&adj, d, e);

    let mut space = VertexSpace::new(make_successor(adj.clone(), grid.clone()), ());
    assert!(space.addvertex(Vertex::new(grid.clone(), a)));

    let g_whole = space.whichgraph(VertexHash::from_raw(grid.id(), a)).unwrap();
    assert_eq!(space.graph_size(g_whole), Some(5));

    let mut prior_successors = HashMap::new();
    prior_successors.insert(
        VertexHash::from_raw(grid.id(), b),
        Vertex::new(grid.clone(), b),
    );
    prior_successors.insert(
        VertexHash::from_raw(grid.id(), d),
        Vertex::new(grid.clone(), d),
    );

    unlink_all(&adj, c);
    assert!(space.removevertex(Vertex::new(grid.clone(), c), prior_successors));

    let gb = space.whichgraph(VertexHash::from_raw(grid.id(), b)).unwrap();
    let gd = space.whichgraph(VertexHash::from_raw(grid.id(), d)).unwrap();
    assert_ne!(gb, gd);
    assert_eq!(space.whichgraph(VertexHash::from_raw(grid.id(), a)), Some(gb));
    assert_eq!(space.whichgraph(VertexHash::from_raw(grid.id(), e)), Some(gd));
    assert_eq!(space.graph_size(gb), Some(2));
    assert_eq!(space.graph_size(gd), Some(2));
    assert_eq!(space.whichgraph(VertexHash::from_raw(grid.id(), c)), None);
}

#[test]
fn removing_an_isolated_vertex_destroys_its_graph() {
    let adj: Adjacency = Rc::new(RefCell::new(HashMap::new()));
    let grid: Rc<dyn Grid<Cell>> = Rc::new(MockGrid);
    let mut space = VertexSpace::new(make_successor(adj, grid.clone()), ());
    let hash = VertexHash::from_raw(grid.id(), pos(0));
    assert!(space.addvertex(Vertex::new(grid.clone(), pos(0))));
    let g = space.whichgraph(hash).unwrap();

    assert!(space.removevertex(Vertex::new(grid, pos(0)), HashMap::new()));
    assert_eq!(space.whichgraph(hash), None);
    assert_eq!(space.graph_size(g), None);
}
