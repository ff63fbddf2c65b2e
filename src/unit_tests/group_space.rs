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

    fn neighbour(
        &self,
        _position: Position,
        _offset: Position,
    ) -> Result<ResolvedNeighbour<Cell>, OutOfBounds> {
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

fn always_alive(_v: &Vertex<Cell>, _h: &VertexHash) -> bool {
    true
}

#[test]
fn inserting_an_isolated_vertex_creates_a_singleton_group() {
    let adj: Adjacency = Rc::new(RefCell::new(HashMap::new()));
    let grid: Rc<dyn Grid<Cell>> = Rc::new(MockGrid);
    let mut space = GroupSpace::new(4, make_successor(adj, grid.clone()), always_alive, ());

    let v = Vertex::new(grid.clone(), pos(0));
    let h = space.hash_of(&v);
    assert!(space.add(v, h));
    let g = space.whichgroup(h).unwrap();
    assert_eq!(space.group_size(g), Some(1));
}

#[test]
fn grouplimit_is_never_exceeded_and_overflow_spawns_a_new_group() {
    let adj: Adjacency = Rc::new(RefCell::new(HashMap::new()));
    let grid: Rc<dyn Grid<Cell>> = Rc::new(MockGrid);
    let mut space = GroupSpace::new(2, make_successor(adj.clone(), grid.clone()), always_alive, ());

    let positions: Vec<Position> = (0..4).map(pos).collect();
    for w in positions.windows(2) {
        link(&adj, w[0], w[1]);
    }

    let mut groups = Vec::new();
    for &p in &positions {
        let v = Vertex::new(grid.clone(), p);
        let h = space.hash_of(&v);
        space.add(v, h);
        groups.push(space.whichgroup(h).unwrap());
    }

    for &g in &groups {
        assert!(space.group_size(g).unwrap() <= 2);
    }
    // A chain of 4 with limit 2 cannot fit in fewer than two groups.
    assert!(groups.iter().collect::<HashSet<_>>().len() >= 2);
}

#[test]
fn full_neighbour_groups_force_a_fresh_group_and_a_rope() {
    let adj: Adjacency = Rc::new(RefCell::new(HashMap::new()));
    let grid: Rc<dyn Grid<Cell>> = Rc::new(MockGrid);
    let mut space = GroupSpace::new(1, make_successor(adj.clone(), grid.clone()), always_alive, ());

    let (a, b) = (pos(0), pos(1));
    link(&adj, a, b);

    let va = Vertex::new(grid.clone(), a);
    let ha = space.hash_of(&va);
    space.add(va, ha);
    let ga = space.whichgroup(ha).unwrap();
    assert_eq!(space.group_size(ga), Some(1));

    let vb = Vertex::new(grid.clone(), b);
    let hb = space.hash_of(&vb);
    space.add(vb, hb);
    let gb = space.whichgroup(hb).unwrap();

    assert_ne!(ga, gb, "a's group was already at the limit, so b gets a new one");
    assert_eq!(
        space.rope_successor(ga).collect::<HashSet<_>>(),
        HashSet::from([gb])
    );
    assert_eq!(
        space.rope_successor(gb).collect::<HashSet<_>>(),
        HashSet::from([ga])
    );
}

/// L=4, chain x1..x6 split into G1={x1..x4}, G2={x5,x6}, a single rope
/// on the x4-x5 edge. Removing x4 (by making it untestable and unlinked)
/// must split G1 and retire the rope since no edge survives.
#[test]
fn s5_group_split_retires_the_rope_when_no_edge_survives() {
    let adj: Adjacency = Rc::new(RefCell::new(HashMap::new()));
    let grid: Rc<dyn Grid<Cell>> = Rc::new(MockGrid);
    let dead: Rc<RefCell<HashSet<Position>>> = Rc::new(RefCell::new(HashSet::new()));

    let xs: Vec<Position> = (1..=6).map(pos).collect();
    for w in xs.windows(2) {
        link(&adj, w[0], w[1]);
    }

    let dead_for_test = dead.clone();
    let testvertex = move |v: &Vertex<Cell>, _h: &VertexHash| !dead_for_test.borrow().contains(&v.position);

    let mut space = GroupSpace::new(4, make_successor(adj.clone(), grid.clone()), testvertex, ());

    for &p in &xs {
        let v = Vertex::new(grid.clone(), p);
        let h = space.hash_of(&v);
        space.add(v, h);
    }

    let g1 = space.whichgroup(VertexHash::from_raw(grid.id(), xs[0])).unwrap();
    let g2 = space.whichgroup(VertexHash::from_raw(grid.id(), xs[4])).unwrap();
    assert_ne!(g1, g2);
    assert_eq!(space.group_size(g1), Some(4));
    assert_eq!(space.group_size(g2), Some(2));
    assert_eq!(
        space.rope_successor(g1).collect::<HashSet<_>>(),
        HashSet::from([g2])
    );

    // Remove x4 (xs[3]): mark dead, unlink it, then drive repair via update.
    dead.borrow_mut().insert(xs[3]);
    unlink_all(&adj, xs[3]);
    let v4 = Vertex::new(grid.clone(), xs[3]);
    let h4 = VertexHash::from_raw(grid.id(), xs[3]);
    space.update(v4, h4);

    assert_eq!(space.whichgroup(h4), None);
    let new_g1 = space
        .whichgroup(VertexHash::from_raw(grid.id(), xs[0]))
        .unwrap();
    assert_ne!(new_g1, g1, "the old group id is retired on split");
    assert_eq!(space.group_size(new_g1), Some(3));
    assert!(
        space.rope_successor(g2).collect::<Vec<_>>().is_empty(),
        "no edge survives x4's removal, so the rope must be gone"
    );
    assert!(space.rope_successor(new_g1).collect::<Vec<_>>().is_empty());
}

#[test]
fn update_on_an_untracked_dead_vertex_is_a_no_op() {
    let adj: Adjacency = Rc::new(RefCell::new(HashMap::new()));
    let grid: Rc<dyn Grid<Cell>> = Rc::new(MockGrid);
    let mut space = GroupSpace::new(4, make_successor(adj, grid.clone()), |_v: &Vertex<Cell>, _h: &VertexHash| false, ());
    let v = Vertex::new(grid.clone(), pos(0));
    let h = space.hash_of(&v);
    space.update(v, h);
    assert_eq!(space.whichgroup(h), None);
}
