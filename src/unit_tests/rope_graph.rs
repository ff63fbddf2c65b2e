use super::*;
use crate::grid::{GridId, Position};

fn h(n: i64) -> VertexHash {
    VertexHash::from_raw(GridId(1), Position::new(n, 0, 0))
}

fn g(id: u64) -> GroupId {
    // GroupId has no public constructor; route through an IdAllocator so
    // tests mint the same kind of id group-space would.
    let mut alloc = crate::ids::IdAllocator::new();
    let mut last = alloc.allocate();
    for _ in 1..=id {
        last = alloc.allocate();
    }
    last
}

fn succ(pairs: &[(VertexHash, GroupId)]) -> HashMap<VertexHash, Option<GroupId>> {
    pairs.iter().map(|&(h, gid)| (h, Some(gid))).collect()
}

///  S1, condensed: "foo"/"bar" vertex labels don't matter to the
/// rope graph, only hashes and groups do.
#[test]
fn s1_rope_graph_basics() {
    let mut rg = RopeGraph::new();
    let (g1, g2, g3) = (g(1), g(2), g(3));
    let (a, b, c) = (h(1), h(2), h(3));

    rg.update(a, g1, &succ(&[(b, g2)]));
    assert_eq!(rg.successor(g1).collect::<HashSet<_>>(), HashSet::from([g2]));

    rg.update(c, g1, &succ(&[(b, g2)]));
    assert_eq!(rg.successor(g1).collect::<HashSet<_>>(), HashSet::from([g2]));

    rg.update(a, g1, &HashMap::new());
    assert_eq!(
        rg.successor(g1).collect::<HashSet<_>>(),
        HashSet::from([g2]),
        "c's edge to b still holds the rope open"
    );

    rg.update(c, g1, &HashMap::new());
    assert!(rg.successor(g1).collect::<Vec<_>>().is_empty());

    let baz = h(4);
    rg.update(a, g1, &succ(&[(b, g2), (baz, g3)]));
    assert_eq!(
        rg.successor(g1).collect::<HashSet<_>>(),
        HashSet::from([g2, g3])
    );

    rg.update(b, g2, &HashMap::new());
    assert_eq!(rg.successor(g1).collect::<HashSet<_>>(), HashSet::from([g3]));
    assert_eq!(rg.successor(g3).collect::<HashSet<_>>(), HashSet::from([g1]));
}

#[test]
fn self_pair_is_rejected_silently() {
    let mut rg = RopeGraph::new();
    let gid = g(1);
    let (a, b) = (h(1), h(2));
    rg.update(a, gid, &succ(&[(b, gid)]));
    assert!(rg.successor(gid).collect::<Vec<_>>().is_empty());
    assert!(rg.rope_between(gid, gid).is_none());
}

#[test]
fn untracked_successor_is_ignored() {
    let mut rg = RopeGraph::new();
    let gid = g(1);
    let (a, b) = (h(1), h(2));
    let mut successors = HashMap::new();
    successors.insert(b, None);
    rg.update(a, gid, &successors);
    assert!(rg.successor(gid).collect::<Vec<_>>().is_empty());
}

#[test]
fn rope_count_matches_edge_count() {
    let mut rg = RopeGraph::new();
    let (g1, g2) = (g(1), g(2));
    let (a, c) = (h(1), h(3));
    let b = h(2);
    rg.update(a, g1, &succ(&[(b, g2)]));
    rg.update(c, g1, &succ(&[(b, g2)]));
    let rope = rg.rope_between(g1, g2).unwrap();
    assert_eq!(rope.count(), 2);
}
