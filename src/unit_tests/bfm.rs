use super::*;
use std::cell::RefCell;
use std::rc::Rc;

/// A plain integer adjacency graph, standing in for a voxel successor in
/// these BFM-only tests (the BFM is deliberately generic over `V`/`H`).
fn line_graph(n: i64) -> HashMap<i64, Vec<i64>> {
    let mut adj = HashMap::new();
    for i in 0..n {
        let mut neighbours = Vec::new();
        if i > 0 {
            neighbours.push(i - 1);
        }
        if i + 1 < n {
            neighbours.push(i + 1);
        }
        adj.insert(i, neighbours);
    }
    adj
}

fn successor_fn(
    adj: HashMap<i64, Vec<i64>>,
) -> impl FnMut(&i64, &i64) -> HashMap<i64, i64> {
    move |_v, h| {
        adj.get(h)
            .into_iter()
            .flatten()
            .map(|&n| (n, n))
            .collect()
    }
}

#[derive(Default)]
struct RecordingCallbacks {
    visited_order: Vec<i64>,
    finished_calls: usize,
    remainder_at_finish: Vec<i64>,
}

impl BfmCallbacks<i64, i64> for RecordingCallbacks {
    fn visitor(&mut self, v: &i64, _h: &i64) {
        self.visited_order.push(*v);
    }

    fn finished(&mut self, remainder: FrontierRemainder<'_, i64, i64>) {
        self.finished_calls += 1;
        self.remainder_at_finish = remainder.map(|(v, _)| *v).collect();
    }
}

#[test]
fn empty_initial_returns_false_immediately() {
    let mut bfm: Bfm<i64, i64, _, ()> = Bfm::new(None, successor_fn(HashMap::new()), (), BfmOptions::default());
    assert!(!bfm.advance());
    assert_eq!(bfm.getvisited().unwrap().len(), 0);
}

#[test]
fn visits_each_vertex_at_most_once_on_a_cycle() {
    // A 4-cycle: 0-1-2-3-0.
    let mut adj = HashMap::new();
    adj.insert(0, vec![1, 3]);
    adj.insert(1, vec![0, 2]);
    adj.insert(2, vec![1, 3]);
    adj.insert(3, vec![2, 0]);

    let mut bfm = Bfm::new(
        Some((0, 0)),
        successor_fn(adj),
        RecordingCallbacks::default(),
        BfmOptions::default(),
    );
    bfm.run();

    let visited = bfm.getvisited().unwrap();
    assert_eq!(visited.len(), 4);
    assert_eq!(bfm.callbacks().finished_calls, 1);
    let mut order = bfm.callbacks().visited_order.clone();
    order.sort();
    assert_eq!(order, vec![0, 1, 2, 3]);
}

#[test]
fn finished_called_exactly_once() {
    let adj = line_graph(5);
    let mut bfm = Bfm::new(
        Some((0, 0)),
        successor_fn(adj),
        RecordingCallbacks::default(),
        BfmOptions::default(),
    );
    bfm.run();
    // Extra advance() calls after termination must not re-invoke finished.
    bfm.advance();
    bfm.advance();
    assert_eq!(bfm.callbacks().finished_calls, 1);
}

#[test]
fn vertex_limit_stops_early_with_nonempty_remainder() {
    // S6: a 100-vertex connected line, vertexLimit = 10.
    let adj = line_graph(100);
    let mut bfm = Bfm::new(
        Some((0, 0)),
        successor_fn(adj),
        RecordingCallbacks::default(),
        BfmOptions { vertex_limit: Some(10) },
    );
    bfm.run();

    assert_eq!(bfm.getvisited().unwrap().len(), 10);
    assert_eq!(bfm.callbacks().finished_calls, 1);
    assert!(!bfm.callbacks().remainder_at_finish.is_empty());
}

#[test]
fn testvertex_false_discards_without_visiting_or_expanding() {
    let adj = line_graph(5);
    struct Reject(RefCell<Vec<i64>>);
    impl BfmCallbacks<i64, i64> for Reject {
        fn testvertex(&mut self, v: &i64, _h: &i64) -> bool {
            *v != 2
        }
        fn visitor(&mut self, v: &i64, _h: &i64) {
            self.0.borrow_mut().push(*v);
        }
    }
    let mut bfm = Bfm::new(Some((0, 0)), successor_fn(adj), Reject(RefCell::new(Vec::new())), BfmOptions::default());
    bfm.run();

    // 2 is discarded, so 3 and 4 (only reachable through 2 from this side
    // in a pure chain 0-1-2-3-4) are never enqueued.
    let visited = bfm.getvisited().unwrap();
    assert!(!visited.contains_key(&2));
    assert!(!visited.contains_key(&3));
    assert!(!visited.contains_key(&4));
    assert!(visited.contains_key(&0));
    assert!(visited.contains_key(&1));
}

#[test]
fn getvisited_is_none_before_finished() {
    let adj = line_graph(3);
    let mut bfm: Bfm<i64, i64, _, ()> = Bfm::new(Some((0, 0)), successor_fn(adj), (), BfmOptions::default());
    assert!(bfm.getvisited().is_none());
    bfm.advance();
    assert!(bfm.getvisited().is_none());
}

#[test]
fn markfrontier_fires_once_per_enqueue() {
    let adj = line_graph(5);
    let marks = Rc::new(RefCell::new(Vec::new()));
    struct Marker(Rc<RefCell<Vec<i64>>>);
    impl BfmCallbacks<i64, i64> for Marker {
        fn markfrontier(&mut self, v: &i64, _h: &i64) {
            self.0.borrow_mut().push(*v);
        }
    }
    let mut bfm = Bfm::new(Some((0, 0)), successor_fn(adj), Marker(marks.clone()), BfmOptions::default());
    bfm.run();
    // Each of 1..=4 is marked exactly once despite multiple expansion paths.
    let marks = marks.borrow();
    for v in 1..5 {
        assert_eq!(marks.iter().filter(|&&m| m == v).count(), 1, "vertex {v} marked more than once");
    }
}
