use super::*;

#[test]
fn allocator_hands_out_strictly_increasing_ids() {
    let mut alloc = IdAllocator::new();
    let a = alloc.allocate();
    let b = alloc.allocate();
    let c = alloc.allocate();
    assert!(a < b);
    assert!(b < c);
}

#[test]
fn display_is_stable_and_distinguishes_ids() {
    let mut alloc = IdAllocator::new();
    let a = alloc.allocate();
    let b = alloc.allocate();
    assert_ne!(a.to_string(), b.to_string());
}
