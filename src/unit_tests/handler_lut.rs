use super::*;

fn make_lut() -> HandlerLut<&'static str, &'static str, usize> {
    HandlerLut::new("test-lut", |data: &&'static str| *data)
}

#[test]
fn query_with_no_handler_is_nodata() {
    let lut = make_lut();
    assert_eq!(lut.query(&"stone"), Err(LutSignal::NoData));
}

#[test]
fn query_dispatches_to_registered_handler() {
    let mut lut = make_lut();
    lut.register("stone", |_| HandlerOutcome::Found(4)).unwrap();
    assert_eq!(lut.query(&"stone"), Ok(4));
}

#[test]
fn handler_declining_propagates_nodata() {
    let mut lut = make_lut();
    lut.register("stone", |_| HandlerOutcome::<usize>::NoData).unwrap();
    assert_eq!(lut.query(&"stone"), Err(LutSignal::NoData));
}

#[test]
fn handler_with_no_reason_is_hookfail() {
    let mut lut = make_lut();
    lut.register("stone", |_| HandlerOutcome::<usize>::HookFail).unwrap();
    assert_eq!(lut.query(&"stone"), Err(LutSignal::HookFail));
}

#[test]
fn re_registering_the_same_key_is_an_error() {
    let mut lut = make_lut();
    lut.register("stone", |_| HandlerOutcome::Found(1)).unwrap();
    let err = lut.register("stone", |_| HandlerOutcome::Found(2)).unwrap_err();
    assert!(matches!(err, TrackerError::ErrDuplicate { .. }));
}

#[test]
fn has_handler_reflects_registration_state() {
    let mut lut = make_lut();
    assert!(!lut.has_handler(&"stone"));
    lut.register("stone", |_| HandlerOutcome::Found(1)).unwrap();
    assert!(lut.has_handler(&"stone"));
}
