use super::*;

#[test]
fn translate_adds_componentwise() {
    let p = Position::new(1, 2, 3);
    let offset = Position::new(-1, 0, 4);
    assert_eq!(p.translate(offset), Position::new(0, 2, 7));
}

#[test]
fn from_f64_accepts_integer_valued_floats() {
    assert_eq!(Position::from_f64(1.0, -2.0, 0.0).unwrap(), Position::new(1, -2, 0));
}

#[test]
fn from_f64_rejects_fractional_components() {
    let err = Position::from_f64(1.5, 0.0, 0.0).unwrap_err();
    match err {
        TrackerError::NonIntegerCoordinate(_) => {}
        other => panic!("expected NonIntegerCoordinate, got {other:?}"),
    }
}

#[test]
fn display_formats_as_tuple() {
    assert_eq!(Position::new(1, -2, 3).to_string(), "(1, -2, 3)");
}
