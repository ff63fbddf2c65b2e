use super::*;

#[test]
fn duplicate_error_message_names_table_and_key() {
    let err = TrackerError::ErrDuplicate {
        table: "neighbour-lut",
        key: "\"stone\"".to_string(),
    };
    assert!(err.to_string().contains("neighbour-lut"));
    assert!(err.to_string().contains("stone"));
}

#[test]
fn lut_signal_display_matches_wire_codes() {
    assert_eq!(LutSignal::NoData.to_string(), "ENODATA");
    assert_eq!(LutSignal::HookFail.to_string(), "EHOOKFAIL");
}
