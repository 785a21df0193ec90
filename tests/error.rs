//! Tests for error module

use pathmine::MineError;

#[test]
fn error_display_carries_context() {
    let err = MineError::AllTrajectoriesDiscarded { discarded: 3 };
    assert!(err.to_string().contains("3 discarded"));

    let err = MineError::InvalidThresholds {
        min_path_len: 0,
        min_support: 2,
    };
    assert!(err.to_string().contains("min_path_len=0"));

    let err = MineError::UnknownOwner {
        owner_id: "alice".to_string(),
    };
    assert!(err.to_string().contains("alice"));
}

#[test]
fn sink_constructor_wraps_message() {
    let err = MineError::sink("connection refused");
    assert!(matches!(err, MineError::Sink { .. }));
    assert!(err.to_string().contains("connection refused"));
}
