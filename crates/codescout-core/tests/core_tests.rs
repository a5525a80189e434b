//! Tests for codescout-core: envelope invariants, error taxonomy

use codescout_core::*;
use std::path::PathBuf;

// ===========================================================================
// Envelope
// ===========================================================================

#[test]
fn envelope_new_is_complete() {
    let env = Envelope::new(3, vec!["a".to_string(), "b".into(), "c".into()]);
    assert_eq!(env.total_count, 3);
    assert_eq!(env.returned_count, 3);
    assert!(env.is_complete);
    assert!(env.is_success());
    assert_eq!(env.missing_count(), 0);
}

#[test]
fn envelope_byte_counted_result_is_complete() {
    // File writes report bytes, not items; one status line, still complete.
    let env = Envelope::new(4096, vec!["Wrote 4096 bytes".to_string()]);
    assert!(env.is_complete);
    assert_eq!(env.returned_count, 4096);
}

#[test]
fn envelope_partial_tracks_missing() {
    let env = Envelope::partial(10, 4, vec!["a"; 4].iter().map(|s| s.to_string()).collect());
    assert_eq!(env.returned_count, 4);
    assert!(!env.is_complete);
    assert_eq!(env.missing_count(), 6);
    assert!(env.returned_count <= env.total_count);
}

#[test]
fn envelope_partial_clamps_returned_count() {
    let env: Envelope<String> = Envelope::partial(2, 9, Vec::new());
    assert_eq!(env.returned_count, 2);
    assert!(env.is_complete);
}

#[test]
fn envelope_completeness_iff_counts_match() {
    let complete: Envelope<String> = Envelope::partial(5, 5, Vec::new());
    assert!(complete.is_complete);
    let incomplete: Envelope<String> = Envelope::partial(5, 3, Vec::new());
    assert!(!incomplete.is_complete);
}

#[test]
fn envelope_error_is_empty_and_zeroed() {
    let env: Envelope<String> = Envelope::error("io error: boom");
    assert!(env.error);
    assert!(!env.aborted);
    assert!(env.items.is_empty());
    assert_eq!(env.total_count, 0);
    assert_eq!(env.returned_count, 0);
    assert_eq!(env.detail.as_deref(), Some("io error: boom"));
}

#[test]
fn envelope_aborted_is_exclusive_with_error() {
    let env: Envelope<String> = Envelope::aborted();
    assert!(env.aborted);
    assert!(!env.error);
    assert!(env.items.is_empty());
    assert!(!env.is_success());
}

#[test]
fn envelope_summary_attachment() {
    let mut env = Envelope::partial(500, 100, vec!["x".to_string(); 100]);
    assert!(!env.is_summarized);
    env.attach_summary(vec!["condensed".to_string()]);
    assert!(env.is_summarized);
    assert_eq!(env.summary.as_ref().unwrap().len(), 1);
    // Summarization never claims the original was complete.
    assert!(!env.is_complete);
}

#[test]
fn envelope_serializes_for_the_agent() {
    let env = Envelope::new(1, vec!["line".to_string()]);
    let json = serde_json::to_value(&env).unwrap();
    assert_eq!(json["total_count"], 1);
    assert_eq!(json["is_complete"], true);
    // Absent options stay off the wire.
    assert!(json.get("summary").is_none());
    assert!(json.get("detail").is_none());
}

#[test]
fn envelope_deserializes_back() {
    let env: Envelope<String> = Envelope::error("nope");
    let json = serde_json::to_string(&env).unwrap();
    let back: Envelope<String> = serde_json::from_str(&json).unwrap();
    assert!(back.error);
    assert_eq!(back.detail.as_deref(), Some("nope"));
}

// ===========================================================================
// Error taxonomy
// ===========================================================================

#[test]
fn index_missing_message_names_the_fix() {
    let err = Error::IndexMissing(PathBuf::from("/project/tags"));
    let msg = err.to_string();
    assert!(msg.contains("/project/tags"));
    assert!(msg.contains("generate_tags"));
}

#[test]
fn path_escape_message_names_both_paths() {
    let err = Error::path_escape("/etc/passwd", "/project");
    let msg = err.to_string();
    assert!(msg.contains("/etc/passwd"));
    assert!(msg.contains("/project"));
}

#[test]
fn launch_failure_wraps_source() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such binary");
    let err = Error::launch("frobnicate --all", io);
    assert!(err.to_string().contains("frobnicate"));
}

#[test]
fn io_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: Error = io.into();
    assert!(matches!(err, Error::Io(_)));
}
