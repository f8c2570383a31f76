//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use andson_foundation::{AnimeId, EntityLevel, Error, ErrorContext, ErrorKind, NameScope};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_invalid_argument_type() {
    let err = Error::invalid_argument_type("_class of view 1", "View", "Review");
    assert!(matches!(err.kind, ErrorKind::InvalidArgumentType { .. }));
    let msg = format!("{err}");
    assert!(msg.contains("View"));
    assert!(msg.contains("Review"));
}

#[test]
fn error_invalid_format() {
    let err = Error::invalid_format("duration", "2024-13");
    assert!(matches!(
        err.kind,
        ErrorKind::InvalidFormat {
            field: "duration",
            ..
        }
    ));
    assert!(format!("{err}").contains("2024-13"));
}

#[test]
fn error_duplicate_name() {
    let err = Error::duplicate_name(NameScope::Anime, "Monster");
    assert!(matches!(err.kind, ErrorKind::DuplicateName { .. }));
    assert_eq!(format!("{err}"), "duplicate name \"Monster\" in anime names");
}

#[test]
fn error_name_not_found() {
    let err = Error::name_not_found(NameScope::View(AnimeId::new(4)), "ep1");
    assert!(matches!(err.kind, ErrorKind::NameNotFound { .. }));
    assert!(format!("{err}").contains("anime 4"));
}

#[test]
fn error_entity_removed() {
    let err = Error::entity_removed(EntityLevel::Review, 8);
    assert!(err.is_removed());
    assert_eq!(err.removed_level(), Some(EntityLevel::Review));
    assert_eq!(format!("{err}"), "review 8 has been removed");
}

#[test]
fn error_malformed_document() {
    let err = Error::malformed_document("anime id 3 outside allocated range 1..=2");
    assert!(matches!(err.kind, ErrorKind::MalformedDocument(_)));
    assert!(!err.is_removed());
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_display() {
    let ctx = ErrorContext::new()
        .with_source("/data/AnDson.json")
        .with_frame("load");

    let msg = format!("{ctx}");
    assert!(msg.contains("at /data/AnDson.json"));
    assert!(msg.contains("in load"));
}

#[test]
fn context_is_optional() {
    let err = Error::out_of_range("ranking", -1);
    assert!(err.context.is_none());

    let err = err.with_context(ErrorContext::new().with_source("memory"));
    assert!(err.context.is_some());
}
