//! Integration tests for the document model

use andson_foundation::ErrorKind;
use andson_storage::{Document, EDITION, NewAnime, NewReview, NewView, SUPPORTED_VERSION, Store};

fn store() -> Store {
    let mut store = Store::new();
    let a = store
        .create_anime(NewAnime::new("Mononoke").with_aliases(["Mononoke (2007)"]))
        .unwrap();
    let view = store
        .create_view(a, NewView::new("marathon").with_episode_range(["1", "2", "3"]))
        .unwrap();
    store
        .add_review(view, NewReview::new("art").with_item("visuals").with_ranking(10))
        .unwrap();
    store
}

#[test]
fn default_document_is_empty_and_current() {
    let doc = Document::default();

    assert_eq!(doc.edition, EDITION);
    assert_eq!(doc.version, SUPPORTED_VERSION);
    assert_eq!(Store::from_document(doc).unwrap(), Store::new());
}

#[test]
fn round_trip_then_continue_editing() {
    let original = store();
    let mut restored = Store::from_document(original.to_document()).unwrap();

    let a = restored.lookup_anime("Mononoke (2007)").unwrap();
    let next = restored.create_anime(NewAnime::new("Monster")).unwrap();

    assert_eq!(a.get(), 1);
    assert_eq!(next.get(), 2);
    assert!(restored.create_anime(NewAnime::new("Mononoke")).is_err());
}

#[test]
fn title_repeated_in_own_aliases_is_rejected() {
    let mut doc = store().to_document();
    doc.animes
        .objects
        .get_mut(&1)
        .unwrap()
        .aliases
        .push("Mononoke".into());

    let err = Store::from_document(doc).unwrap_err();

    assert!(matches!(err.kind, ErrorKind::DuplicateName { .. }));
}

#[test]
fn duplicate_review_titles_are_rejected() {
    let mut doc = store().to_document();
    let reviews = &mut doc
        .animes
        .objects
        .get_mut(&1)
        .unwrap()
        .views
        .objects
        .get_mut(&1)
        .unwrap()
        .reviews;
    let copy = reviews.objects[&1].clone();
    reviews.objects.insert(2, copy);
    reviews.last_id = 2;

    let err = Store::from_document(doc).unwrap_err();

    assert!(matches!(err.kind, ErrorKind::DuplicateName { .. }));
}

#[test]
fn newer_version_is_rejected() {
    let mut doc = store().to_document();
    doc.version = [1, 0, 1];

    let err = Store::from_document(doc).unwrap_err();

    assert!(matches!(err.kind, ErrorKind::IncompatibleVersion { .. }));
}
