//! Whole-database persistence across the runtime and storage layers

use andson::foundation::ErrorKind;
use andson::runtime::{Database, DocumentConfig, from_json, to_json};
use andson::storage::{NewAnime, NewReview, NewView};

#[test]
fn edits_after_reload_continue_counters() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("AnDson.json");
    let db = Database::new();
    let a = db.create_anime(NewAnime::new("A")).unwrap();
    db.create_anime(NewAnime::new("B")).unwrap().destroy().unwrap();
    let view = a.create_view(NewView::new("v1")).unwrap();
    view.destroy().unwrap();
    db.save(&path).unwrap();

    let reopened = Database::open(&path).unwrap();
    let c = reopened.create_anime(NewAnime::new("C")).unwrap();
    let v2 = reopened
        .get_anime("A")
        .unwrap()
        .create_view(NewView::new("v2"))
        .unwrap();

    assert_eq!(c.id().get(), 3);
    assert_eq!(v2.key().view.get(), 2);
}

#[test]
fn json_text_round_trip_is_stable() {
    let db = Database::new();
    let anime = db
        .create_anime(NewAnime::new("Aria").with_aliases(["ARIA The Animation"]))
        .unwrap();
    let view = anime
        .create_view(NewView::new("season 1").with_duration(["2005-10", "2005-12"]))
        .unwrap();
    view.add_review(NewReview::new("mood").with_comment("calm").with_ranking(9))
        .unwrap();
    let config = DocumentConfig::compact();

    let first = to_json(&db.snapshot(), &config).unwrap();
    let second = to_json(&from_json(&first).unwrap(), &config).unwrap();

    assert_eq!(first, second);
}

#[test]
fn document_with_duplicate_titles_fails_to_load() {
    let text = r#"{"_edition": "AnDson Personal", "_version": [1, 0, 0],
        "animes": {"_last_anime_id": 2, "_anime_objects": {
            "1": {"_class": "Anime", "title": "A", "aliases": [], "tags": [],
                  "views": {"_last_view_id": 0, "_view_objects": {}}},
            "2": {"_class": "Anime", "title": "B", "aliases": ["A"], "tags": [],
                  "views": {"_last_view_id": 0, "_view_objects": {}}}}}}"#;

    let err = from_json(text).unwrap_err();

    assert!(matches!(err.kind, ErrorKind::DuplicateName { .. }));
}

#[test]
fn document_with_wrong_class_fails_to_load() {
    let text = r#"{"_edition": "AnDson Personal", "_version": [1, 0, 0],
        "animes": {"_last_anime_id": 1, "_anime_objects": {
            "1": {"_class": "View", "title": "A", "aliases": [], "tags": [],
                  "views": {"_last_view_id": 0, "_view_objects": {}}}}}}"#;

    let err = from_json(text).unwrap_err();

    assert!(matches!(err.kind, ErrorKind::InvalidArgumentType { .. }));
}
