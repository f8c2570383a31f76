//! End-to-end record keeping through the public surface

use andson::foundation::ErrorKind;
use andson::runtime::Database;
use andson::storage::{NewAnime, NewReview, NewView};

#[test]
fn anime_view_review_walkthrough() {
    let db = Database::new();
    let anime = db
        .create_anime(NewAnime::new("A").with_aliases(["A2"]))
        .unwrap();

    let view = anime
        .create_view(NewView::new("ep1").with_duration(["2024-01"]))
        .unwrap();

    let err = anime.create_view(NewView::new("ep1")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateName { .. }));

    let found = anime.get_view("ep1").unwrap().unwrap();
    assert_eq!(found, view);

    let err = found
        .add_review(NewReview::new("r1").with_ranking(11))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::OutOfRange { value: 11, .. }));

    found
        .add_review(NewReview::new("r1").with_ranking(5))
        .unwrap();
    let review = found.get_review("r1").unwrap().unwrap();
    assert_eq!(review.ranking().unwrap(), Some(5));
}

#[test]
fn create_anime_with_title_as_alias_fails() {
    let db = Database::new();

    let err = db
        .create_anime(NewAnime::new("X").with_aliases(["X"]))
        .unwrap_err();

    assert!(matches!(err.kind, ErrorKind::DuplicateName { .. }));
    assert_eq!(db.anime_count(), 0);
}

#[test]
fn rename_to_current_title_changes_nothing() {
    let db = Database::new();
    let anime = db
        .create_anime(NewAnime::new("A").with_aliases(["A2"]))
        .unwrap();
    let before = db.snapshot();

    anime.set_title("A").unwrap();

    assert_eq!(db.snapshot(), before);
}

#[test]
fn add_alias_twice_is_idempotent() {
    let db = Database::new();
    let anime = db.create_anime(NewAnime::new("A")).unwrap();

    anime.add_alias("A2").unwrap();
    let once = db.snapshot();
    anime.add_alias("A2").unwrap();

    assert_eq!(db.snapshot(), once);
}

#[test]
fn ids_are_never_reused() {
    let db = Database::new();
    let first = db.create_anime(NewAnime::new("A")).unwrap();
    let view = first.create_view(NewView::new("v")).unwrap();
    let review = view.add_review(NewReview::new("r")).unwrap();

    review.destroy().unwrap();
    let review2 = view.add_review(NewReview::new("r")).unwrap();
    view.destroy().unwrap();
    let view2 = first.create_view(NewView::new("v")).unwrap();
    db.clear_animes();
    let second = db.create_anime(NewAnime::new("A")).unwrap();

    assert_ne!(review.key(), review2.key());
    assert_ne!(view.key(), view2.key());
    assert_ne!(first.id(), second.id());
}
