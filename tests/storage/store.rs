//! Integration tests for the Store root

use andson_foundation::{AnimeId, EntityLevel, ErrorKind};
use andson_storage::{NewAnime, NewReview, NewView, Store};

// =============================================================================
// Anime names
// =============================================================================

#[test]
fn titles_and_aliases_share_one_namespace() {
    let mut store = Store::new();
    store
        .create_anime(NewAnime::new("Mushishi").with_aliases(["Mushi-Shi"]))
        .unwrap();

    for taken in ["Mushishi", "Mushi-Shi"] {
        let err = store.create_anime(NewAnime::new(taken)).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::DuplicateName { .. }));

        let err = store
            .create_anime(NewAnime::new("Other").with_aliases([taken]))
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::DuplicateName { .. }));
    }
    assert_eq!(store.anime_count(), 1);
}

#[test]
fn renamed_title_is_released() {
    let mut store = Store::new();
    let a = store.create_anime(NewAnime::new("A")).unwrap();

    store.set_anime_title(a, "B").unwrap();
    let again = store.create_anime(NewAnime::new("A")).unwrap();

    assert_eq!(store.lookup_anime("A"), Some(again));
    assert_eq!(store.lookup_anime("B"), Some(a));
}

#[test]
fn aliases_move_between_animes_after_removal() {
    let mut store = Store::new();
    let a = store.create_anime(NewAnime::new("A").with_aliases(["shared"])).unwrap();
    let b = store.create_anime(NewAnime::new("B")).unwrap();

    assert!(store.add_anime_alias(b, "shared").is_err());
    store.remove_anime_alias(a, "shared").unwrap();
    store.add_anime_alias(b, "shared").unwrap();

    assert_eq!(store.lookup_anime("shared"), Some(b));
    assert!(store.catalogs_consistent());
}

#[test]
fn tags_are_free_form_and_unchecked_across_animes() {
    let mut store = Store::new();
    let a = store
        .create_anime(NewAnime::new("A").with_tags(["drama", "drama", "mystery"]))
        .unwrap();
    let b = store.create_anime(NewAnime::new("B").with_tags(["drama"])).unwrap();

    assert_eq!(store.anime(a).unwrap().tags(), ["drama", "mystery"]);
    assert_eq!(store.anime(b).unwrap().tags(), ["drama"]);
}

// =============================================================================
// Views and reviews
// =============================================================================

#[test]
fn view_titles_are_scoped_per_anime() {
    let mut store = Store::new();
    let a = store.create_anime(NewAnime::new("A")).unwrap();
    let b = store.create_anime(NewAnime::new("B")).unwrap();

    store.create_view(a, NewView::new("ep1")).unwrap();
    store.create_view(b, NewView::new("ep1")).unwrap();

    let err = store.create_view(a, NewView::new("ep1")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateName { .. }));
}

#[test]
fn view_and_review_ids_count_per_parent() {
    let mut store = Store::new();
    let a = store.create_anime(NewAnime::new("A")).unwrap();
    let b = store.create_anime(NewAnime::new("B")).unwrap();

    let va = store.create_view(a, NewView::new("x")).unwrap();
    let vb = store.create_view(b, NewView::new("x")).unwrap();

    assert_eq!(va.view, vb.view);
    assert_ne!(va, vb);
}

#[test]
fn review_rename_within_view() {
    let mut store = Store::new();
    let a = store.create_anime(NewAnime::new("A")).unwrap();
    let view = store.create_view(a, NewView::new("ep1")).unwrap();
    let r1 = store.add_review(view, NewReview::new("r1")).unwrap();
    store.add_review(view, NewReview::new("r2")).unwrap();

    assert!(store.rename_review(r1, "r2").is_err());
    store.rename_review(r1, "r3").unwrap();

    assert_eq!(store.lookup_review(view, "r3").unwrap(), Some(r1));
    assert_eq!(store.review(r1).unwrap().title(), "r3");
}

#[test]
fn destroying_missing_anime_fails() {
    let mut store = Store::new();

    let err = store.destroy_anime(AnimeId::new(1)).unwrap_err();

    assert_eq!(err.removed_level(), Some(EntityLevel::Anime));
}
