//! Handles outliving their entities

use andson::foundation::EntityLevel;
use andson::runtime::Database;
use andson::storage::{NewAnime, NewReview, NewView};

#[test]
fn every_operation_on_orphaned_handles_reports_anime_level() {
    let db = Database::new();
    let anime = db.create_anime(NewAnime::new("A")).unwrap();
    let view = anime.create_view(NewView::new("ep1")).unwrap();
    let review = view.add_review(NewReview::new("r1")).unwrap();

    anime.destroy().unwrap();

    let results = [
        view.title().map(drop),
        view.set_title("ep2"),
        view.set_source(None),
        view.add_duration_month("2024-01"),
        view.get_review("r1").map(drop),
        view.reviews().map(drop),
        view.clear_reviews(),
        view.destroy(),
        review.title().map(drop),
        review.set_ranking(Some(3)),
        review.add_episode("1"),
        review.destroy(),
    ];
    for result in results {
        assert_eq!(result.unwrap_err().removed_level(), Some(EntityLevel::Anime));
    }
}

#[test]
fn recreated_title_does_not_revive_old_handles() {
    let db = Database::new();
    let old = db.create_anime(NewAnime::new("A")).unwrap();
    old.destroy().unwrap();

    let new = db.create_anime(NewAnime::new("A")).unwrap();

    assert!(!old.is_alive());
    assert!(new.is_alive());
    assert_ne!(old, new);
}

#[test]
fn reloaded_database_does_not_share_handles() {
    let db = Database::new();
    let anime = db.create_anime(NewAnime::new("A")).unwrap();

    let copy = Database::from_document(db.to_document()).unwrap();
    let same_id = copy.get_anime("A").unwrap();

    assert_eq!(same_id.id(), anime.id());
    assert_ne!(same_id, anime);
    same_id.destroy().unwrap();
    assert!(anime.is_alive());
}
