//! Integration tests for JSON file persistence

use andson_foundation::ErrorKind;
use andson_runtime::{Database, DocumentConfig, from_json, load_from_file, to_json};
use andson_storage::{NewAnime, NewReview, NewView};

fn populated() -> Database {
    let db = Database::new();
    let anime = db
        .create_anime(
            NewAnime::new("Kino no Tabi")
                .with_aliases(["Kino's Journey"])
                .with_tags(["travel"]),
        )
        .unwrap();
    let view = anime
        .create_view(
            NewView::new("2003 series")
                .with_is_new(false)
                .with_times_view(2)
                .with_last_episode_date("2020-05-17"),
        )
        .unwrap();
    view.add_review(NewReview::new("episodic").with_ranking(8))
        .unwrap();
    db
}

#[test]
fn save_then_open_reproduces_handles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("AnDson.json");
    populated().save(&path).unwrap();

    let db = Database::open(&path).unwrap();

    let anime = db.get_anime("Kino's Journey").unwrap();
    let view = anime.get_view("2003 series").unwrap().unwrap();
    let review = view.get_review("episodic").unwrap().unwrap();
    assert_eq!(anime.tags().unwrap(), vec!["travel".to_string()]);
    assert_eq!(view.times_view().unwrap(), Some(2));
    assert_eq!(review.ranking().unwrap(), Some(8));
}

#[test]
fn compact_and_pretty_files_load_the_same() {
    let dir = tempfile::tempdir().unwrap();
    let pretty = dir.path().join("pretty.json");
    let compact = dir.path().join("compact.json");
    let db = populated();

    db.save_with(&pretty, &DocumentConfig::default()).unwrap();
    db.save_with(&compact, &DocumentConfig::compact()).unwrap();

    assert_eq!(
        load_from_file(&pretty).unwrap(),
        load_from_file(&compact).unwrap()
    );
    let pretty_len = std::fs::metadata(&pretty).unwrap().len();
    let compact_len = std::fs::metadata(&compact).unwrap().len();
    assert!(compact_len < pretty_len);
}

#[test]
fn rejected_file_carries_path_context() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.json");
    std::fs::write(
        &path,
        r#"{"_edition": "AnDson Personal", "_version": [2, 0, 0], "animes": {}}"#,
    )
    .unwrap();

    let err = Database::open(&path).unwrap_err();

    assert!(matches!(err.kind, ErrorKind::IncompatibleVersion { .. }));
    let context = err.context.expect("path attached");
    assert_eq!(context.source, Some(path.display().to_string()));
}

#[test]
fn create_missing_does_not_touch_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new.json");

    let db = Database::open_with(&path, &DocumentConfig::default().with_create_missing(true))
        .unwrap();

    assert_eq!(db.anime_count(), 0);
    assert!(!path.exists());
}

#[test]
fn text_round_trip() {
    let db = populated();
    let text = to_json(&db.snapshot(), &DocumentConfig::default()).unwrap();

    let store = from_json(&text).unwrap();

    assert_eq!(store, db.snapshot());
}
