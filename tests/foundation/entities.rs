//! Integration tests for ids and id chains

use andson_foundation::{AnimeId, EntityKey, EntityLevel, NameScope, ReviewId, ViewId, ViewKey};

#[test]
fn ids_display_as_numbers() {
    assert_eq!(format!("{}", AnimeId::new(7)), "7");
    assert_eq!(format!("{:?}", ViewId::new(3)), "ViewId(3)");
}

#[test]
fn ids_know_their_level() {
    assert_eq!(AnimeId::LEVEL, EntityLevel::Anime);
    assert_eq!(ViewId::LEVEL, EntityLevel::View);
    assert_eq!(ReviewId::LEVEL, EntityLevel::Review);
    assert_eq!(ReviewId::from_raw(9).raw(), 9);
}

#[test]
fn keys_extend_and_shorten() {
    let view = ViewKey::new(AnimeId::new(1), ViewId::new(2));
    let review = view.review(ReviewId::new(3));

    assert_eq!(review.view_key(), view);
    assert_eq!(format!("{view}"), "1/2");
    assert_eq!(format!("{review}"), "1/2/3");
}

#[test]
fn scopes_describe_themselves() {
    let view = ViewKey::new(AnimeId::new(1), ViewId::new(2));

    assert_eq!(format!("{}", NameScope::Anime), "anime names");
    assert_eq!(format!("{}", NameScope::View(AnimeId::new(1))), "view titles of anime 1");
    assert_eq!(format!("{}", NameScope::Review(view)), "review titles of view 1/2");
}
