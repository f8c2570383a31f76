//! Integration tests for EntityArena

use andson_foundation::{EntityLevel, ReviewId};
use andson_storage::EntityArena;

#[test]
fn iteration_follows_creation_order() {
    let mut arena: EntityArena<ReviewId, &str> = EntityArena::new();
    let ids: Vec<_> = ["a", "b", "c", "d"].into_iter().map(|v| arena.insert(v).unwrap()).collect();
    arena.remove(ids[1]).unwrap();

    let values: Vec<_> = arena.iter().map(|(_, v)| *v).collect();

    assert_eq!(values, vec!["a", "c", "d"]);
}

#[test]
fn stale_ids_report_their_level() {
    let mut arena: EntityArena<ReviewId, ()> = EntityArena::new();
    let id = arena.insert(()).unwrap();
    arena.clear();

    let err = arena.get(id).unwrap_err();

    assert_eq!(err.removed_level(), Some(EntityLevel::Review));
    assert_eq!(arena.last_id(), 1);
}

#[test]
fn get_mut_edits_in_place() {
    let mut arena: EntityArena<ReviewId, String> = EntityArena::new();
    let id = arena.insert("draft".to_string()).unwrap();

    arena.get_mut(id).unwrap().push_str(" final");

    assert_eq!(arena.get(id).unwrap(), "draft final");
}
