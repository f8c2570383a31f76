//! Integration tests for NameCatalog

use andson_foundation::{AnimeId, ErrorKind, NameScope, ViewId};
use andson_storage::NameCatalog;

#[test]
fn errors_carry_catalog_scope() {
    let mut titles: NameCatalog<ViewId> = NameCatalog::new(NameScope::View(AnimeId::new(3)));
    titles.insert("ep1", ViewId::new(1)).unwrap();

    let err = titles.insert("ep1", ViewId::new(2)).unwrap_err();

    assert!(matches!(
        err.kind,
        ErrorKind::DuplicateName {
            scope: NameScope::View(anime),
            ..
        } if anime == AnimeId::new(3)
    ));
}

#[test]
fn iter_yields_every_pair() {
    let catalog = NameCatalog::rebuild(
        NameScope::Anime,
        [("A", AnimeId::new(1)), ("A2", AnimeId::new(1)), ("B", AnimeId::new(2))],
    )
    .unwrap();

    let mut pairs: Vec<_> = catalog.iter().map(|(n, id)| (n.to_string(), id.get())).collect();
    pairs.sort();

    assert_eq!(
        pairs,
        vec![("A".to_string(), 1), ("A2".to_string(), 1), ("B".to_string(), 2)]
    );
}

#[test]
fn clear_empties_catalog() {
    let mut catalog = NameCatalog::rebuild(NameScope::Anime, [("A", AnimeId::new(1))]).unwrap();

    catalog.clear();

    assert!(catalog.is_empty());
    assert_eq!(catalog.scope(), NameScope::Anime);
}
