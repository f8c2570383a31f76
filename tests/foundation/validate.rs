//! Integration tests for format validators

use andson_foundation::ErrorKind;
use andson_foundation::validate::{
    check_date, check_month, check_ranking, is_available_ranking, is_date_string,
    is_month_string,
};
use proptest::prelude::*;

#[test]
fn month_strings() {
    assert!(is_month_string("2024-01"));
    assert!(is_month_string("1999-12"));
    assert!(!is_month_string("2024-00"));
    assert!(!is_month_string("2024-13"));
    assert!(!is_month_string("2024-1"));
    assert!(!is_month_string("24-01"));
    assert!(!is_month_string("2024-01-01"));
    assert!(!is_month_string(" 2024-01"));
}

#[test]
fn date_strings() {
    assert!(is_date_string("2024-02-29"));
    assert!(is_date_string("2023-02-31"));
    assert!(!is_date_string("2024-02-32"));
    assert!(!is_date_string("2024-02-00"));
    assert!(!is_date_string("2024-13-01"));
    assert!(!is_date_string("2024/02/01"));
}

#[test]
fn rankings() {
    assert!(is_available_ranking(0));
    assert!(is_available_ranking(10));
    assert!(!is_available_ranking(-1));
    assert!(!is_available_ranking(11));
}

#[test]
fn checks_name_the_field() {
    let err = check_month("duration", "May").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidFormat { field: "duration", .. }));

    let err = check_date("last_episode_date", "yesterday").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::InvalidFormat {
            field: "last_episode_date",
            ..
        }
    ));

    let err = check_ranking("ranking", 100).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::OutOfRange { field: "ranking", value: 100 }));
}

proptest! {
    #[test]
    fn every_real_month_is_accepted(year in 0u32..10_000, month in 1u32..=12) {
        let month_text = format!("{year:04}-{month:02}");
        prop_assert!(is_month_string(&month_text));
    }

    #[test]
    fn ranking_check_agrees_with_predicate(value in -100i64..100) {
        prop_assert_eq!(check_ranking("ranking", value).is_ok(), is_available_ranking(value));
    }
}
