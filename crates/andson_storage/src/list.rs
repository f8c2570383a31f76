//! Helpers for the ordered string lists stored on records.

/// Appends `value` to an optional list unless present, creating the list
/// if it is unset.
pub(crate) fn push_unique(list: &mut Option<Vec<String>>, value: &str) {
    let items = list.get_or_insert_with(Vec::new);
    if !items.iter().any(|item| item == value) {
        items.push(value.to_string());
    }
}

/// Removes the first occurrence of `value` from an optional list.
pub(crate) fn remove_item(list: &mut Option<Vec<String>>, value: &str) {
    if let Some(items) = list {
        if let Some(pos) = items.iter().position(|item| item == value) {
            items.remove(pos);
        }
    }
}

/// Drops repeated entries, keeping the first occurrence of each.
pub(crate) fn dedup<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for item in items {
        let item = item.into();
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
