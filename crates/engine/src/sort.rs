use std::cmp::Ordering;

use crate::engine::DirectoryEntry;

/// Favorites first, then name ascending. Input order breaks remaining ties.
pub(crate) fn order_entries(entries: &mut [DirectoryEntry<'_>]) {
    // slice::sort_by is stable
    entries.sort_by(compare);
}

fn compare(a: &DirectoryEntry<'_>, b: &DirectoryEntry<'_>) -> Ordering {
    b.is_favorite
        .cmp(&a.is_favorite)
        .then_with(|| a.record.name.cmp(&b.record.name))
}
