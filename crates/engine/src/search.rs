use crate::types::ContactRecord;

/// Whether a record matches a free-text query.
///
/// Substring containment on `name` or `address`, case-preserving. An empty query
/// matches everything.
#[must_use]
pub fn matches_query(record: &ContactRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    record.name.contains(query) || record.address.contains(query)
}
