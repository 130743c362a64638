use std::collections::BTreeSet;

use crate::types::ContactRecord;

/// First whitespace-delimited token of an address, if any
#[must_use]
pub fn region_of(address: &str) -> Option<&str> {
    address.split_whitespace().next()
}

/// Distinct regions of the given records, sorted, with `all_label` in front.
///
/// Records without an address contribute nothing.
#[must_use]
pub fn region_candidates(records: &[ContactRecord], all_label: &str) -> Vec<String> {
    let regions: BTreeSet<&str> = records
        .iter()
        .filter_map(|record| region_of(&record.address))
        .collect();

    std::iter::once(all_label.to_string())
        .chain(regions.into_iter().map(ToString::to_string))
        .collect()
}
