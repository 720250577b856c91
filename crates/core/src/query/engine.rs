//! The query pipeline implementation.

use std::collections::HashMap;

use super::{FacetCount, FacetField, QueryCriteria, QueryResult};
use crate::record::Record;

/// Run one query over a snapshot's records.
pub fn run(records: &[Record], criteria: &QueryCriteria) -> QueryResult {
    let needle = criteria.text.trim().to_lowercase();

    let text_matched: Vec<&Record> = records.iter().filter(|r| matches_text(r, &needle)).collect();

    let facet_counts = count_facets(&text_matched, criteria.facet_field);

    let mut matched: Vec<&Record> = match criteria.facet.as_deref() {
        Some(facet) => {
            let wanted = normalize_facet(facet);
            text_matched
                .into_iter()
                .filter(|r| normalize_facet(facet_of(r, criteria.facet_field)) == wanted)
                .collect()
        }
        None => text_matched,
    };

    sort_records(&mut matched, criteria.sort);

    paginate(&matched, criteria.page, criteria.page_size, facet_counts)
}

/// Empty needles match everything; otherwise any one of display name, raw
/// file name, or author containing the needle is sufficient.
fn matches_text(record: &Record, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    record.display_name.to_lowercase().contains(needle)
        || record.file_name.to_lowercase().contains(needle)
        || record.author.to_lowercase().contains(needle)
}

fn facet_of(record: &Record, field: FacetField) -> &str {
    match field {
        FacetField::Author => &record.author,
        FacetField::Version => &record.version,
    }
}

fn normalize_facet(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Group by normalized facet value; report each group under the first-seen
/// original casing. Records with an empty facet value contribute to no group.
fn count_facets(records: &[&Record], field: FacetField) -> Vec<FacetCount> {
    let mut groups: HashMap<String, (String, usize)> = HashMap::new();
    for record in records {
        let raw = facet_of(record, field).trim();
        if raw.is_empty() {
            continue;
        }
        let entry = groups.entry(raw.to_lowercase()).or_insert_with(|| (raw.to_string(), 0));
        entry.1 += 1;
    }

    let mut counts: Vec<FacetCount> =
        groups.into_values().map(|(value, count)| FacetCount { value, count }).collect();
    counts.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.value.to_lowercase().cmp(&b.value.to_lowercase()))
    });
    counts
}

fn sort_records(records: &mut [&Record], sort: super::SortMode) {
    use super::SortMode::*;
    match sort {
        NewestFirst => records.sort_by(|a, b| {
            b.time_created.cmp(&a.time_created).then_with(|| name_key(a).cmp(&name_key(b)))
        }),
        OldestFirst => records.sort_by(|a, b| {
            a.time_created.cmp(&b.time_created).then_with(|| name_key(a).cmp(&name_key(b)))
        }),
        NameAsc => records.sort_by(|a, b| name_key(a).cmp(&name_key(b)).then_with(|| a.id.cmp(&b.id))),
        LargestFirst => records.sort_by(|a, b| {
            b.file_size_bytes.cmp(&a.file_size_bytes).then_with(|| name_key(a).cmp(&name_key(b)))
        }),
    }
}

fn name_key(record: &Record) -> String {
    record.display_name.to_lowercase()
}

/// Slice one page out of the sorted match set, clamping everything.
fn paginate(matched: &[&Record], page: usize, page_size: usize, facet_counts: Vec<FacetCount>) -> QueryResult {
    let page_size = page_size.max(1);
    let total_items = matched.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_items);
    let records = if start >= total_items {
        Vec::new()
    } else {
        matched[start..end].iter().map(|r| (*r).clone()).collect()
    };

    QueryResult { records, total_items, total_pages, page, facet_counts }
}
