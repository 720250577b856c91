//! Deterministic query pipeline over a catalog snapshot.
//!
//! The engine is a pure function: identical records and criteria always
//! produce an identical result, with no hidden state and no I/O. It runs
//! synchronously on whichever task calls it.
//!
//! Pipeline order: text filter → facet counts (from the text-filtered set
//! only, so the UI can offer alternatives to the selected facet) → facet
//! filter → sort → clamped pagination.

mod engine;

pub use engine::run;

use serde::{Deserialize, Serialize};

/// Page size used when the settings collaborator provides none.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Sort orders for the final filtered set.
///
/// Every mode ends in a deterministic total order: the primary key is
/// tie-broken by case-insensitive display name (or id, where the name is the
/// primary key).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Creation time descending, newest first. The browser default.
    #[default]
    NewestFirst,
    /// Creation time ascending.
    OldestFirst,
    /// Display name ascending, case-insensitive.
    NameAsc,
    /// File size descending.
    LargestFirst,
}

/// The categorical record attribute used for facet counts and filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FacetField {
    #[default]
    Author,
    Version,
}

/// One search request against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryCriteria {
    /// Free text, matched case-insensitively as a substring of display name,
    /// raw file name, or author. Empty (after trimming) matches everything.
    pub text: String,
    /// Optional facet value; exact case-insensitive match when present.
    pub facet: Option<String>,
    pub facet_field: FacetField,
    pub sort: SortMode,
    /// 1-based page number; out-of-range values clamp to the nearest page.
    pub page: usize,
    /// Clamped to at least 1.
    pub page_size: usize,
}

impl Default for QueryCriteria {
    fn default() -> Self {
        Self {
            text: String::new(),
            facet: None,
            facet_field: FacetField::default(),
            sort: SortMode::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Count of text-matching records bearing one facet value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetCount {
    /// Representative original-case value (first seen in snapshot order).
    pub value: String,
    pub count: usize,
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    /// At most `page_size` records, in the requested sort order.
    pub records: Vec<crate::record::Record>,
    /// Matching item count after all filters, before pagination.
    pub total_items: usize,
    /// Always at least 1, even with zero matching items.
    pub total_pages: usize,
    /// The effective (clamped) page this result holds.
    pub page: usize,
    /// Facet counts over the text-filtered set, independent of the facet
    /// filter itself; sorted by count descending, then value ascending
    /// case-insensitively.
    pub facet_counts: Vec<FacetCount>,
}
