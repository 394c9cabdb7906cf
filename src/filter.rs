//! Translation of catalog search parameters into a store [`Filter`].

use store::{Clause, Filter};

/// Fields searched by the free-text term.
pub const TEXT_FIELDS: [&str; 4] = ["name", "description", "brand", "category"];

/// Build the listing filter for an optional free-text term and brand term.
///
/// - A text term matches when any of [`TEXT_FIELDS`] contains it.
/// - A brand term additionally requires `brand` to contain it.
/// - Neither term yields a filter matching everything.
///
/// Matching is case-insensitive substring matching. Blank terms count as
/// absent; terms are otherwise passed through untrimmed.
pub fn build_filter(q: Option<&str>, brand: Option<&str>) -> Filter {
    let mut filter = Filter::new();
    if let Some(term) = present(q) {
        filter.push(Clause::contains_any_of(TEXT_FIELDS, term));
    }
    if let Some(term) = present(brand) {
        filter.push(Clause::field_contains("brand", term));
    }
    filter
}

fn present(term: Option<&str>) -> Option<&str> {
    term.filter(|t| !t.trim().is_empty())
}
