//! Name-match ranking for directory search results.

use crate::domain::{Named, NameQuery};

/// Rank candidates by how well their names match `query`.
///
/// Candidates are ranked by:
/// 1. Prefix match (names starting with the query first, ignoring case)
/// 2. Name length in characters (shorter first)
///
/// The sort is stable, so ties keep scan order.
pub fn rank_by_name<T: Named>(mut items: Vec<T>, query: &NameQuery) -> Vec<T> {
    items.sort_by(|a, b| {
        let a_prefix = query.is_prefix_of(a.name());
        let b_prefix = query.is_prefix_of(b.name());
        b_prefix
            .cmp(&a_prefix)
            .then_with(|| a.name().chars().count().cmp(&b.name().chars().count()))
    });

    items
}
