//! Pure selection passes over a normalized snapshot: actionable filter,
//! live-first ordering, and the category facet. No side effects; the
//! snapshot itself is never touched.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::config::CategoryScope;
use crate::parser::{Match, MatchStatus};

/// Filters to actionable matches (LIVE or UPCOMING) and orders them:
/// LIVE strictly first, then ascending start time. Unknown start times sort
/// to the front of their status group; exact ties keep input order (the
/// sort is stable).
pub fn select_matches(all: &[Arc<Match>]) -> Vec<Arc<Match>> {
    let mut selected: Vec<Arc<Match>> = all
        .iter()
        .filter(|m| m.status.is_actionable())
        .cloned()
        .collect();

    selected.sort_by_key(|m| (m.status != MatchStatus::Live, m.start_time));
    selected
}

/// Distinct category labels, case-sensitive, lexicographically sorted.
/// Empty/absent categories never appear.
///
/// `scope` decides which matches feed the facet: the full snapshot (the
/// upstream site computes it pre-filter) or only the displayed subset.
pub fn category_facet(all: &[Arc<Match>], scope: CategoryScope) -> Vec<String> {
    let facet: BTreeSet<String> = all
        .iter()
        .filter(|m| match scope {
            CategoryScope::FullSet => true,
            CategoryScope::Displayed => m.status.is_actionable(),
        })
        .filter_map(|m| m.category.clone())
        .collect();

    facet.into_iter().collect()
}
