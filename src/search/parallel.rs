//! Parallel searches
//!
//! Uses Rayon to run several matchers over one range at once, or to map the
//! nodes one matcher finds. The document is immutable and `Sync`, so the
//! walks need no coordination.

use rayon::prelude::*;

use super::find_all_if;
use crate::dom::NodeRef;
use crate::matcher::Matcher;
use crate::traverse::Range;

/// Run every matcher over `range` in parallel; one result list per
/// matcher, in matcher order
pub fn find_all_each<'a, M>(range: Range<'a>, matchers: &[M]) -> Vec<Vec<NodeRef<'a>>>
where
    M: Matcher + Sync,
{
    matchers
        .par_iter()
        .map(|matcher| {
            let mut found = Vec::new();
            find_all_if(range, &mut found, matcher);
            found
        })
        .collect()
}

/// Find the matching nodes, then map them in parallel. Output follows
/// document order.
pub fn map_matches<'a, M, F, T>(range: Range<'a>, matcher: &M, mapper: F) -> Vec<T>
where
    M: Matcher + ?Sized,
    F: Fn(NodeRef<'a>) -> T + Sync + Send,
    T: Send,
{
    let mut found = Vec::new();
    find_all_if(range, &mut found, matcher);
    found.par_iter().map(|&node| mapper(node)).collect()
}

/// Keyed variant of [`find_all_each`]: each query is `(key, matcher)` and
/// its matches come back under the same key
pub fn find_all_keyed<'a, M>(range: Range<'a>, queries: &[(&str, M)]) -> Vec<(String, Vec<NodeRef<'a>>)>
where
    M: Matcher + Sync,
{
    queries
        .par_iter()
        .map(|(key, matcher)| {
            let mut found = Vec::new();
            find_all_if(range, &mut found, matcher);
            (key.to_string(), found)
        })
        .collect()
}
