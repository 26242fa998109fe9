//! Boolean evaluation over an [`InvertedIndex`].
//!
//! All functions are pure: they borrow the index and return fresh posting lists,
//! so any number of queries may be evaluated against one index at the same time.

use crate::index::InvertedIndex;
use crate::postings::PostingList;
use crate::query::Query;

/// Intersects the postings of every word in an AND-group (per-document minimum).
///
/// A word missing from the index collapses the whole group to empty.
pub fn evaluate_and_group<S: AsRef<str>>(index: &InvertedIndex, words: &[S]) -> PostingList {
    let Some((first, rest)) = words.split_first() else {
        return PostingList::new();
    };
    let Some(mut acc) = index.lookup(first.as_ref()).cloned() else {
        return PostingList::new();
    };
    for word in rest {
        if acc.is_empty() {
            break;
        }
        acc = match index.lookup(word.as_ref()) {
            Some(pl) => acc.intersect(pl),
            None => return PostingList::new(),
        };
    }
    acc
}

/// Additive union of AND-group results (per-document sum).
pub fn evaluate_or<I>(group_results: I) -> PostingList
where
    I: IntoIterator<Item = PostingList>,
{
    group_results
        .into_iter()
        .reduce(|acc, g| acc.union(&g))
        .unwrap_or_default()
}

pub fn evaluate_query(index: &InvertedIndex, query: &Query) -> PostingList {
    debug_assert!(!query.groups().is_empty(), "parsed queries always have a group");
    evaluate_or(query.groups().iter().map(|g| evaluate_and_group(index, g.as_slice())))
}
