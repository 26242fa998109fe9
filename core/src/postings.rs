use std::collections::BTreeMap;

pub type DocId = u32;

/// Sparse docID -> count map for one word, or the combined scores of a query.
///
/// Zero counts are never stored, so every entry yielded by [`PostingList::iter`]
/// carries information. Iteration is in ascending docID order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingList {
    counts: BTreeMap<DocId, u32>,
}

impl PostingList {
    pub fn new() -> Self { Self::default() }

    /// Adds one occurrence for `doc_id`.
    pub fn increment(&mut self, doc_id: DocId) {
        let c = self.counts.entry(doc_id).or_insert(0);
        *c = c.saturating_add(1);
    }

    /// Overwrites the count for `doc_id`. Setting zero removes the entry.
    pub fn set(&mut self, doc_id: DocId, count: u32) {
        if count == 0 {
            self.counts.remove(&doc_id);
        } else {
            self.counts.insert(doc_id, count);
        }
    }

    /// Count for `doc_id`, zero when absent.
    pub fn get(&self, doc_id: DocId) -> u32 {
        self.counts.get(&doc_id).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize { self.counts.len() }

    pub fn is_empty(&self) -> bool { self.counts.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (DocId, u32)> + '_ {
        self.counts.iter().map(|(&d, &c)| (d, c))
    }

    pub fn doc_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.counts.keys().copied()
    }

    /// Multiset intersection: per-document minimum. Documents missing from
    /// either side have an implicit count of zero and drop out.
    pub fn intersect(&self, other: &PostingList) -> PostingList {
        let (small, large) = if self.len() <= other.len() { (self, other) } else { (other, self) };
        small
            .iter()
            .filter_map(|(doc_id, c)| {
                let m = c.min(large.get(doc_id));
                (m > 0).then_some((doc_id, m))
            })
            .collect()
    }

    /// Additive union: per-document sum.
    pub fn union(&self, other: &PostingList) -> PostingList {
        let mut out = self.clone();
        for (doc_id, c) in other.iter() {
            let slot = out.counts.entry(doc_id).or_insert(0);
            *slot = slot.saturating_add(c);
        }
        out
    }
}

impl FromIterator<(DocId, u32)> for PostingList {
    fn from_iter<I: IntoIterator<Item = (DocId, u32)>>(iter: I) -> Self {
        let mut pl = PostingList::new();
        for (doc_id, count) in iter {
            pl.set(doc_id, count);
        }
        pl
    }
}
