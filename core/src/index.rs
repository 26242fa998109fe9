use crate::postings::{DocId, PostingList};
use std::collections::HashMap;

/// Normalized word -> posting list.
///
/// Populated either by [`InvertedIndex::insert_occurrence`] while indexing pages
/// or by [`InvertedIndex::set_count`] while reloading a saved index. Query
/// evaluation only ever borrows it immutably.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InvertedIndex {
    postings: HashMap<String, PostingList>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Records one occurrence of `word` in `doc_id`.
    pub fn insert_occurrence(&mut self, word: &str, doc_id: DocId) {
        match self.postings.get_mut(word) {
            Some(pl) => pl.increment(doc_id),
            None => {
                let mut pl = PostingList::new();
                pl.increment(doc_id);
                self.postings.insert(word.to_string(), pl);
            }
        }
    }

    /// Overwrites the stored count for `(word, doc_id)`.
    pub fn set_count(&mut self, word: &str, doc_id: DocId, count: u32) {
        self.postings.entry(word.to_string()).or_default().set(doc_id, count);
    }

    /// Posting list for `word`; `None` means the word was never indexed.
    pub fn lookup(&self, word: &str) -> Option<&PostingList> {
        self.postings.get(word)
    }

    /// Words with at least one nonzero posting, in ascending word order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PostingList)> + '_ {
        let mut words: Vec<(&str, &PostingList)> = self
            .postings
            .iter()
            .filter(|(_, pl)| !pl.is_empty())
            .map(|(w, pl)| (w.as_str(), pl))
            .collect();
        words.sort_unstable_by(|a, b| a.0.cmp(b.0));
        words.into_iter()
    }

    /// Number of words with at least one nonzero posting.
    pub fn num_words(&self) -> usize {
        self.postings.values().filter(|pl| !pl.is_empty()).count()
    }

    /// Every nonzero `(word, doc_id, count)` triple.
    pub fn triples(&self) -> impl Iterator<Item = (&str, DocId, u32)> + '_ {
        self.iter().flat_map(|(w, pl)| pl.iter().map(move |(d, c)| (w, d, c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_counts_occurrences() {
        let mut idx = InvertedIndex::new();
        idx.insert_occurrence("cat", 1);
        idx.insert_occurrence("cat", 1);
        idx.insert_occurrence("cat", 2);
        let pl = idx.lookup("cat").unwrap();
        assert_eq!(pl.get(1), 2);
        assert_eq!(pl.get(2), 1);
        assert!(idx.lookup("dog").is_none());
    }

    #[test]
    fn set_count_overwrites() {
        let mut idx = InvertedIndex::new();
        idx.insert_occurrence("cat", 1);
        idx.set_count("cat", 1, 9);
        idx.set_count("dog", 3, 5);
        assert_eq!(idx.lookup("cat").unwrap().get(1), 9);
        assert_eq!(idx.lookup("dog").unwrap().get(3), 5);
    }

    #[test]
    fn iteration_skips_empty_words_and_is_sorted() {
        let mut idx = InvertedIndex::new();
        idx.set_count("zebra", 1, 1);
        idx.set_count("apple", 2, 2);
        idx.set_count("ghost", 1, 0);
        let words: Vec<&str> = idx.iter().map(|(w, _)| w).collect();
        assert_eq!(words, vec!["apple", "zebra"]);
        assert_eq!(idx.num_words(), 2);
        assert_eq!(idx.triples().count(), 2);
    }
}
