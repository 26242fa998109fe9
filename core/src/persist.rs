//! Text persistence for [`InvertedIndex`].
//!
//! One line per word: `word docID count [docID count ...]`, fields separated
//! by single spaces. Words without a nonzero posting are not written.

use crate::error::LoadError;
use crate::postings::DocId;
use crate::tokenizer::is_index_word;
use crate::InvertedIndex;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

impl InvertedIndex {
    /// Writes the index to `path`, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let f = File::create(path.as_ref())?;
        let mut w = BufWriter::new(f);
        write_index(self, &mut w)?;
        w.flush()?;
        tracing::debug!(path = %path.as_ref().display(), words = self.num_words(), "saved index");
        Ok(())
    }

    /// Reconstructs an index previously written by [`InvertedIndex::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<InvertedIndex, LoadError> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|source| LoadError::Open { path: path.to_path_buf(), source })?;
        let index = read_index(BufReader::new(f))?;
        tracing::debug!(path = %path.display(), words = index.num_words(), "loaded index");
        Ok(index)
    }
}

pub fn write_index<W: Write>(index: &InvertedIndex, out: &mut W) -> std::io::Result<()> {
    for (word, pl) in index.iter() {
        write!(out, "{word}")?;
        for (doc_id, count) in pl.iter() {
            write!(out, " {doc_id} {count}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn read_index<R: BufRead>(reader: R) -> Result<InvertedIndex, LoadError> {
    let mut index = InvertedIndex::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        let mut tokens = line.split_whitespace();
        let Some(word) = tokens.next() else {
            tracing::debug!(line = line_no, "skipping blank line in index file");
            continue;
        };
        if !is_index_word(word) {
            return Err(LoadError::InvalidWord { line: line_no, word: word.to_string() });
        }
        let rest: Vec<&str> = tokens.collect();
        if rest.len() % 2 != 0 {
            return Err(LoadError::UnpairedCount { line: line_no, word: word.to_string() });
        }
        for pair in rest.chunks_exact(2) {
            let doc_id: DocId = parse_number(pair[0], line_no, "document ID")?;
            if doc_id == 0 {
                return Err(LoadError::InvalidNumber { line: line_no, token: pair[0].to_string(), what: "document ID" });
            }
            let count = parse_number(pair[1], line_no, "count")?;
            index.set_count(word, doc_id, count);
        }
    }
    Ok(index)
}

fn parse_number(token: &str, line: usize, what: &'static str) -> Result<u32, LoadError> {
    let bad = || LoadError::InvalidNumber { line, token: token.to_string(), what };
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }
    token.parse().map_err(|_| bad())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str) -> Result<InvertedIndex, LoadError> {
        read_index(text.as_bytes())
    }

    #[test]
    fn writes_sorted_lines() {
        let mut idx = InvertedIndex::new();
        idx.set_count("dog", 3, 5);
        idx.set_count("dog", 2, 2);
        idx.set_count("cat", 1, 3);
        idx.set_count("cat", 2, 1);
        idx.set_count("ghost", 1, 0);
        let mut out = Vec::new();
        write_index(&idx, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "cat 1 3 2 1\ndog 2 2 3 5\n");
    }

    #[test]
    fn reads_pairs() {
        let idx = read("cat 1 3 2 1\ndog 2 2 3 5\n").unwrap();
        assert_eq!(idx.lookup("cat").unwrap().get(1), 3);
        assert_eq!(idx.lookup("dog").unwrap().get(3), 5);
        assert_eq!(idx.num_words(), 2);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let idx = read("cat 1 3\n\n   \ndog 2 2\n").unwrap();
        assert_eq!(idx.num_words(), 2);
    }

    #[test]
    fn rejects_odd_integer_count() {
        let err = read("cat 1 3 2\n").unwrap_err();
        assert!(matches!(err, LoadError::UnpairedCount { line: 1, .. }));
    }

    #[test]
    fn rejects_bad_word() {
        let err = read("cat 1 3\n42 1 1\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidWord { line: 2, .. }));
        let err = read("Cat 1 3\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidWord { .. }));
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(matches!(read("cat x 3\n").unwrap_err(), LoadError::InvalidNumber { what: "document ID", .. }));
        assert!(matches!(read("cat 1 -3\n").unwrap_err(), LoadError::InvalidNumber { what: "count", .. }));
        assert!(matches!(read("cat 0 3\n").unwrap_err(), LoadError::InvalidNumber { .. }));
        assert!(matches!(read("cat 1 99999999999\n").unwrap_err(), LoadError::InvalidNumber { .. }));
    }

    #[test]
    fn word_without_pairs_is_empty() {
        let idx = read("cat\n").unwrap();
        assert!(idx.lookup("cat").is_none());
    }

    #[test]
    fn missing_file_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = InvertedIndex::load(dir.path().join("nope")).unwrap_err();
        assert!(err.is_unreadable());
    }

    #[test]
    fn save_to_unwritable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let idx = InvertedIndex::new();
        assert!(idx.save(dir.path().join("missing").join("index")).is_err());
    }
}
