use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WORD_RE: Regex = Regex::new(r"[A-Za-z]+").expect("valid regex");
}

/// Words shorter than this are not indexed.
pub const MIN_WORD_LEN: usize = 3;

/// Lowercases a raw token.
pub fn normalize_word(token: &str) -> String {
    token.to_lowercase()
}

/// True for a non-empty run of lowercase ASCII letters, the only shape a word
/// takes in a saved index.
pub fn is_index_word(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_lowercase())
}

/// Normalized words of page text that are long enough to index.
pub fn page_words(text: &str) -> impl Iterator<Item = String> + '_ {
    WORD_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|w| w.len() >= MIN_WORD_LEN)
        .map(normalize_word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_page_words() {
        let w: Vec<String> = page_words("The Cat sat; on a MAT-mat.").collect();
        assert_eq!(w, vec!["the", "cat", "sat", "mat", "mat"]);
    }

    #[test]
    fn index_word_shape() {
        assert!(is_index_word("cat"));
        assert!(!is_index_word("Cat"));
        assert!(!is_index_word("c4t"));
        assert!(!is_index_word("12"));
        assert!(!is_index_word(""));
    }
}
