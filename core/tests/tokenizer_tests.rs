use tse_core::tokenizer::{normalize_word, page_words};

#[test]
fn it_lowercases_and_splits_on_non_letters() {
    let words: Vec<String> = page_words("Running RUNNERS run! The café's menu.").collect();
    assert!(words.contains(&"running".to_string()));
    assert!(words.contains(&"runners".to_string()));
    assert!(words.contains(&"run".to_string()));
    // non-ASCII letters split a word
    assert!(words.contains(&"menu".to_string()));
    assert!(!words.iter().any(|w| w.contains('é')));
}

#[test]
fn it_drops_short_words() {
    let words: Vec<String> = page_words("a an to fox of it dog").collect();
    assert_eq!(words, vec!["fox", "dog"]);
}

#[test]
fn normalize_is_lowercase() {
    assert_eq!(normalize_word("WoMbAt"), "wombat");
}
