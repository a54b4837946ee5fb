use dsa_core::tokenizer::{normalize_query, tokenize_document};

#[test]
fn it_expands_numbers() {
    let toks = normalize_query("42");
    assert!(toks.contains(&"42".to_string()));
    assert!(toks.contains(&"forty-two".to_string()));
    assert!(toks.contains(&"forty".to_string()));
    assert!(toks.contains(&"two".to_string()));
}

#[test]
fn it_splits_spelled_out_scales() {
    let toks = normalize_query("top 100 liked");
    for t in ["100", "one hundred", "one", "hundred", "top", "liked"] {
        assert!(toks.contains(&t.to_string()), "missing {t}");
    }
}

#[test]
fn it_filters_stopwords_and_punctuation() {
    let toks = normalize_query("The longest substring, without repeating characters!");
    assert!(!toks.contains(&"the".to_string()));
    assert!(toks.contains(&"substring".to_string()));
    assert!(toks.contains(&"characters".to_string()));
    assert!(toks.iter().all(|t| !t.contains(',') && !t.contains('!')));
}

#[test]
fn it_extracts_alphabetic_runs() {
    let toks = normalize_query("twoSum n2 k-th");
    for t in ["twosum", "n2", "n", "kth"] {
        assert!(toks.contains(&t.to_string()), "missing {t}");
    }
    assert!(toks.contains(&"2".to_string()));
}

#[test]
fn it_maps_number_words_per_word() {
    let toks = normalize_query("three sum");
    assert!(toks.contains(&"3".to_string()));
    // phrases are not reassembled
    let toks = normalize_query("forty two");
    assert!(toks.contains(&"40".to_string()));
    assert!(toks.contains(&"2".to_string()));
    assert!(!toks.contains(&"42".to_string()));
}

#[test]
fn it_is_sorted_and_deduplicated() {
    let toks = normalize_query("sum Sum SUM");
    assert_eq!(toks, vec!["sum"]);
}

#[test]
fn document_tokens_are_normalized() {
    let words = tokenize_document("Ｍerge Two Sorted Lists, in-place.");
    assert_eq!(words, vec!["merge", "two", "sorted", "lists", "place"]);
}
