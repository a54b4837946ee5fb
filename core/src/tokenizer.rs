use crate::numbers;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref DIGITS: Regex = Regex::new(r"[0-9]+").expect("valid regex");
    static ref ALPHA_RUN: Regex = Regex::new(r"[a-zA-Z]+").expect("valid regex");
    static ref PUNCT: Regex = Regex::new(r"[\p{P}\p{S}]").expect("valid regex");
    static ref DOC_TOKEN: Regex = Regex::new(r"[\p{L}\p{N}]+").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","can't","cannot","could","couldn't",
            "did","didn't","do","does","doesn't","doing","don't","down","during",
            "each","few","for","from","further",
            "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
            "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
            "let's","me","more","most","mustn't","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
            "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
            "under","until","up","very",
            "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
            "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

pub fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

pub fn strip_punctuation(word: &str) -> String {
    PUNCT.replace_all(word, "").into_owned()
}

/// Turn a raw query into its sorted, deduplicated candidate tokens.
///
/// Digit runs in the raw query contribute themselves plus their English
/// spelling and its hyphen/space pieces. Every non-stopword word contributes
/// its lower-cased, punctuation-free form, each alphabetic run inside it, and
/// its numeric value when the whole word is a number word.
pub fn normalize_query(query: &str) -> Vec<String> {
    let mut candidates = BTreeSet::new();

    for digits in DIGITS.find_iter(query).map(|m| m.as_str()) {
        candidates.insert(digits.to_string());
        let Ok(n) = digits.parse::<u64>() else { continue };
        let words = numbers::to_words(n);
        let parts: Vec<&str> = words.split('-').collect();
        for part in &parts {
            if parts.len() > 1 {
                candidates.insert(part.to_string());
            }
            let pieces: Vec<&str> = part.split(' ').collect();
            if pieces.len() > 1 {
                candidates.extend(pieces.into_iter().map(str::to_string));
            }
        }
        candidates.insert(words);
    }

    for word in query.split_whitespace() {
        let lowered = word.nfkc().collect::<String>().to_lowercase();
        if is_stopword(&lowered) { continue; }
        let stripped = strip_punctuation(&lowered);
        if stripped.is_empty() { continue; }
        for run in ALPHA_RUN.find_iter(&stripped) {
            candidates.insert(run.as_str().to_lowercase());
        }
        if let Some(n) = numbers::word_to_number(&stripped) {
            candidates.insert(n.to_string());
        }
        candidates.insert(stripped);
    }

    candidates.into_iter().collect()
}

/// Offline tokenizer for document bodies: NFKC, lowercase, letter/digit runs, stopwords removed.
pub fn tokenize_document(text: &str) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    DOC_TOKEN
        .find_iter(&normalized)
        .map(|m| m.as_str())
        .filter(|t| !is_stopword(t))
        .map(str::to_string)
        .collect()
}
