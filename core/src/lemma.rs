//! Verb base forms, resolved against the closed vocabulary.

use crate::Vocabulary;
use lazy_static::lazy_static;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashMap;

lazy_static! {
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref IRREGULAR: HashMap<&'static str, &'static str> = {
        let pairs: &[(&str, &str)] = &[
            ("am", "be"), ("is", "be"), ("are", "be"), ("was", "be"), ("were", "be"), ("been", "be"), ("being", "be"),
            ("has", "have"), ("had", "have"), ("having", "have"),
            ("does", "do"), ("did", "do"), ("done", "do"),
            ("went", "go"), ("gone", "go"), ("goes", "go"),
            ("ran", "run"), ("made", "make"), ("found", "find"), ("got", "get"), ("gotten", "get"),
            ("took", "take"), ("taken", "take"), ("gave", "give"), ("given", "give"),
            ("built", "build"), ("bought", "buy"), ("sought", "seek"), ("kept", "keep"), ("left", "leave"),
            ("held", "hold"), ("led", "lead"), ("met", "meet"), ("sent", "send"), ("spent", "spend"),
            ("told", "tell"), ("sold", "sell"), ("thought", "think"), ("brought", "bring"), ("caught", "catch"),
            ("taught", "teach"), ("wrote", "write"), ("written", "write"), ("chose", "choose"), ("chosen", "choose"),
            ("drew", "draw"), ("drawn", "draw"), ("grew", "grow"), ("grown", "grow"), ("knew", "know"), ("known", "know"),
            ("saw", "see"), ("seen", "see"), ("began", "begin"), ("begun", "begin"), ("broke", "break"), ("broken", "break"),
            ("fell", "fall"), ("fallen", "fall"), ("flew", "fly"), ("flown", "fly"), ("froze", "freeze"), ("frozen", "freeze"),
            ("hid", "hide"), ("hidden", "hide"), ("rose", "rise"), ("risen", "rise"), ("spoke", "speak"), ("spoken", "speak"),
            ("stood", "stand"), ("won", "win"), ("wound", "wind"), ("bound", "bind"), ("dealt", "deal"), ("meant", "mean"),
        ];
        pairs.iter().copied().collect()
    };
}

/// Suffix rewrites tried in order; the first base form present in the vocabulary wins.
const RULES: &[(&str, &str)] = &[
    ("ies", "y"),
    ("ied", "y"),
    ("es", "e"),
    ("es", ""),
    ("s", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

pub struct Lemmatizer<'a> {
    vocab: &'a Vocabulary,
}

impl<'a> Lemmatizer<'a> {
    pub fn new(vocab: &'a Vocabulary) -> Self { Self { vocab } }

    /// Verb base form of `word`; the word itself when no known base form applies.
    pub fn verb(&self, word: &str) -> String {
        if let Some(base) = IRREGULAR.get(word) {
            return base.to_string();
        }
        for (suffix, replacement) in RULES {
            let Some(stem) = word.strip_suffix(suffix) else { continue };
            if stem.is_empty() { continue; }
            let candidate = format!("{stem}{replacement}");
            if self.vocab.contains(&candidate) {
                return candidate;
            }
            // running -> runn -> run
            if replacement.is_empty() {
                if let Some(undoubled) = undouble(stem) {
                    if self.vocab.contains(undoubled) {
                        return undoubled.to_string();
                    }
                }
            }
        }
        let stem = STEMMER.stem(word);
        if stem != word && self.vocab.contains(&stem) {
            return stem.into_owned();
        }
        if !self.vocab.contains(word) {
            if let Some(base) = strip_inflection(word) {
                return base;
            }
        }
        word.to_string()
    }
}

/// Bare base form of an unknown inflected word, so misspellings like
/// `sroting` still reach correction as `srot`.
fn strip_inflection(word: &str) -> Option<String> {
    if let Some(stem) = word.strip_suffix("ies") {
        return (stem.len() >= 2).then(|| format!("{stem}y"));
    }
    if word.ends_with("ss") {
        return None;
    }
    for suffix in ["ing", "ed", "es", "s"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            if stem.len() < 3 { return None; }
            return Some(undouble(stem).unwrap_or(stem).to_string());
        }
    }
    None
}

fn undouble(stem: &str) -> Option<&str> {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if n >= 3 && bytes[n - 1] == bytes[n - 2] && bytes[n - 1].is_ascii_alphabetic() && !b"aeiou".contains(&bytes[n - 1]) {
        Some(&stem[..n - 1])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::new(["run", "merge", "sort", "copy", "find", "reverse"].iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn regular_suffixes() {
        let v = vocab();
        let lemma = Lemmatizer::new(&v);
        assert_eq!(lemma.verb("running"), "run");
        assert_eq!(lemma.verb("merging"), "merge");
        assert_eq!(lemma.verb("sorted"), "sort");
        assert_eq!(lemma.verb("copies"), "copy");
        assert_eq!(lemma.verb("reverses"), "reverse");
    }

    #[test]
    fn irregular_forms() {
        let v = vocab();
        let lemma = Lemmatizer::new(&v);
        assert_eq!(lemma.verb("ran"), "run");
        assert_eq!(lemma.verb("found"), "find");
    }

    #[test]
    fn unknown_words_are_unchanged() {
        let v = vocab();
        let lemma = Lemmatizer::new(&v);
        assert_eq!(lemma.verb("xyzzyqq"), "xyzzyqq");
        assert_eq!(lemma.verb("sum"), "sum");
    }

    #[test]
    fn unknown_inflections_lose_their_suffix() {
        let v = vocab();
        let lemma = Lemmatizer::new(&v);
        assert_eq!(lemma.verb("sroting"), "srot");
        assert_eq!(lemma.verb("travversed"), "travvers");
        assert_eq!(lemma.verb("stopped"), "stop");
        assert_eq!(lemma.verb("address"), "address");
        assert_eq!(lemma.verb("is"), "be");
    }
}
