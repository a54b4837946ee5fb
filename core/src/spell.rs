use crate::Vocabulary;
use std::collections::BTreeSet;

const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Edit-distance-1 corrections drawn from the vocabulary.
pub struct SpellChecker<'a> {
    vocab: &'a Vocabulary,
}

impl<'a> SpellChecker<'a> {
    pub fn new(vocab: &'a Vocabulary) -> Self { Self { vocab } }

    pub fn is_correct(&self, word: &str) -> bool { self.vocab.contains(word) }

    /// A known word corrects to itself; otherwise every vocabulary term one
    /// delete, transpose, substitution or insertion away, sorted.
    pub fn corrections(&self, word: &str) -> Vec<String> {
        if self.is_correct(word) {
            return vec![word.to_string()];
        }
        edits1(word).into_iter().filter(|w| self.vocab.contains(w)).collect()
    }
}

fn edits1(word: &str) -> BTreeSet<String> {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    let splice = |prefix: &[char], middle: &[char], suffix: &[char]| -> String {
        prefix.iter().chain(middle).chain(suffix).collect()
    };
    let mut out = BTreeSet::new();
    for i in 0..=n {
        let (left, right) = chars.split_at(i);
        if !right.is_empty() {
            out.insert(splice(left, &[], &right[1..]));
            for c in ALPHABET.chars() {
                out.insert(splice(left, &[c], &right[1..]));
            }
        }
        if right.len() > 1 {
            out.insert(splice(left, &[right[1], right[0]], &right[2..]));
        }
        for c in ALPHABET.chars() {
            out.insert(splice(left, &[c], right));
        }
    }
    out.remove(word);
    out
}
