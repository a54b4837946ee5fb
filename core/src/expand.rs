use crate::lemma::Lemmatizer;
use crate::spell::SpellChecker;
use crate::{TermId, Vocabulary};
use std::collections::BTreeSet;

/// Longer forms skip spell correction; edit generation grows with the square of the length.
pub const MAX_CORRECTABLE_LEN: usize = 32;

/// Grows normalized candidates with lemmas and spelling corrections, then
/// keeps only what the vocabulary knows.
pub struct TermExpander<'a> {
    vocab: &'a Vocabulary,
    lemmatizer: Lemmatizer<'a>,
    spell: SpellChecker<'a>,
}

impl<'a> TermExpander<'a> {
    pub fn new(vocab: &'a Vocabulary) -> Self {
        Self { vocab, lemmatizer: Lemmatizer::new(vocab), spell: SpellChecker::new(vocab) }
    }

    /// Every form a candidate may take before vocabulary filtering.
    pub fn variants(&self, candidates: &[String]) -> BTreeSet<String> {
        let mut pool: BTreeSet<String> = candidates.iter().cloned().collect();
        for key in candidates {
            let lemma = self.lemmatizer.verb(key);
            for form in [key.as_str(), lemma.as_str()] {
                if self.spell.is_correct(form) || form.chars().count() > MAX_CORRECTABLE_LEN { continue; }
                for fix in self.spell.corrections(form) {
                    pool.insert(self.lemmatizer.verb(&fix));
                    pool.insert(fix);
                }
            }
            pool.insert(lemma);
        }
        pool
    }

    /// Distinct term ids, ordered by term text. Empty when nothing is recognised.
    pub fn expand(&self, candidates: &[String]) -> Vec<TermId> {
        let ids: Vec<TermId> = self
            .variants(candidates)
            .iter()
            .filter_map(|term| self.vocab.id(term))
            .collect();
        tracing::debug!(candidates = candidates.len(), terms = ids.len(), "expanded query terms");
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::new(["sum", "two", "run", "array", "sort"].iter().map(|s| s.to_string()).collect()).unwrap()
    }

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn keeps_only_vocabulary_terms() {
        let v = vocab();
        let ids = TermExpander::new(&v).expand(&strings(&["2", "sum", "two"]));
        let terms: Vec<&str> = ids.iter().map(|&id| v.term(id).unwrap()).collect();
        assert_eq!(terms, vec!["sum", "two"]);
    }

    #[test]
    fn lemmas_and_corrections_join_the_pool() {
        let v = vocab();
        let ids = TermExpander::new(&v).expand(&strings(&["running", "arary", "sorts"]));
        let terms: BTreeSet<&str> = ids.iter().map(|&id| v.term(id).unwrap()).collect();
        assert_eq!(terms, ["array", "run", "sort"].into_iter().collect());
    }

    #[test]
    fn misspelled_inflections_correct_through_the_lemma() {
        let v = vocab();
        let ids = TermExpander::new(&v).expand(&strings(&["sroting"]));
        assert_eq!(ids, vec![v.id("sort").unwrap()]);
    }

    #[test]
    fn oversized_tokens_skip_correction() {
        let v = vocab();
        let huge = "q".repeat(20_000);
        let start = std::time::Instant::now();
        assert!(TermExpander::new(&v).expand(&[huge]).is_empty());
        assert!(start.elapsed() < std::time::Duration::from_secs(2));

    }

    #[test]
    fn correction_limit_is_inclusive() {
        let at_limit = "a".repeat(MAX_CORRECTABLE_LEN);
        let past_limit = "b".repeat(MAX_CORRECTABLE_LEN + 1);
        let v = Vocabulary::new(vec![at_limit.clone(), past_limit.clone()]).unwrap();
        let expander = TermExpander::new(&v);

        let typo = format!("{}c", &at_limit[1..]);
        assert_eq!(expander.expand(&[typo]), vec![0]);
        let typo = format!("{}c", &past_limit[1..]);
        assert!(expander.expand(&[typo]).is_empty());
    }

    #[test]
    fn unmatched_input_yields_no_terms() {
        let v = vocab();
        assert!(TermExpander::new(&v).expand(&strings(&["xyzzyqq", "#"])).is_empty());
        assert!(TermExpander::new(&v).expand(&[]).is_empty());
    }
}
