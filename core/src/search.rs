use crate::bm25::{self, Bm25Params};
use crate::expand::TermExpander;
use crate::similarity::compare_two_strings;
use crate::store::TextSource;
use crate::tokenizer::normalize_query;
use crate::{Corpus, DocId, TermId};
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;

/// Number of ranked documents turned into results.
pub const RESULT_LIMIT: usize = 10;

/// First-line marker preceding the statement in Leetcode problem texts.
pub const STATEMENT_MARKER: &str = "ListShare";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub id: DocId,
    pub title: String,
    pub snippet: String,
    pub score: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchOutcome {
    pub results: Vec<SearchResult>,
    /// False when every ranked candidate scored zero.
    pub any_non_zero: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub title: String,
    pub link: String,
    pub text: String,
    #[serde(rename = "type")]
    pub category: &'static str,
}

pub struct SearchEngine<S> {
    corpus: Arc<Corpus>,
    texts: S,
    params: Bm25Params,
    limit: usize,
}

impl<S: TextSource> SearchEngine<S> {
    pub fn new(corpus: Arc<Corpus>, texts: S) -> Self {
        Self { corpus, texts, params: Bm25Params::default(), limit: RESULT_LIMIT }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn corpus(&self) -> &Corpus { &self.corpus }

    /// Term ids a query resolves to after normalization and expansion.
    pub fn query_terms(&self, query: &str) -> Vec<TermId> {
        let candidates = normalize_query(query);
        TermExpander::new(self.corpus.vocabulary()).expand(&candidates)
    }

    /// Final per-document scores: BM25 times title similarity with the lower-cased query.
    pub fn rank(&self, query: &str) -> Vec<f64> {
        let terms = self.query_terms(query);
        let mut scores = bm25::score_documents(&self.corpus, &self.params, &terms);
        if terms.is_empty() {
            return scores;
        }
        let lowered = query.to_lowercase();
        for (score, doc) in scores.iter_mut().zip(self.corpus.docs()) {
            if *score != 0.0 {
                *score *= compare_two_strings(&doc.title, &lowered);
            }
        }
        scores
    }

    pub fn search(&self, query: &str) -> SearchOutcome {
        let scores = self.rank(query);
        let mut ranked: Vec<(DocId, f64)> = scores.into_iter().enumerate().map(|(i, s)| (i as DocId, s)).collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal).then(a.0.cmp(&b.0)));

        let mut outcome = SearchOutcome::default();
        for (doc_id, score) in ranked.into_iter().take(self.limit) {
            if score != 0.0 {
                outcome.any_non_zero = true;
            }
            let Some(text) = self.texts.load(doc_id) else { continue };
            let Some(meta) = self.corpus.doc(doc_id) else { continue };
            let snippet = snippet(&text, self.corpus.bounds().has_marker(doc_id));
            outcome.results.push(SearchResult { id: doc_id, title: meta.title.clone(), snippet, score });
        }
        tracing::debug!(query, results = outcome.results.len(), any_non_zero = outcome.any_non_zero, "search done");
        outcome
    }

    /// Display data for one problem; `None` when the id or its text is unavailable.
    pub fn question(&self, doc_id: DocId) -> Option<Question> {
        let meta = self.corpus.doc(doc_id)?;
        let mut text = self.texts.load(doc_id)?;
        if self.corpus.bounds().has_marker(doc_id) {
            let Some(body) = statement(&text) else {
                tracing::warn!(doc_id, "problem text lacks the statement marker");
                return None;
            };
            text = body.to_string();
        }
        let category = self.corpus.bounds().category(doc_id);
        Some(Question {
            title: capitalize(meta.title.replace('-', " ").trim()),
            link: meta.url.clone().unwrap_or_else(|| "#".to_string()),
            text,
            category: category.label(),
        })
    }
}

/// Text between the first marker and the next one (or the end).
fn statement(text: &str) -> Option<&str> {
    text.split(STATEMENT_MARKER).nth(1)
}

/// First line (after the marker, when present) joined with the second line.
pub fn snippet(text: &str, after_marker: bool) -> String {
    let mut lines = text.split('\n');
    let first = lines.next().unwrap_or("");
    let first = if after_marker {
        statement(first).unwrap_or(first)
    } else {
        first
    };
    let mut out = format!("{first} ");
    if let Some(second) = lines.next() {
        out.push_str(second);
    }
    out.trim().to_string()
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_after_marker() {
        let text = "Two SumEasyAdd to ListShareGiven an array of integers\nreturn indices.\nmore";
        assert_eq!(snippet(text, true), "Given an array of integers return indices.");
    }

    #[test]
    fn repeated_marker_ends_the_statement() {
        let text = "Jump GameListShareReach the last index.ListShareSimilar Questions\nGreedy.";
        assert_eq!(snippet(text, true), "Reach the last index. Greedy.");
    }

    #[test]
    fn snippet_plain() {
        assert_eq!(snippet("Find the peak.\nUse binary search.\n", false), "Find the peak. Use binary search.");
        assert_eq!(snippet("single line", false), "single line");
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("two sum"), "Two sum");
        assert_eq!(capitalize(""), "");
    }
}
