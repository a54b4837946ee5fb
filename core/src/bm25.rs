use crate::{Corpus, DocId, TermId};
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Params {
    pub k1: f64,
    pub b: f64,
    /// Multiplier applied to every per-term contribution in the boosted id range.
    pub category_boost: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self { k1: 1.2, b: 0.75, category_boost: 2.0 }
    }
}

/// Contribution of one term to one document. `tf` is the length-normalized frequency.
pub fn term_score(params: &Bm25Params, idf: f64, tf: f64, doc_len: f64, avgdl: f64) -> f64 {
    let numerator = tf * (params.k1 + 1.0);
    let denominator = tf + params.k1 * (1.0 - params.b + params.b * (doc_len / avgdl));
    idf * (numerator / denominator)
}

/// Score of a single document for the query terms.
pub fn score_document(corpus: &Corpus, params: &Bm25Params, doc_id: DocId, terms: &[TermId]) -> f64 {
    let Some(meta) = corpus.doc(doc_id) else { return 0.0 };
    let boosted = corpus.bounds().is_boosted(doc_id);
    let doc_len = meta.length as f64;
    let mut score = 0.0;
    for &term_id in terms {
        let freq = corpus.term_freq(doc_id, term_id);
        if freq == 0 { continue; }
        let Some(idf) = corpus.idf(term_id) else {
            tracing::warn!(doc_id, term_id, "query term outside the idf table");
            continue;
        };
        if meta.length == 0 {
            tracing::warn!(doc_id, term_id, "skipping zero-length document with nonzero frequency");
            continue;
        }
        let tf = freq as f64 / doc_len;
        let mut contribution = term_score(params, idf, tf, doc_len, corpus.avgdl());
        if boosted {
            contribution *= params.category_boost;
        }
        score += contribution;
    }
    score
}

/// One score per document in `[0, N)`, all zero for an empty term set.
pub fn score_documents(corpus: &Corpus, params: &Bm25Params, terms: &[TermId]) -> Vec<f64> {
    if terms.is_empty() {
        return vec![0.0; corpus.num_docs()];
    }
    (0..corpus.num_docs() as DocId)
        .into_par_iter()
        .map(|doc_id| score_document(corpus, params, doc_id, terms))
        .collect()
}
