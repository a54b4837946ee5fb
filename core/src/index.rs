use crate::{CorpusError, DocId, TermId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocMeta {
    pub title: String,
    pub url: Option<String>,
    /// Token count of the document body.
    pub length: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub term_id: TermId,
    pub freq: u32, // raw term frequency
}

/// Closed term list. Position in `terms` is the term id.
#[derive(Debug, Default, Clone)]
pub struct Vocabulary {
    terms: Vec<String>,
    ids: HashMap<String, TermId>,
}

impl Vocabulary {
    pub fn new(terms: Vec<String>) -> Result<Self, CorpusError> {
        let mut ids = HashMap::with_capacity(terms.len());
        for (i, term) in terms.iter().enumerate() {
            let id = i as TermId;
            if let Some(first) = ids.insert(term.clone(), id) {
                return Err(CorpusError::DuplicateTerm { term: term.clone(), first, second: id });
            }
        }
        Ok(Self { terms, ids })
    }

    pub fn id(&self, term: &str) -> Option<TermId> { self.ids.get(term).copied() }

    pub fn term(&self, id: TermId) -> Option<&str> { self.terms.get(id as usize).map(String::as_str) }

    pub fn contains(&self, term: &str) -> bool { self.ids.contains_key(term) }

    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    pub fn terms(&self) -> &[String] { &self.terms }
}

/// Source category of a problem, fixed by doc id ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    Leetcode,
    InterviewBit,
    Techiedelight,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Leetcode => "Leetcode",
            Category::InterviewBit => "Interview Bit",
            Category::Techiedelight => "Techdelight",
        }
    }
}

/// Exclusive upper doc id of the first two categories; everything after is Techiedelight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBounds {
    pub leetcode_end: DocId,
    pub interview_bit_end: DocId,
}

impl CategoryBounds {
    pub const LEETCODE_END: DocId = 1774;
    pub const INTERVIEW_BIT_END: DocId = 2214;

    pub fn category(&self, doc_id: DocId) -> Category {
        if doc_id < self.leetcode_end {
            Category::Leetcode
        } else if doc_id < self.interview_bit_end {
            Category::InterviewBit
        } else {
            Category::Techiedelight
        }
    }

    /// Documents below this id get the ranking boost.
    pub fn is_boosted(&self, doc_id: DocId) -> bool { doc_id < self.interview_bit_end }

    /// Documents whose first line embeds the `ListShare` marker.
    pub fn has_marker(&self, doc_id: DocId) -> bool { doc_id < self.leetcode_end }
}

impl Default for CategoryBounds {
    fn default() -> Self {
        Self { leetcode_end: Self::LEETCODE_END, interview_bit_end: Self::INTERVIEW_BIT_END }
    }
}

/// Read-only index loaded once at startup and shared across requests.
#[derive(Debug)]
pub struct Corpus {
    vocabulary: Vocabulary,
    idf: Vec<f64>,
    docs: Vec<DocMeta>,
    postings: Vec<Vec<Posting>>, // per doc, sorted by term_id
    avgdl: f64,
    bounds: CategoryBounds,
}

impl Corpus {
    /// Validates the artifacts against each other. `avgdl` of `None` means "mean of lengths".
    pub fn new(
        vocabulary: Vocabulary,
        idf: Vec<f64>,
        docs: Vec<DocMeta>,
        mut postings: Vec<Vec<Posting>>,
        avgdl: Option<f64>,
        bounds: CategoryBounds,
    ) -> Result<Self, CorpusError> {
        if idf.len() != vocabulary.len() {
            return Err(CorpusError::LengthMismatch { what: "idf", expected: vocabulary.len(), found: idf.len() });
        }
        if postings.len() != docs.len() {
            return Err(CorpusError::LengthMismatch { what: "postings", expected: docs.len(), found: postings.len() });
        }
        if let Some((term_id, &value)) = idf.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(CorpusError::InvalidIdf { term_id: term_id as TermId, value });
        }
        if bounds.leetcode_end > bounds.interview_bit_end {
            return Err(CorpusError::InvalidCategoryBounds {
                leetcode_end: bounds.leetcode_end,
                interview_bit_end: bounds.interview_bit_end,
            });
        }

        let avgdl = match avgdl {
            Some(v) => v,
            None if docs.is_empty() => 1.0,
            None => docs.iter().map(|d| d.length as f64).sum::<f64>() / docs.len() as f64,
        };
        if !docs.is_empty() && !(avgdl.is_finite() && avgdl > 0.0) {
            return Err(CorpusError::InvalidAvgdl(avgdl));
        }

        let num_terms = vocabulary.len() as TermId;
        for (doc_id, (plist, meta)) in postings.iter_mut().zip(&docs).enumerate() {
            plist.sort_by_key(|p| p.term_id);
            let out_of_range = plist.iter().filter(|p| p.term_id >= num_terms).count();
            if out_of_range > 0 {
                tracing::warn!(doc_id, out_of_range, "postings reference unknown term ids");
            }
            if meta.length == 0 && plist.iter().any(|p| p.freq > 0) {
                tracing::warn!(doc_id, "zero-length document has postings; it will never score");
            }
        }

        Ok(Self { vocabulary, idf, docs, postings, avgdl, bounds })
    }

    pub fn vocabulary(&self) -> &Vocabulary { &self.vocabulary }

    pub fn num_docs(&self) -> usize { self.docs.len() }

    pub fn avgdl(&self) -> f64 { self.avgdl }

    pub fn bounds(&self) -> CategoryBounds { self.bounds }

    pub fn idf(&self, term_id: TermId) -> Option<f64> { self.idf.get(term_id as usize).copied() }

    pub fn doc(&self, doc_id: DocId) -> Option<&DocMeta> { self.docs.get(doc_id as usize) }

    pub fn docs(&self) -> &[DocMeta] { &self.docs }

    pub fn postings(&self, doc_id: DocId) -> &[Posting] {
        self.postings.get(doc_id as usize).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Raw frequency of `term_id` in `doc_id`, 0 when absent.
    pub fn term_freq(&self, doc_id: DocId, term_id: TermId) -> u32 {
        let plist = self.postings(doc_id);
        match plist.binary_search_by_key(&term_id, |p| p.term_id) {
            Ok(i) => plist[i].freq,
            Err(_) => 0,
        }
    }
}
