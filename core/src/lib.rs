//! Query-to-ranking pipeline for the coding-problem search engine.
//!
//! The index artifacts are built offline (see the `indexer` crate) and loaded
//! once into an immutable [`Corpus`]. Every query then flows through
//! [`tokenizer::normalize_query`], [`expand::TermExpander`],
//! [`bm25::score_documents`], the title re-ranker and the result assembler in
//! [`search::SearchEngine`].

pub mod bm25;
pub mod error;
pub mod expand;
pub mod index;
pub mod lemma;
pub mod numbers;
pub mod persist;
pub mod search;
pub mod similarity;
pub mod spell;
pub mod store;
pub mod tokenizer;

pub type TermId = u32;
pub type DocId = u32;

pub use error::CorpusError;
pub use index::{Category, CategoryBounds, Corpus, DocMeta, Posting, Vocabulary};
pub use search::{Question, SearchEngine, SearchOutcome, SearchResult};
pub use store::{ProblemFiles, TextSource};
