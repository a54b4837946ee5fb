use thiserror::Error;

/// Structural problems in the offline-built index. Any of these refuses startup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CorpusError {
    #[error("expected {expected} {what} entries, found {found}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("duplicate vocabulary term {term:?} at ids {first} and {second}")]
    DuplicateTerm { term: String, first: u32, second: u32 },
    #[error("idf for term id {term_id} is not finite: {value}")]
    InvalidIdf { term_id: u32, value: f64 },
    #[error("average document length must be finite and positive, got {0}")]
    InvalidAvgdl(f64),
    #[error("category bounds out of order: leetcode_end={leetcode_end} interview_bit_end={interview_bit_end}")]
    InvalidCategoryBounds {
        leetcode_end: u32,
        interview_bit_end: u32,
    },
}
