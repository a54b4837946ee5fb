use crate::DocId;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Full document text, fetched only for the handful of ranked winners.
pub trait TextSource: Send + Sync {
    /// `None` means the text is unavailable and the result slot is skipped.
    fn load(&self, doc_id: DocId) -> Option<String>;
}

/// Problem texts stored one per file as `problem_text_{id + 1}.txt`.
#[derive(Debug, Clone)]
pub struct ProblemFiles {
    dir: PathBuf,
}

impl ProblemFiles {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    pub fn path_for(&self, doc_id: DocId) -> PathBuf {
        self.dir.join(file_name(doc_id))
    }
}

pub fn file_name(doc_id: DocId) -> String {
    format!("problem_text_{}.txt", u64::from(doc_id) + 1)
}

impl TextSource for ProblemFiles {
    fn load(&self, doc_id: DocId) -> Option<String> {
        let path = self.path_for(doc_id);
        match std::fs::read(&path) {
            Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(doc_id, path = %path.display(), "problem text not found");
                None
            }
            Err(err) => {
                tracing::warn!(doc_id, path = %path.display(), error = %err, "problem text unreadable");
                None
            }
        }
    }
}

impl TextSource for HashMap<DocId, String> {
    fn load(&self, doc_id: DocId) -> Option<String> {
        self.get(&doc_id).cloned()
    }
}
