use crate::{CategoryBounds, Corpus, DocMeta, Posting, Vocabulary};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub num_terms: u32,
    /// Falls back to the mean document length when absent.
    #[serde(default)]
    pub avgdl: Option<f64>,
    #[serde(default)]
    pub categories: CategoryBounds,
    pub created_at: String,
    pub version: u32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Dictionary {
    pub terms: Vec<String>,
    pub idf: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    fn dictionary(&self) -> PathBuf { self.root.join("dictionary.bin") }
    fn docs(&self) -> PathBuf { self.root.join("docs.bin") }
    fn postings(&self) -> PathBuf { self.root.join("postings.bin") }
    fn meta(&self) -> PathBuf { self.root.join("meta.json") }
    pub fn problems_dir(&self) -> PathBuf { self.root.join("problems") }
}

fn write_bin<T: Serialize>(path: PathBuf, value: &T) -> Result<()> {
    let mut f = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let bytes = bincode::serialize(value)?;
    f.write_all(&bytes)?;
    Ok(())
}

fn read_bin<T: for<'de> Deserialize<'de>>(path: PathBuf) -> Result<T> {
    let mut f = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let value = bincode::deserialize(&buf).with_context(|| format!("decoding {}", path.display()))?;
    Ok(value)
}

pub fn save_dictionary(paths: &IndexPaths, dict: &Dictionary) -> Result<()> {
    create_dir_all(&paths.root)?;
    write_bin(paths.dictionary(), dict)
}

pub fn load_dictionary(paths: &IndexPaths) -> Result<Dictionary> {
    read_bin(paths.dictionary())
}

pub fn save_docs(paths: &IndexPaths, docs: &[DocMeta]) -> Result<()> {
    create_dir_all(&paths.root)?;
    write_bin(paths.docs(), &docs)
}

pub fn load_docs(paths: &IndexPaths) -> Result<Vec<DocMeta>> {
    read_bin(paths.docs())
}

pub fn save_postings(paths: &IndexPaths, postings: &[Vec<Posting>]) -> Result<()> {
    create_dir_all(&paths.root)?;
    write_bin(paths.postings(), &postings)
}

pub fn load_postings(paths: &IndexPaths) -> Result<Vec<Vec<Posting>>> {
    read_bin(paths.postings())
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta())?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile> {
    let mut f = File::open(paths.meta()).with_context(|| format!("opening {}", paths.meta().display()))?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}

/// Load every artifact and validate them against `meta.json`.
pub fn load_corpus(paths: &IndexPaths) -> Result<Corpus> {
    let meta = load_meta(paths)?;
    if meta.version != FORMAT_VERSION {
        anyhow::bail!("unsupported index version {} (expected {FORMAT_VERSION})", meta.version);
    }
    let Dictionary { terms, idf } = load_dictionary(paths)?;
    let docs = load_docs(paths)?;
    let postings = load_postings(paths)?;

    if terms.len() != meta.num_terms as usize {
        anyhow::bail!("meta.json declares {} terms but dictionary holds {}", meta.num_terms, terms.len());
    }
    if docs.len() != meta.num_docs as usize {
        anyhow::bail!("meta.json declares {} documents but docs.bin holds {}", meta.num_docs, docs.len());
    }

    let vocabulary = Vocabulary::new(terms)?;
    let corpus = Corpus::new(vocabulary, idf, docs, postings, meta.avgdl, meta.categories)?;
    tracing::info!(
        num_docs = corpus.num_docs(),
        num_terms = corpus.vocabulary().len(),
        avgdl = corpus.avgdl(),
        "corpus loaded"
    );
    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_index(paths: &IndexPaths, num_terms: u32) {
        save_dictionary(paths, &Dictionary { terms: vec!["heap".into(), "sort".into()], idf: vec![1.5, 0.7] }).unwrap();
        save_docs(paths, &[DocMeta { title: "heap-sort".into(), url: None, length: 4 }]).unwrap();
        save_postings(paths, &[vec![Posting { term_id: 0, freq: 2 }]]).unwrap();
        let meta = MetaFile {
            num_docs: 1,
            num_terms,
            avgdl: None,
            categories: CategoryBounds { leetcode_end: 0, interview_bit_end: 0 },
            created_at: "2024-01-01T00:00:00Z".into(),
            version: FORMAT_VERSION,
        };
        save_meta(paths, &meta).unwrap();
    }

    #[test]
    fn loads_saved_corpus() {
        let dir = tempdir().unwrap();
        let paths = IndexPaths::new(dir.path());
        write_index(&paths, 2);
        let corpus = load_corpus(&paths).unwrap();
        assert_eq!(corpus.num_docs(), 1);
        assert_eq!(corpus.vocabulary().id("sort"), Some(1));
        assert_eq!(corpus.term_freq(0, 0), 2);
        assert_eq!(corpus.avgdl(), 4.0);
    }

    #[test]
    fn meta_mismatch_is_fatal() {
        let dir = tempdir().unwrap();
        let paths = IndexPaths::new(dir.path());
        write_index(&paths, 3);
        assert!(load_corpus(&paths).is_err());
    }

    #[test]
    fn missing_artifacts_are_fatal() {
        let dir = tempdir().unwrap();
        assert!(load_corpus(&IndexPaths::new(dir.path())).is_err());
    }
}
