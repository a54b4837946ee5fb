use anyhow::Result;
use clap::{Parser, Subcommand};
use dsa_core::persist::{save_dictionary, save_docs, save_meta, save_postings, Dictionary, IndexPaths, MetaFile, FORMAT_VERSION};
use dsa_core::store::file_name;
use dsa_core::tokenizer::tokenize_document;
use dsa_core::{CategoryBounds, DocId, DocMeta, Posting, TermId};
use serde::Deserialize;
use tracing_subscriber::{EnvFilter, fmt};
use walkdir::WalkDir;

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct InputDoc {
    title: String,
    body: String,
    url: Option<String>,
    /// leetcode, interviewbit or techiedelight; anything else sorts last
    #[serde(default)]
    source: Option<String>,
}

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build the BM25 problem index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from input JSON/JSONL files or a directory
    Build {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Output index directory
        #[arg(long)]
        output: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output } => build_index(Path::new(&input), Path::new(&output)),
    }
}

fn source_rank(source: Option<&str>) -> u8 {
    match source.map(|s| s.to_ascii_lowercase().replace([' ', '-', '_'], "")).as_deref() {
        Some("leetcode") => 0,
        Some("interviewbit") => 1,
        _ => 2,
    }
}

fn slug(title: &str) -> String {
    title.split_whitespace().map(str::to_lowercase).collect::<Vec<_>>().join("-")
}

fn input_files(input: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    }
    files
}

fn read_docs(file: &Path) -> Result<Vec<InputDoc>> {
    let reader = BufReader::new(File::open(file)?);
    if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
        let mut docs = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() { continue; }
            docs.push(serde_json::from_str(&line)?);
        }
        return Ok(docs);
    }
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    Ok(match json {
        serde_json::Value::Array(arr) => arr.into_iter().map(serde_json::from_value).collect::<Result<_, _>>()?,
        serde_json::Value::Object(_) => vec![serde_json::from_value(json)?],
        _ => Vec::new(),
    })
}

fn build_index(input: &Path, output: &Path) -> Result<()> {
    let paths = IndexPaths::new(output);
    fs::create_dir_all(paths.problems_dir())?;

    let mut inputs = Vec::new();
    for file in input_files(input) {
        inputs.extend(read_docs(&file)?);
    }
    // category is decided by id range, so group sources before assigning ids
    inputs.sort_by_key(|d| source_rank(d.source.as_deref()));
    let leetcode_end = inputs.iter().take_while(|d| source_rank(d.source.as_deref()) == 0).count();
    let interview_bit_end = inputs.iter().take_while(|d| source_rank(d.source.as_deref()) <= 1).count();

    let mut dictionary: HashMap<String, TermId> = HashMap::new();
    let mut terms: Vec<String> = Vec::new();
    let mut df: Vec<u32> = Vec::new();
    let mut docs: Vec<DocMeta> = Vec::with_capacity(inputs.len());
    let mut postings: Vec<Vec<Posting>> = Vec::with_capacity(inputs.len());

    for (doc_id, doc) in inputs.into_iter().enumerate() {
        let tokens = tokenize_document(&doc.body);
        let mut tf_counts: HashMap<TermId, u32> = HashMap::new();
        for term in &tokens {
            let tid = match dictionary.get(term) {
                Some(&tid) => tid,
                None => {
                    let tid = terms.len() as TermId;
                    dictionary.insert(term.clone(), tid);
                    terms.push(term.clone());
                    df.push(0);
                    tid
                }
            };
            *tf_counts.entry(tid).or_insert(0) += 1;
        }
        for tid in tf_counts.keys() {
            df[*tid as usize] += 1;
        }
        let mut plist: Vec<Posting> = tf_counts.into_iter().map(|(term_id, freq)| Posting { term_id, freq }).collect();
        plist.sort_by_key(|p| p.term_id);
        postings.push(plist);

        fs::write(paths.problems_dir().join(file_name(doc_id as DocId)), &doc.body)?;
        docs.push(DocMeta { title: slug(&doc.title), url: doc.url, length: tokens.len() as u32 });
    }

    let num_docs = docs.len();
    tracing::info!(num_docs, num_terms = terms.len(), leetcode_end, interview_bit_end, "ingested documents");

    let n = num_docs as f64;
    let idf: Vec<f64> = df.iter().map(|&d| (1.0 + (n - d as f64 + 0.5) / (d as f64 + 0.5)).ln()).collect();
    let avgdl = if num_docs == 0 { None } else { Some(docs.iter().map(|d| d.length as f64).sum::<f64>() / n) };

    let meta = MetaFile {
        num_docs: num_docs as u32,
        num_terms: terms.len() as u32,
        avgdl,
        categories: CategoryBounds { leetcode_end: leetcode_end as DocId, interview_bit_end: interview_bit_end as DocId },
        created_at: time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339).unwrap_or_else(|_| "".into()),
        version: FORMAT_VERSION,
    };
    save_dictionary(&paths, &Dictionary { terms, idf })?;
    save_docs(&paths, &docs)?;
    save_postings(&paths, &postings)?;
    save_meta(&paths, &meta)?;

    tracing::info!(output = %output.display(), "index build complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsa_core::persist::load_corpus;
    use dsa_core::Category;
    use tempfile::tempdir;

    #[test]
    fn builds_a_loadable_index() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        fs::write(
            input.path().join("problems.jsonl"),
            concat!(
                r#"{"title":"Reverse Linked List","body":"Reverse a singly linked list.","source":"techiedelight"}"#, "\n",
                r#"{"title":"Two Sum","body":"Two SumEasyListShareGiven an array\nreturn two indices.","url":"https://leetcode.com/problems/two-sum","source":"leetcode"}"#, "\n",
                r#"{"title":"Kth Row","body":"Return the kth row.","source":"InterviewBit"}"#, "\n",
            ),
        )
        .unwrap();

        build_index(input.path(), output.path()).unwrap();
        let corpus = load_corpus(&IndexPaths::new(output.path())).unwrap();

        assert_eq!(corpus.num_docs(), 3);
        assert_eq!(corpus.doc(0).unwrap().title, "two-sum");
        assert_eq!(corpus.bounds().category(0), Category::Leetcode);
        assert_eq!(corpus.bounds().category(1), Category::InterviewBit);
        assert_eq!(corpus.bounds().category(2), Category::Techiedelight);

        let two = corpus.vocabulary().id("two").unwrap();
        assert_eq!(corpus.term_freq(0, two), 2);
        assert!(corpus.idf(two).unwrap() > 0.0);
        assert!(output.path().join("problems/problem_text_3.txt").exists());
    }
}
