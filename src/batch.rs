use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::error::{BuildError, DocumentError, LoadError};
use crate::io::{DocumentSink, load_stt_file};
use crate::models::{KeywordHit, Speaker, SttResponse, Utterance};
use crate::stages::{
    ConversationConfig, KeywordConfig, Stage3Config, Stage3Result, build_conversation,
    execute_stage3, extract_keywords,
};

/// Per-document processing configuration
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub conversation: ConversationConfig,
    pub keywords: KeywordConfig,
    pub render: Stage3Config,
}

/// Conversation and keyword hits derived from one document
#[derive(Debug, Clone)]
pub struct DocumentAlignment {
    pub utterances: Vec<Utterance>,
    pub keyword_hits: Vec<KeywordHit>,
}

impl DocumentAlignment {
    /// Words that no speaker segment could claim
    pub fn unresolved_words(&self) -> usize {
        self.utterances
            .iter()
            .filter(|u| u.speaker == Speaker::Unresolved)
            .map(Utterance::word_count)
            .sum()
    }

    pub fn unresolved_keywords(&self) -> usize {
        self.keyword_hits
            .iter()
            .filter(|h| h.speaker == Speaker::Unresolved)
            .count()
    }
}

/// What happened to a single document
#[derive(Debug)]
pub enum DocumentOutcome {
    Written {
        alignment: DocumentAlignment,
        render: Stage3Result,
    },
    /// The document had no recognition results
    Skipped,
}

/// Totals over a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub failures: Vec<(PathBuf, DocumentError)>,
    pub unresolved_words: usize,
    pub unresolved_keywords: usize,
    pub conversations_written: usize,
    pub keyword_reports_written: usize,
}

impl BatchReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// List the regular files in `dir`, sorted by name
pub fn discover_documents(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let to_load_error = |source| LoadError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut documents = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(to_load_error)? {
        let path = entry.map_err(to_load_error)?.path();
        if path.is_file() {
            documents.push(path);
        } else {
            debug!("Skipping non-file entry {:?}", path);
        }
    }
    documents.sort();
    Ok(documents)
}

/// Build the conversation and keyword hits of a loaded document
pub fn align_document(
    response: &SttResponse,
    config: &PipelineConfig,
) -> Result<DocumentAlignment, BuildError> {
    let words = response.words();
    let segments = &response.speaker_labels;
    let utterances = build_conversation(&words, segments, &config.conversation)?;
    let keyword_hits = extract_keywords(&response.results, segments, &config.keywords);

    debug!(
        "{} words -> {} utterances, {} keyword hits",
        words.len(),
        utterances.len(),
        keyword_hits.len()
    );

    Ok(DocumentAlignment {
        utterances,
        keyword_hits,
    })
}

/// Load, align and write one document
pub fn process_document(
    path: &Path,
    sink: &mut dyn DocumentSink,
    config: &PipelineConfig,
) -> Result<DocumentOutcome, DocumentError> {
    let response = load_stt_file(path)?;

    if !response.has_results() {
        info!("Skipping {:?}: no recognition results", path);
        return Ok(DocumentOutcome::Skipped);
    }

    let alignment = align_document(&response, config)?;
    let render = execute_stage3(
        path,
        &alignment.utterances,
        &alignment.keyword_hits,
        sink,
        &config.render,
    )?;

    Ok(DocumentOutcome::Written { alignment, render })
}

/// Process documents one after another.
///
/// A failing document is logged and recorded in the report; the remaining
/// documents are still processed.
pub fn run_batch(
    documents: &[PathBuf],
    sink: &mut dyn DocumentSink,
    config: &PipelineConfig,
) -> BatchReport {
    let mut report = BatchReport::default();

    for path in documents {
        info!("Processing {:?}", path);
        match process_document(path, sink, config) {
            Ok(DocumentOutcome::Written { alignment, render }) => {
                let unresolved_words = alignment.unresolved_words();
                let unresolved_keywords = alignment.unresolved_keywords();
                if unresolved_words > 0 || unresolved_keywords > 0 {
                    warn!(
                        "{:?}: {} words and {} keyword hits without a speaker",
                        path, unresolved_words, unresolved_keywords
                    );
                }
                report.unresolved_words += unresolved_words;
                report.unresolved_keywords += unresolved_keywords;
                report.conversations_written += usize::from(render.conversation_written);
                report.keyword_reports_written += usize::from(render.keywords_written);
                report.processed += 1;
            }
            Ok(DocumentOutcome::Skipped) => report.skipped += 1,
            Err(e) => {
                error!("Failed to process {:?}: {}", path, e);
                report.failures.push((path.clone(), e));
            }
        }
    }

    report
}
