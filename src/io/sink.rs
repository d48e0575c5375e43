use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::output::{render_entries, write_entries};
use crate::error::OutputError;
use crate::models::{KeywordHit, Utterance};

/// File name prefix for conversation transcripts
pub const CONVERSATION_LABEL: &str = "conv";
/// File name prefix for keyword reports
pub const KEYWORDS_LABEL: &str = "kwds";

/// Destination for the two outputs produced per document.
///
/// `document` is the source document's path; implementations derive their
/// own naming from it.
pub trait DocumentSink {
    fn write_conversation(
        &mut self,
        document: &Path,
        utterances: &[Utterance],
    ) -> Result<(), OutputError>;

    fn write_keywords(&mut self, document: &Path, hits: &[KeywordHit]) -> Result<(), OutputError>;
}

/// Source file name without its last extension
pub fn document_stem(document: &Path) -> Result<String, OutputError> {
    document
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| OutputError::InvalidDocumentName(document.to_path_buf()))
}

/// `<dir>/<label>_<stem>.txt`
pub fn output_path(dir: &Path, label: &str, document: &Path) -> Result<PathBuf, OutputError> {
    let stem = document_stem(document)?;
    Ok(dir.join(format!("{}_{}.txt", label, stem)))
}

/// Writes text files into two existing directories
#[derive(Debug, Clone)]
pub struct DirectorySink {
    pub conversations_dir: PathBuf,
    pub keywords_dir: PathBuf,
}

impl DirectorySink {
    pub fn new(conversations_dir: impl Into<PathBuf>, keywords_dir: impl Into<PathBuf>) -> Self {
        Self {
            conversations_dir: conversations_dir.into(),
            keywords_dir: keywords_dir.into(),
        }
    }
}

impl DocumentSink for DirectorySink {
    fn write_conversation(
        &mut self,
        document: &Path,
        utterances: &[Utterance],
    ) -> Result<(), OutputError> {
        let path = output_path(&self.conversations_dir, CONVERSATION_LABEL, document)?;
        debug!("Writing {} utterances to {:?}", utterances.len(), path);
        write_entries(utterances, &path)
    }

    fn write_keywords(&mut self, document: &Path, hits: &[KeywordHit]) -> Result<(), OutputError> {
        let path = output_path(&self.keywords_dir, KEYWORDS_LABEL, document)?;
        debug!("Writing {} keyword hits to {:?}", hits.len(), path);
        write_entries(hits, &path)
    }
}

/// Keeps rendered outputs in memory, keyed by document stem
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub conversations: BTreeMap<String, String>,
    pub keywords: BTreeMap<String, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversation(&self, stem: &str) -> Option<&str> {
        self.conversations.get(stem).map(String::as_str)
    }

    pub fn keywords(&self, stem: &str) -> Option<&str> {
        self.keywords.get(stem).map(String::as_str)
    }
}

impl DocumentSink for MemorySink {
    fn write_conversation(
        &mut self,
        document: &Path,
        utterances: &[Utterance],
    ) -> Result<(), OutputError> {
        let stem = document_stem(document)?;
        self.conversations.insert(stem, render_entries(utterances));
        Ok(())
    }

    fn write_keywords(&mut self, document: &Path, hits: &[KeywordHit]) -> Result<(), OutputError> {
        let stem = document_stem(document)?;
        self.keywords.insert(stem, render_entries(hits));
        Ok(())
    }
}
