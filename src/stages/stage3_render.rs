use std::path::Path;

use tracing::info;

use crate::error::OutputError;
use crate::io::DocumentSink;
use crate::models::{KeywordHit, Utterance};

/// Configuration for Stage 3 rendering
#[derive(Debug, Clone)]
pub struct Stage3Config {
    /// Whether to write the conversation transcript
    pub write_conversation: bool,
    /// Whether to write the keyword report
    pub write_keywords: bool,
}

impl Default for Stage3Config {
    fn default() -> Self {
        Self {
            write_conversation: true,
            write_keywords: true,
        }
    }
}

/// Result of Stage 3 rendering
#[derive(Debug, Default)]
pub struct Stage3Result {
    pub conversation_written: bool,
    pub keywords_written: bool,
}

/// Execute Stage 3: Rendering
///
/// Hands both views of a document to the sink:
/// 1. Conversation transcript: one line per utterance
/// 2. Keyword report: one line per keyword hit, written even when empty
pub fn execute_stage3(
    document: &Path,
    utterances: &[Utterance],
    hits: &[KeywordHit],
    sink: &mut dyn DocumentSink,
    config: &Stage3Config,
) -> Result<Stage3Result, OutputError> {
    let mut result = Stage3Result::default();

    if config.write_conversation {
        info!("Writing {} utterances for {:?}", utterances.len(), document);
        sink.write_conversation(document, utterances)?;
        result.conversation_written = true;
    }

    if config.write_keywords {
        info!("Writing {} keyword hits for {:?}", hits.len(), document);
        sink.write_keywords(document, hits)?;
        result.keywords_written = true;
    }

    Ok(result)
}
