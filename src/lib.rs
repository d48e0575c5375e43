pub mod batch;
pub mod error;
pub mod io;
pub mod models;
pub mod stages;

pub use batch::{
    BatchReport, DocumentAlignment, DocumentOutcome, PipelineConfig, align_document,
    discover_documents, process_document, run_batch,
};
pub use error::{BuildError, DocumentError, LoadError, OutputError};
pub use io::{
    DirectorySink, DocumentSink, MemorySink, format_timestamp, load_stt_file, parse_stt_json,
    render_entries, write_entries,
};
pub use models::{
    KeywordHit, RecognizedWord, Speaker, SpeakerSegment, SttResponse, TimedEntry, Utterance,
};
pub use stages::{
    ConversationConfig, EmptyUtterancePolicy, KeywordConfig, SpeakerTimeline, Stage3Config,
    build_conversation, execute_stage3, extract_keywords, resolve_speaker,
};
