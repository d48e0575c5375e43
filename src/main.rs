use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use spkalign::{
    ConversationConfig, DirectorySink, EmptyUtterancePolicy, KeywordConfig, PipelineConfig,
    Speaker, Stage3Config, align_document, discover_documents, format_timestamp, load_stt_file,
    run_batch,
};

#[derive(Parser)]
#[command(name = "spkalign")]
#[command(
    author,
    version,
    about = "Speaker-attributed transcripts from speech-to-text JSON",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every document in a directory into transcripts and keyword reports
    Process {
        /// Directory of recognition JSON documents
        #[arg(short, long, default_value = "json")]
        input_dir: PathBuf,

        /// Existing directory for conversation transcripts (conv_<name>.txt)
        #[arg(long, default_value = "conversations")]
        conversations_dir: PathBuf,

        /// Existing directory for keyword reports (kwds_<name>.txt)
        #[arg(long, default_value = "keywords_found")]
        keywords_dir: PathBuf,

        /// Leave out utterances that contain no words
        #[arg(long)]
        drop_empty_utterances: bool,

        /// Report only the first occurrence of each keyword per result section
        #[arg(long)]
        first_keyword_match_only: bool,

        /// Do not write conversation transcripts
        #[arg(long)]
        no_conversations: bool,

        /// Do not write keyword reports
        #[arg(long)]
        no_keywords: bool,

        /// Exit with an error if any document failed
        #[arg(long)]
        strict: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show how one document aligns without writing anything
    Analyze {
        /// Recognition JSON document
        #[arg(short, long)]
        input: PathBuf,

        /// Leave out utterances that contain no words
        #[arg(long)]
        drop_empty_utterances: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input_dir,
            conversations_dir,
            keywords_dir,
            drop_empty_utterances,
            first_keyword_match_only,
            no_conversations,
            no_keywords,
            strict,
            verbose,
        } => {
            setup_logging(verbose);
            let config = PipelineConfig {
                conversation: conversation_config(drop_empty_utterances),
                keywords: KeywordConfig {
                    first_match_only: first_keyword_match_only,
                },
                render: Stage3Config {
                    write_conversation: !no_conversations,
                    write_keywords: !no_keywords,
                },
            };
            process_directory(&input_dir, conversations_dir, keywords_dir, &config, strict)
        }
        Commands::Analyze {
            input,
            drop_empty_utterances,
            verbose,
        } => {
            setup_logging(verbose);
            let config = PipelineConfig {
                conversation: conversation_config(drop_empty_utterances),
                ..Default::default()
            };
            analyze_document(&input, &config)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn conversation_config(drop_empty_utterances: bool) -> ConversationConfig {
    ConversationConfig {
        empty_utterances: if drop_empty_utterances {
            EmptyUtterancePolicy::Drop
        } else {
            EmptyUtterancePolicy::Keep
        },
    }
}

fn process_directory(
    input_dir: &Path,
    conversations_dir: PathBuf,
    keywords_dir: PathBuf,
    config: &PipelineConfig,
    strict: bool,
) -> Result<()> {
    let documents = discover_documents(input_dir)
        .with_context(|| format!("Failed to list input directory {:?}", input_dir))?;
    info!("Found {} documents in {:?}", documents.len(), input_dir);

    for dir in [&conversations_dir, &keywords_dir] {
        if !dir.is_dir() {
            warn!("Output directory {:?} does not exist; writes to it will fail", dir);
        }
    }

    let mut sink = DirectorySink::new(conversations_dir, keywords_dir);
    let report = run_batch(&documents, &mut sink, config);

    info!(
        "Complete: {} processed, {} skipped, {} failed; {} transcripts, {} keyword reports written",
        report.processed,
        report.skipped,
        report.failed(),
        report.conversations_written,
        report.keyword_reports_written
    );
    if report.unresolved_words > 0 || report.unresolved_keywords > 0 {
        warn!(
            "{} words and {} keyword hits could not be attributed to a speaker",
            report.unresolved_words, report.unresolved_keywords
        );
    }

    if strict && !report.is_clean() {
        bail!("{} of {} documents failed", report.failed(), documents.len());
    }
    Ok(())
}

fn analyze_document(input: &Path, config: &PipelineConfig) -> Result<()> {
    info!("Analyzing {:?}", input);
    let response = load_stt_file(input)?;
    let words = response.words();

    println!("Document Analysis");
    println!("=================");
    println!("Result sections: {}", response.results.len());
    println!("Words: {}", words.len());
    println!("Speaker segments: {}", response.speaker_labels.len());
    println!("Speakers: {:?}", response.speakers());
    if let (Some(first), Some(last)) = (words.first(), words.last()) {
        println!(
            "Span: {} - {}",
            format_timestamp(first.start),
            format_timestamp(last.end)
        );
    }
    println!();

    let alignment = align_document(&response, config).context("Failed to align document")?;

    println!("Alignment");
    println!("---------");
    println!("Utterances: {}", alignment.utterances.len());
    println!(
        "Empty utterances: {}",
        alignment.utterances.iter().filter(|u| u.is_empty()).count()
    );
    println!("Unresolved words: {}", alignment.unresolved_words());
    println!("Keyword hits: {}", alignment.keyword_hits.len());
    println!("Unresolved keyword hits: {}", alignment.unresolved_keywords());
    println!();

    println!("Speaker Statistics");
    println!("------------------");
    let mut speakers: Vec<Speaker> = response
        .speakers()
        .into_iter()
        .map(Speaker::Known)
        .collect();
    if alignment.unresolved_words() > 0 {
        speakers.push(Speaker::Unresolved);
    }
    for speaker in speakers {
        let utterances: Vec<_> = alignment
            .utterances
            .iter()
            .filter(|u| u.speaker == speaker)
            .collect();
        let word_count: usize = utterances.iter().map(|u| u.word_count()).sum();
        let talk_time: f64 = utterances.iter().map(|u| (u.end - u.start).max(0.0)).sum();
        let keyword_count = alignment
            .keyword_hits
            .iter()
            .filter(|h| h.speaker == speaker)
            .count();

        println!(
            "Speaker {}: {} words, {} utterances, {:.1}s, {} keyword hits",
            speaker,
            word_count,
            utterances.len(),
            talk_time,
            keyword_count
        );
    }

    Ok(())
}
