use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("document has no speaker labels to seed the conversation")]
    NoSpeakerLabels,
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot derive an output name from {0:?}")]
    InvalidDocumentName(PathBuf),
}

/// Any failure that stops one document from being processed
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Output(#[from] OutputError),
}
