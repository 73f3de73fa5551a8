//src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Every way a gene-calling run can fail. All of them are fatal for the run.
#[derive(Error, Debug)]
pub enum GeneCallError {
    /// Bad option value (k-mer length 0, fraction out of range, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reference or read file missing, unreadable or not validly compressed
    #[error("Could not read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reference sequence with characters outside {A,C,G,T}
    #[error("Invalid sequence line in {header}: {line}")]
    InvalidSequence { header: String, line: String },

    /// Reference record without any sequence
    #[error("Empty sequence for {header}")]
    EmptySequence { header: String },

    /// Two reference records with the same header
    #[error("Duplicate gene header: {header}")]
    DuplicateHeader { header: String },

    /// Sequence data found before the first '>' header
    #[error("Sequence line before first header: {line}")]
    MissingHeader { line: String },

    #[error("Could not build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl GeneCallError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GeneCallError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GeneCallError>;
