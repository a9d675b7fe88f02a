use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by a recognition run.
#[derive(Error, Debug)]
pub enum OcrError {
    #[error("failed to write tesseract config file {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to run {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("tesseract exited with {}: {stderr}", exit_label(.code))]
    ProcessFailed { code: Option<i32>, stderr: String },

    #[error("failed to read tesseract output {path}: {source}")]
    OutputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "{binary} was not found.\n\n\
        To install tesseract:\n  macOS:   brew install tesseract\n  \
        Linux:   sudo apt-get install tesseract-ocr (Ubuntu/Debian)\n           \
        sudo yum install tesseract (RHEL/CentOS)\n  \
        Windows: Download from https://github.com/UB-Mannheim/tesseract/wiki"
    )]
    BinaryNotFound { binary: String },

    #[error("recognition task did not complete: {0}")]
    Join(String),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, OcrError>;
