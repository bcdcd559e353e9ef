use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    /// Only reachable through a `CliConfig` built in code; the command line
    /// parser rejects an empty `--input` itself.
    #[error("No input file given: you must provide a path to your markdown file")]
    MissingInput,

    #[error("Not a markdown (.md) file: {}", path.display())]
    InvalidExtension { path: PathBuf },

    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Failed to read {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Io,
}

impl ConvertError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConvertError::MissingInput
            | ConvertError::InvalidExtension { .. }
            | ConvertError::InvalidPath { .. } => ErrorCategory::Validation,
            ConvertError::ReadError { .. }
            | ConvertError::WriteError { .. }
            | ConvertError::IoError(_) => ErrorCategory::Io,
        }
    }

    /// Process exit status for this error. clap reserves 2 for usage errors.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Validation => 1,
            ErrorCategory::Io => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ConvertError::MissingInput => {
                "Error: You must provide a path to your markdown file".to_string()
            }
            ConvertError::InvalidExtension { .. } => {
                "Error: You must provide a markdown (.md) file.".to_string()
            }
            other => format!("Error: {}", other),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ConvertError::MissingInput => "Pass the source file with --input <path>",
            ConvertError::InvalidExtension { .. } => {
                "Rename the source file so it ends in .md, or point --input at a .md file"
            }
            ConvertError::InvalidPath { .. } => "Check the path for typos or stray characters",
            ConvertError::ReadError { .. } => {
                "Make sure the input file exists and is readable by the current user"
            }
            ConvertError::WriteError { .. } => {
                "Make sure the output location is writable, or choose another with --output"
            }
            ConvertError::IoError(_) => "Check that the working directory is accessible",
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
