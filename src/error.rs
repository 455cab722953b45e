// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system.
//! The taxonomy is small and deliberate: precondition failures (the input
//! document is missing), delegation failures (the external renderer
//! reported an error), and the ordinary I/O and parsing failures in
//! between. There is no retry policy anywhere — every failure is terminal
//! for that invocation.

use std::path::PathBuf;
use thiserror::Error;

/// Exit status for precondition failures (input notebook not found).
pub const EXIT_INPUT_NOT_FOUND: u8 = 2;

/// Exit status for delegation failures (the renderer reported an error).
pub const EXIT_RENDER_FAILED: u8 = 3;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Precondition failure: the input path does not resolve to an
    /// existing file. Reported immediately, before any other work.
    #[error("Notebook not found: {}", .path.display())]
    NotebookNotFound { path: PathBuf },

    #[error("Failed to parse notebook {}: {source}", .path.display())]
    NotebookParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Delegation failure: the renderer ran but exited non-zero. Carries
    /// whatever diagnostic it produced on stderr.
    #[error("Renderer failed ({}): {detail}", describe_status(.status))]
    RenderFailed { status: Option<i32>, detail: String },

    /// Delegation failure: the renderer could not be started at all
    /// (typically not installed or not on PATH).
    #[error("Could not launch renderer '{program}': {source}")]
    RendererLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize filtered notebook: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),
}

impl AppError {
    /// Maps the error taxonomy onto the process exit status contract:
    /// 2 for precondition failures, 3 for delegation failures, 1 for
    /// everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NotebookNotFound { .. } => EXIT_INPUT_NOT_FOUND,
            Self::RenderFailed { .. } | Self::RendererLaunch { .. } => EXIT_RENDER_FAILED,
            _ => 1,
        }
    }
}

/// Renders a child exit status for error messages. `None` means the
/// process was terminated by a signal rather than exiting.
fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}

// Allow converting from anyhow::Error, preserving the message
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            err.to_string(),
        ))
    }
}

/// Result type alias for convenience
#[allow(dead_code)]
pub type Result<T, E = AppError> = std::result::Result<T, E>;
