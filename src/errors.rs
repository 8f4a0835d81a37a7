//! Categorized error types for the analysis pipeline.
//!
//! The engine itself degrades gracefully (malformed statements are skipped
//! with a warning), so these errors surface only at the boundaries: loading
//! program artifacts, building CFGs, and writing renderings. Application
//! entry points use `anyhow::Result` and convert through `std::error::Error`.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Error raised while loading or analyzing a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// File system I/O failures.
    Io {
        message: String,
        path: Option<PathBuf>,
    },
    /// Program artifact could not be parsed.
    Load {
        message: String,
        path: Option<PathBuf>,
    },
    /// Method body is not well-formed three-address IR.
    Ir { message: String },
    /// A rendering (text, DOT, HTML) could not be produced.
    Render { message: String },
}

impl AnalysisError {
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
        }
    }

    pub fn io_with_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    pub fn load(message: impl Into<String>) -> Self {
        Self::Load {
            message: message.into(),
            path: None,
        }
    }

    pub fn load_with_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Load {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    pub fn ir(message: impl Into<String>) -> Self {
        Self::Ir {
            message: message.into(),
        }
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::Io { message, path } => match path {
                Some(p) => write!(f, "I/O error: {message} ({})", p.display()),
                None => write!(f, "I/O error: {message}"),
            },
            AnalysisError::Load { message, path } => match path {
                Some(p) => write!(f, "load error: {message} ({})", p.display()),
                None => write!(f, "load error: {message}"),
            },
            AnalysisError::Ir { message } => write!(f, "malformed IR: {message}"),
            AnalysisError::Render { message } => write!(f, "render error: {message}"),
        }
    }
}

impl std::error::Error for AnalysisError {}

impl From<io::Error> for AnalysisError {
    fn from(err: io::Error) -> Self {
        AnalysisError::io(err.to_string())
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::load(err.to_string())
    }
}
