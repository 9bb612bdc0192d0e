use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Faults that abort a scan, as opposed to per-file problems (those are
/// converted to `RepairOutcome` values at the smallest scope and never
/// escape to the caller).
#[derive(Debug, Error)]
pub enum MendError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

impl MendError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        MendError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Category of a parser diagnostic. The matchers key off these tags, not
/// off raw message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Diagnostic {
    /// A `,` (or the matching close token) was expected.
    DelimiterExpected,
    /// An object key was expected.
    PropertyNameExpected,
    /// The file could not be read at all.
    Io,
    /// Any other parse error; no matcher targets these.
    Other,
}

impl Diagnostic {
    /// serde_json exposes no structured syntax-error kind, so the two
    /// phrases the matchers depend on are recognized here and nowhere else.
    pub fn classify(message: &str) -> Self {
        if message.contains("expected `,`") {
            Diagnostic::DelimiterExpected
        } else if message.contains("key must be a string") {
            Diagnostic::PropertyNameExpected
        } else {
            Diagnostic::Other
        }
    }
}

/// Why a document failed to parse: location plus the parser's message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParseFailure {
    pub path: PathBuf,
    /// 1-indexed; 0 when the file could not be read at all.
    pub line: usize,
    /// 1-indexed; 0 when the file could not be read at all.
    pub column: usize,
    pub diagnostic: Diagnostic,
    pub message: String,
}

impl ParseFailure {
    /// A file that could not be opened or decoded is reported with a zero
    /// location and the raw I/O message.
    pub fn from_io(path: &Path, err: &io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            line: 0,
            column: 0,
            diagnostic: Diagnostic::Io,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Line {}, Col {}: {}",
            self.line, self.column, self.message
        )
    }
}
