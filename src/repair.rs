use std::fs;
use std::io::Write;
use std::path::Path;

use crate::buffer::LineBuffer;
use crate::error::{MendError, ParseFailure};
use crate::matchers::MATCHERS;
use crate::options::Options;
use crate::parse;

pub const NO_FIX_AVAILABLE: &str = "No automatic fix available";

/// One textual edit performed during a repair attempt. The description is
/// human readable and names the affected line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FixRecord {
    pub description: String,
}

impl FixRecord {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Terminal result of one repair attempt. A file gets exactly one attempt
/// per run; there are no retries.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RepairOutcome {
    Fixed(Vec<FixRecord>),
    Unfixed(String),
}

impl RepairOutcome {
    pub fn is_fixed(&self) -> bool {
        matches!(self, RepairOutcome::Fixed(_))
    }
}

/// Run the matcher pipeline over `text`, all stages conditioned on the
/// same `failure`, and return the candidate document plus the records of
/// every edit performed.
pub fn apply_matchers(text: &str, failure: &ParseFailure) -> (String, Vec<FixRecord>) {
    let mut buf = LineBuffer::from_text(text);
    let mut records = Vec::new();
    for matcher in &MATCHERS {
        records.extend((matcher.apply)(failure, &mut buf));
    }
    (buf.join(), records)
}

/// One repair attempt for one file.
///
/// The file is rewritten only when the patched document passes
/// re-validation; every other path leaves the disk untouched and reports
/// why. No fault escapes this function.
pub fn repair_file(path: &Path, failure: &ParseFailure, opts: &Options) -> RepairOutcome {
    let original = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => return RepairOutcome::Unfixed(err.to_string()),
    };
    let (candidate, records) = apply_matchers(&original, failure);
    if candidate == original {
        return RepairOutcome::Unfixed(NO_FIX_AVAILABLE.to_string());
    }
    if let Err(still) = parse::validate(path, &candidate) {
        return RepairOutcome::Unfixed(format!(
            "Fix applied but still has error: Line {}, {}",
            still.line, still.message
        ));
    }
    if opts.dry_run {
        return RepairOutcome::Fixed(records);
    }
    match persist(path, &candidate, opts) {
        Ok(()) => RepairOutcome::Fixed(records),
        Err(err) => RepairOutcome::Unfixed(format!("Repaired but could not write: {err}")),
    }
}

/// Write the candidate to a sibling temp file and rename it into place, so
/// an interrupted write can never leave a truncated document behind.
fn persist(path: &Path, candidate: &str, opts: &Options) -> Result<(), MendError> {
    if opts.keep_backup {
        let mut backup = path.as_os_str().to_owned();
        backup.push(".orig");
        fs::copy(path, &backup).map_err(|e| MendError::io(path, e))?;
    }
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = tempfile::NamedTempFile::new_in(dir.unwrap_or_else(|| Path::new(".")))
        .map_err(|e| MendError::io(path, e))?;
    tmp.write_all(candidate.as_bytes())
        .map_err(|e| MendError::io(path, e))?;
    tmp.persist(path).map_err(|e| MendError::io(path, e.error))?;
    Ok(())
}
