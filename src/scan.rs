use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{MendError, ParseFailure};
use crate::options::Options;
use crate::parse;
use crate::repair::{self, RepairOutcome};

/// All `.json` files under `root`, in a stable per-directory sorted order.
pub fn find_json_files(root: &Path) -> Result<Vec<PathBuf>, MendError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "json")
        {
            files.push(entry.path().to_path_buf());
        }
    }
    Ok(files)
}

/// Validate every `.json` file under `root`, returning one failure per
/// broken or unreadable file. Valid files are skipped.
pub fn scan_tree(root: &Path) -> Result<Vec<ParseFailure>, MendError> {
    Ok(scan_files(&find_json_files(root)?))
}

fn scan_files(files: &[PathBuf]) -> Vec<ParseFailure> {
    let mut failures = Vec::new();
    for path in files {
        match fs::read_to_string(path) {
            Ok(text) => {
                if let Err(failure) = parse::validate(path, &text) {
                    failures.push(failure);
                }
            }
            Err(err) => failures.push(ParseFailure::from_io(path, &err)),
        }
    }
    failures
}

/// One processed file: the failure the scan found and what the repair
/// attempt made of it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FileOutcome {
    pub failure: ParseFailure,
    pub outcome: RepairOutcome,
}

/// Result of one full repair run over a directory tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Report {
    /// Number of `.json` files inspected.
    pub scanned: usize,
    /// One entry per file that failed initial validation.
    pub files: Vec<FileOutcome>,
}

impl Report {
    pub fn errors(&self) -> usize {
        self.files.len()
    }

    pub fn fixed(&self) -> usize {
        self.files.iter().filter(|f| f.outcome.is_fixed()).count()
    }

    pub fn failed(&self) -> usize {
        self.errors() - self.fixed()
    }
}

/// Scan `root` and run one repair attempt per failing file. A single
/// file's failure never aborts the run.
pub fn repair_tree(root: &Path, opts: &Options) -> Result<Report, MendError> {
    let paths = find_json_files(root)?;
    let scanned = paths.len();
    let mut files = Vec::new();
    for failure in scan_files(&paths) {
        let outcome = repair::repair_file(&failure.path, &failure, opts);
        files.push(FileOutcome { failure, outcome });
    }
    Ok(Report { scanned, files })
}
