pub mod buffer;
pub mod cli;
pub mod error;
pub mod matchers;
pub mod options;
pub mod parse;
pub mod repair;
pub mod scan;

pub use buffer::LineBuffer;
pub use error::{Diagnostic, MendError, ParseFailure};
pub use options::Options;
pub use parse::validate;
pub use repair::{FixRecord, RepairOutcome, apply_matchers, repair_file};
pub use scan::{FileOutcome, Report, find_json_files, repair_tree, scan_tree};

#[cfg(test)]
mod tests;
