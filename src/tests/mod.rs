use std::path::PathBuf;

use crate::error::{Diagnostic, ParseFailure};

// Shared test helper: a failure at a chosen location, the way the scan
// would have reported it. Matchers only look at line/column/diagnostic.
fn failure_at(line: usize, column: usize, diagnostic: Diagnostic) -> ParseFailure {
    ParseFailure {
        path: PathBuf::from("test.json"),
        line,
        column,
        diagnostic,
        message: String::new(),
    }
}
