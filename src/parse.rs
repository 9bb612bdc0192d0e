use std::path::Path;

use crate::error::{Diagnostic, ParseFailure};

/// Check a document with the host parser.
///
/// Success has no side effect. Failure is converted into a `ParseFailure`
/// with serde_json's 1-indexed line and column; nothing panics and no
/// parser error escapes in its raw form.
pub fn validate(path: &Path, text: &str) -> Result<(), ParseFailure> {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(_) => Ok(()),
        Err(err) => Err(from_serde(path, &err)),
    }
}

fn from_serde(path: &Path, err: &serde_json::Error) -> ParseFailure {
    let message = strip_location(&err.to_string());
    ParseFailure {
        path: path.to_path_buf(),
        line: err.line(),
        column: err.column(),
        diagnostic: Diagnostic::classify(&message),
        message,
    }
}

/// serde_json appends " at line L column C" to every syntax error; the
/// location already travels in the failure fields, so the suffix is
/// dropped from the message.
fn strip_location(message: &str) -> String {
    match message.rfind(" at line ") {
        Some(idx) => message[..idx].to_string(),
        None => message.to_string(),
    }
}
