//! The four corruption heuristics.
//!
//! Each matcher is a pure predicate-plus-edit over the reported failure and
//! the line buffer: it either recognizes its one defect pattern and mutates
//! the buffer in place, or leaves the buffer untouched and returns no
//! records. Matchers never re-parse; they are all conditioned on the same
//! failure the initial validation produced.

use memchr::{memchr, memchr_iter, memrchr};

use crate::buffer::LineBuffer;
use crate::error::{Diagnostic, ParseFailure};
use crate::repair::FixRecord;

/// Column threshold separating "mid-line" delimiter errors (comma
/// insertion candidates) from "stray extra line" errors, which the
/// duplicate-brace matcher targets.
const MID_LINE_COLUMN: usize = 50;

/// One corruption heuristic: recognizes a single defect pattern and edits
/// the buffer in place, returning one record per edit performed.
pub struct Matcher {
    pub name: &'static str,
    pub apply: fn(&ParseFailure, &mut LineBuffer) -> Vec<FixRecord>,
}

/// The fixed application order is part of the contract: the placeholder
/// pass re-derives its text from the joined buffer, so it must run after
/// the two brace matchers for deletions and substitutions to compose
/// within a single attempt.
pub const MATCHERS: [Matcher; 4] = [
    Matcher {
        name: "duplicate-closing-brace",
        apply: duplicate_closing_brace,
    },
    Matcher {
        name: "duplicate-opening-brace",
        apply: duplicate_opening_brace,
    },
    Matcher {
        name: "array-placeholder",
        apply: array_placeholder,
    },
    Matcher {
        name: "missing-comma",
        apply: missing_comma,
    },
];

/// A stray `}` wedged between an object's real closing brace and the
/// enclosing array's `]`. The parser reports a missing delimiter on the
/// stray line; deleting that line restores the document.
pub fn duplicate_closing_brace(failure: &ParseFailure, buf: &mut LineBuffer) -> Vec<FixRecord> {
    if failure.diagnostic != Diagnostic::DelimiterExpected {
        return Vec::new();
    }
    let Some(idx) = failure.line.checked_sub(1) else {
        return Vec::new();
    };
    let (Some(cur), Some(prev), Some(next)) = (
        buf.trimmed(idx),
        idx.checked_sub(1).and_then(|i| buf.trimmed(i)),
        buf.trimmed(idx + 1),
    ) else {
        return Vec::new();
    };
    if cur != "}" || !prev.ends_with('}') || !next.starts_with(']') {
        return Vec::new();
    }
    buf.remove(idx);
    vec![FixRecord::new(format!(
        "Removed duplicate closing brace at line {}",
        failure.line
    ))]
}

/// Symmetric case: a stray `{` right after an opening brace, flagged by the
/// parser as a missing property name.
pub fn duplicate_opening_brace(failure: &ParseFailure, buf: &mut LineBuffer) -> Vec<FixRecord> {
    if failure.diagnostic != Diagnostic::PropertyNameExpected {
        return Vec::new();
    }
    let Some(idx) = failure.line.checked_sub(1) else {
        return Vec::new();
    };
    let (Some(cur), Some(prev)) = (
        buf.trimmed(idx),
        idx.checked_sub(1).and_then(|i| buf.trimmed(i)),
    ) else {
        return Vec::new();
    };
    if cur != "{" || !prev.ends_with('{') {
        return Vec::new();
    }
    buf.remove(idx);
    vec![FixRecord::new(format!(
        "Removed duplicate opening brace at line {}",
        failure.line
    ))]
}

/// `[...]` placeholders anywhere in the document become empty arrays.
///
/// Runs over the joined buffer regardless of where the failure was
/// reported, as often as the pattern occurs. Whitespace, newlines
/// included, is allowed on both sides of the dots. Substitution is
/// literal: an occurrence inside a string is rewritten too.
pub fn array_placeholder(_failure: &ParseFailure, buf: &mut LineBuffer) -> Vec<FixRecord> {
    let text = buf.join();
    let bytes = text.as_bytes();
    let mut records = Vec::new();
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while let Some(off) = memchr(b'[', &bytes[pos..]) {
        let open = pos + off;
        out.push_str(&text[pos..open]);
        match placeholder_end(bytes, open) {
            Some(end) => {
                let line = 1 + memchr_iter(b'\n', &bytes[..open]).count();
                out.push_str("[]");
                records.push(FixRecord::new(format!(
                    "Replaced [...] placeholder with [] at line {line}"
                )));
                pos = end;
            }
            None => {
                out.push('[');
                pos = open + 1;
            }
        }
    }
    out.push_str(&text[pos..]);
    if !records.is_empty() {
        buf.reset_from(&out);
    }
    records
}

/// Byte index one past the closing `]` when the `[` at `open` starts a
/// placeholder, i.e. `[` ws* `...` ws* `]` with exactly three dots.
fn placeholder_end(bytes: &[u8], open: usize) -> Option<usize> {
    let mut i = open + 1;
    while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
        i += 1;
    }
    if !bytes[i..].starts_with(b"...") {
        return None;
    }
    i += 3;
    while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
        i += 1;
    }
    (bytes.get(i) == Some(&b']')).then_some(i + 1)
}

/// Missing comma inside a long line: the parser flags a delimiter error
/// past the mid-line threshold, and the comma belongs right after the
/// closing brace of the element before the reported column.
pub fn missing_comma(failure: &ParseFailure, buf: &mut LineBuffer) -> Vec<FixRecord> {
    if failure.diagnostic != Diagnostic::DelimiterExpected || failure.column <= MID_LINE_COLUMN {
        return Vec::new();
    }
    let Some(idx) = failure.line.checked_sub(1) else {
        return Vec::new();
    };
    let Some(line) = buf.line(idx) else {
        return Vec::new();
    };
    // A column past the end of the line means the reported position is
    // stale relative to the buffer; leave the line alone.
    if failure.column - 1 >= line.len() {
        return Vec::new();
    }
    let Some(brace) = memrchr(b'}', &line.as_bytes()[..failure.column - 1]) else {
        return Vec::new();
    };
    let mut patched = line.to_string();
    patched.insert(brace + 1, ',');
    buf.replace(idx, patched);
    vec![FixRecord::new(format!(
        "Added missing comma at line {}, col {}",
        failure.line,
        brace + 2
    ))]
}
