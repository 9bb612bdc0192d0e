/// Working line-split copy of a document during one repair attempt.
///
/// Splitting on `\n` and rejoining with `\n` round-trips byte-identically
/// for any input, so an untouched buffer always reproduces the original
/// text. The buffer never outlives the attempt that created it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
        }
    }

    pub fn join(&self) -> String {
        self.lines.join("\n")
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(String::as_str)
    }

    /// The line at `idx`, trimmed of surrounding whitespace.
    pub fn trimmed(&self, idx: usize) -> Option<&str> {
        self.line(idx).map(str::trim)
    }

    pub fn remove(&mut self, idx: usize) -> String {
        self.lines.remove(idx)
    }

    pub fn replace(&mut self, idx: usize, line: String) {
        self.lines[idx] = line;
    }

    /// Rebuild the buffer from text re-derived by a whole-document pass.
    pub fn reset_from(&mut self, text: &str) {
        self.lines = text.split('\n').map(str::to_string).collect();
    }
}
