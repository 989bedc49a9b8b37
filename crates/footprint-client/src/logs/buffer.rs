use super::LogLine;

/// Insertion-ordered log lines.
///
/// The buffer only grows at its tail or is replaced wholesale; lines already
/// in it are never reordered or spliced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppendBuffer {
    lines: Vec<LogLine>,
}

impl AppendBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards the current contents and installs `lines` in order.
    pub fn replace<I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = LogLine>,
    {
        self.lines.clear();
        self.lines.extend(lines);
    }

    /// Adds `line` at the end and returns its position.
    pub fn append(&mut self, line: LogLine) -> usize {
        self.lines.push(line);
        self.lines.len() - 1
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }
}
