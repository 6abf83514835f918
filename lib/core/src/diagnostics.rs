// Non-fatal per-record problems, collected instead of logged
use crate::error::ParseError;
use serde::Serialize;

/// Which input a diagnostic came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    Batch,
    Stream,
}

impl std::fmt::Display for RecordSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordSource::Batch => write!(f, "batch"),
            RecordSource::Stream => write!(f, "stream"),
        }
    }
}

/// A malformed record: where it was and why it was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub source: RecordSource,
    /// 1-based physical line number, header included
    pub line: usize,
    pub error: ParseError,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "skipped unparseable {} transaction at line {}: {}",
            self.source, self.line, self.error
        )
    }
}

/// Accumulator handed to graph build and classification
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn malformed(&mut self, source: RecordSource, line: usize, error: ParseError) {
        self.entries.push(Diagnostic { source, line, error });
    }

    /// Append another accumulator, keeping its order
    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, source: RecordSource) -> usize {
        self.entries.iter().filter(|d| d.source == source).count()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
