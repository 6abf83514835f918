use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Line iterator that tolerates invalid UTF-8.
///
/// Bytes that do not decode are replaced rather than failing the read, so
/// one bad byte in a free-text field cannot abort a whole file. Line
/// terminators (`\n` or `\r\n`) are stripped.
pub struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::with_capacity(256),
        }
    }
}

impl LineReader<BufReader<File>> {
    /// Open a file for line-by-line reading
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.inner.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Read a whole file into memory as lines
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    LineReader::open(path)?
        .collect::<io::Result<Vec<_>>>()
        .with_context(|| format!("failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_strips_line_endings() {
        let reader = LineReader::new(Cursor::new(b"a,b\r\nc,d\ne,f".to_vec()));
        let lines: Vec<String> = reader.map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["a,b", "c,d", "e,f"]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let reader = LineReader::new(Cursor::new(b"t, 1, 2, 3.00, caf\xe9\nnext\n".to_vec()));
        let lines: Vec<String> = reader.map(|l| l.unwrap()).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("t, 1, 2, 3.00, caf"));
        assert_eq!(lines[1], "next");
    }

    #[test]
    fn test_blank_line_is_kept() {
        let reader = LineReader::new(Cursor::new(b"a\n\nb\n".to_vec()));
        let lines: Vec<String> = reader.map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn test_read_lines_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.txt");
        std::fs::write(&path, "header\nrow\n").unwrap();
        assert_eq!(read_lines(&path).unwrap(), vec!["header", "row"]);
        assert!(read_lines(dir.path().join("missing.txt")).is_err());
    }
}
