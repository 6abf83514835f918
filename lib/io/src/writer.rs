use anyhow::{Context, Result};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use paymo_core::Verdict;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Buffered `trusted` / `unverified` line writer
pub struct VerdictWriter<W: Write> {
    inner: BufWriter<W>,
    written: usize,
}

impl<W: Write> VerdictWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner: BufWriter::new(inner),
            written: 0,
        }
    }

    /// Append one verdict line
    #[inline]
    pub fn write(&mut self, verdict: Verdict) -> io::Result<()> {
        self.inner.write_all(verdict.as_str().as_bytes())?;
        self.inner.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    pub fn write_all(&mut self, verdicts: &[Verdict]) -> io::Result<()> {
        for &verdict in verdicts {
            self.write(verdict)?;
        }
        Ok(())
    }

    #[inline]
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush buffered lines and hand back the underlying writer
    pub fn finish(self) -> io::Result<W> {
        self.inner.into_inner().map_err(|e| e.into_error())
    }
}

/// Write a verdict file through a temporary file and rename it into place,
/// so readers never see a partially written output. Returns the number of
/// lines written.
pub fn write_atomically<P, F>(path: P, fill: F) -> Result<usize>
where
    P: AsRef<Path>,
    F: FnOnce(&mut VerdictWriter<&mut File>) -> io::Result<()>,
{
    let path = path.as_ref();
    let mut written = 0;
    AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
        .write(|file| {
            let mut writer = VerdictWriter::new(file);
            fill(&mut writer)?;
            written = writer.written();
            writer.finish()?.sync_data()
        })
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_vocabulary_lines() {
        let mut writer = VerdictWriter::new(Vec::new());
        writer
            .write_all(&[Verdict::Trusted, Verdict::Unverified, Verdict::Trusted])
            .unwrap();
        assert_eq!(writer.written(), 3);
        let bytes = writer.finish().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "trusted\nunverified\ntrusted\n");
    }

    #[test]
    fn test_atomic_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output1.txt");
        std::fs::write(&path, "stale\n").unwrap();

        let written = write_atomically(&path, |w| w.write(Verdict::Unverified)).unwrap();

        assert_eq!(written, 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "unverified\n");
    }

    #[test]
    fn test_failed_fill_keeps_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output2.txt");
        std::fs::write(&path, "trusted\n").unwrap();

        let result = write_atomically(&path, |w| {
            w.write(Verdict::Unverified)?;
            Err(io::Error::new(io::ErrorKind::Other, "stream went away"))
        });

        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "trusted\n");
    }
}
