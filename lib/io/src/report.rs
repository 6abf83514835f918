use anyhow::{Context, Result};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use chrono::{DateTime, Utc};
use paymo_core::{BuildStats, PolicyTier};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Summary of one complete run, written as JSON on request
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub batch: BatchReport,
    pub tiers: Vec<TierReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub stats: BuildStats,
    pub nodes: usize,
    pub edges: usize,
    pub seconds: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TierReport {
    pub tier: PolicyTier,
    pub depth: u32,
    pub output: PathBuf,
    pub records: usize,
    pub trusted: usize,
    pub unverified: usize,
    pub malformed: usize,
    pub seconds: f64,
}

impl TierReport {
    /// Average classification time per record; zero for an empty stream
    pub fn seconds_per_record(&self) -> f64 {
        if self.records == 0 {
            0.0
        } else {
            self.seconds / self.records as f64
        }
    }
}

impl RunReport {
    pub fn new(batch: BatchReport) -> Self {
        Self {
            generated_at: Utc::now(),
            batch,
            tiers: Vec::new(),
        }
    }

    pub fn tier(&self, tier: PolicyTier) -> Option<&TierReport> {
        self.tiers.iter().find(|t| t.tier == tier)
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_vec_pretty(self)?;
        AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
            .write(|file| file.write_all(&json))
            .with_context(|| format!("failed to write report {}", path.display()))?;
        Ok(())
    }
}
