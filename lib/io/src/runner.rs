use crate::layout::RunInputs;
use crate::reader::{read_lines, LineReader};
use crate::report::{BatchReport, RunReport, TierReport};
use crate::writer::write_atomically;
use anyhow::{Context, Result};
use paymo_core::record::numbered;
use paymo_core::{
    classify_tiers, Classifier, ClassifyOptions, Diagnostics, Error, GraphBuilder, PolicyTier,
    RelationshipGraph,
};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Configuration for a classification run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Skip the first line of both the batch and the stream file
    pub skip_header: bool,
    /// Classify tiers concurrently with the stream held in memory.
    /// When off, each tier streams the input file line by line.
    pub parallel: bool,
    pub tiers: Vec<PolicyTier>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            skip_header: true,
            parallel: true,
            tiers: PolicyTier::ALL.to_vec(),
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> paymo_core::Result<()> {
        if self.tiers.is_empty() {
            return Err(Error::InvalidConfig("no policy tier selected".to_string()));
        }
        for (i, tier) in self.tiers.iter().enumerate() {
            if self.tiers[..i].contains(tier) {
                return Err(Error::InvalidConfig(format!("{tier} selected more than once")));
            }
        }
        Ok(())
    }

    fn classify_options(&self) -> ClassifyOptions {
        ClassifyOptions {
            skip_header: self.skip_header,
            parallel: self.parallel,
        }
    }
}

/// Builds the graph from the batch file and writes one verdict file per tier
pub struct Runner {
    config: RunConfig,
}

impl Runner {
    pub fn new(config: RunConfig) -> paymo_core::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Build the relationship graph from a batch file. Malformed lines end up
    /// in the returned diagnostics; only I/O failures are errors.
    pub fn build_graph(&self, path: &Path) -> Result<(RelationshipGraph, Diagnostics)> {
        let mut diagnostics = Diagnostics::new();
        let mut builder = GraphBuilder::new();
        for (line_no, line) in numbered(LineReader::open(path)?, self.config.skip_header) {
            let line = line.with_context(|| format!("failed to read {} at line {}", path.display(), line_no))?;
            builder.add_line(line_no, &line, &mut diagnostics);
        }
        Ok((builder.finish(), diagnostics))
    }

    pub fn run(&self, inputs: &RunInputs) -> Result<RunReport> {
        std::fs::create_dir_all(&inputs.output_dir)
            .with_context(|| format!("failed to create {}", inputs.output_dir.display()))?;

        info!("Constructing graph from {}", inputs.batch.display());
        let started = Instant::now();
        let (graph, diagnostics) = self.build_graph(&inputs.batch)?;
        let seconds = started.elapsed().as_secs_f64();
        log_diagnostics(&diagnostics);
        info!(
            "Graph built in {:.4} sec: {} parties, {} relationships, {} malformed lines skipped",
            seconds,
            graph.node_count(),
            graph.edge_count(),
            diagnostics.len()
        );

        let mut report = RunReport::new(BatchReport {
            path: inputs.batch.clone(),
            stats: graph.stats(),
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            seconds,
        });

        report.tiers = if self.config.parallel {
            self.classify_in_memory(&graph, inputs)?
        } else {
            self.classify_streaming(&graph, inputs)?
        };
        Ok(report)
    }

    fn classify_in_memory(&self, graph: &RelationshipGraph, inputs: &RunInputs) -> Result<Vec<TierReport>> {
        let lines = read_lines(&inputs.stream)?;
        debug!("Loaded {} stream lines into memory", lines.len());

        let results = classify_tiers(graph, &lines, &self.config.tiers, self.config.classify_options());
        results
            .into_iter()
            .map(|result| -> Result<TierReport> {
                let output = inputs.tier_output(result.tier);
                let records = write_atomically(&output, |w| w.write_all(&result.verdicts))?;
                log_diagnostics(&result.diagnostics);

                let report = TierReport {
                    tier: result.tier,
                    depth: result.tier.depth(),
                    output,
                    records,
                    trusted: result.trusted(),
                    unverified: result.unverified(),
                    malformed: result.diagnostics.len(),
                    seconds: result.elapsed.as_secs_f64(),
                };
                log_tier(&report);
                Ok(report)
            })
            .collect()
    }

    fn classify_streaming(&self, graph: &RelationshipGraph, inputs: &RunInputs) -> Result<Vec<TierReport>> {
        self.config
            .tiers
            .iter()
            .map(|&tier| -> Result<TierReport> {
                let output = inputs.tier_output(tier);
                let classifier = Classifier::new(graph, tier);
                let mut diagnostics = Diagnostics::new();
                let mut trusted = 0;

                info!("Processing stream file for {} into {}", tier, output.display());
                let started = Instant::now();
                let reader = LineReader::open(&inputs.stream)?;
                let records = write_atomically(&output, |w| {
                    let mut read_error = None;
                    let lines = reader.map_while(|line| line.map_err(|e| read_error = Some(e)).ok());
                    classifier.classify_each(lines, self.config.skip_header, &mut diagnostics, |verdict| {
                        if verdict.is_trusted() {
                            trusted += 1;
                        }
                        w.write(verdict)
                    })?;
                    match read_error {
                        Some(e) => Err(e),
                        None => Ok(()),
                    }
                })?;
                log_diagnostics(&diagnostics);

                let report = TierReport {
                    tier,
                    depth: tier.depth(),
                    output,
                    records,
                    trusted,
                    unverified: records - trusted,
                    malformed: diagnostics.len(),
                    seconds: started.elapsed().as_secs_f64(),
                };
                log_tier(&report);
                Ok(report)
            })
            .collect()
    }
}

fn log_diagnostics(diagnostics: &Diagnostics) {
    for diagnostic in diagnostics.iter() {
        warn!("{}", diagnostic);
    }
}

fn log_tier(report: &TierReport) {
    info!(
        "{} (depth {}): {} records, {} trusted, {} unverified, {:.4} sec total, {:.12} sec per transaction (avg)",
        report.tier,
        report.depth,
        report.records,
        report.trusted,
        report.unverified,
        report.seconds,
        report.seconds_per_record()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_runs_all_tiers() {
        let config = RunConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tiers, PolicyTier::ALL.to_vec());
        assert!(config.skip_header);
    }

    #[test]
    fn test_rejects_empty_and_duplicate_tiers() {
        let empty = RunConfig {
            tiers: Vec::new(),
            ..RunConfig::default()
        };
        assert!(matches!(Runner::new(empty), Err(Error::InvalidConfig(_))));

        let duplicate = RunConfig {
            tiers: vec![PolicyTier::Feature2, PolicyTier::Feature2],
            ..RunConfig::default()
        };
        assert!(matches!(duplicate.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_build_graph_reports_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch_payment.txt");
        std::fs::write(
            &path,
            "time, id1, id2, amount, message\n\
             2016-11-02 09:49:29, 1, 2, 1.00, a\n\
             garbage\n\
             2016-11-02 09:49:29, 2, 3, 1.00, b\n",
        )
        .unwrap();

        let runner = Runner::new(RunConfig::default()).unwrap();
        let (graph, diagnostics) = runner.build_graph(&path).unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(diagnostics.iter().map(|d| d.line).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_missing_batch_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = RunInputs::new(dir.path().join("nope.txt"), dir.path().join("s.txt"), dir.path().join("out"));
        let runner = Runner::new(RunConfig::default()).unwrap();
        assert!(runner.run(&inputs).is_err());
    }
}
