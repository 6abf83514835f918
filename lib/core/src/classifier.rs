// Per-transaction trust decisions against a built graph
use crate::diagnostics::{Diagnostic, Diagnostics, RecordSource};
use crate::error::ParseError;
use crate::graph::RelationshipGraph;
use crate::oracle;
use crate::record::{numbered, Transaction};
use crate::tier::{PolicyTier, Verdict};
use rayon::prelude::*;
use std::convert::Infallible;
use std::time::{Duration, Instant};

/// Options shared by every classification pass
#[derive(Debug, Clone, Copy)]
pub struct ClassifyOptions {
    /// Drop the first stream line
    pub skip_header: bool,
    /// Classify records (and tiers) on the rayon pool
    pub parallel: bool,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            skip_header: true,
            parallel: true,
        }
    }
}

/// Classifies streamed transactions for one policy tier.
///
/// Holds only a shared borrow of the graph, so any number of classifiers
/// can run side by side.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'g> {
    graph: &'g RelationshipGraph,
    tier: PolicyTier,
}

impl<'g> Classifier<'g> {
    #[inline]
    #[must_use]
    pub fn new(graph: &'g RelationshipGraph, tier: PolicyTier) -> Self {
        Self { graph, tier }
    }

    #[inline]
    pub fn tier(&self) -> PolicyTier {
        self.tier
    }

    /// Verdict for a parsed line, or the reason it could not be parsed
    pub fn classify_line(&self, line: &str) -> Result<Verdict, ParseError> {
        let tx = Transaction::parse(line)?;
        let verdict = if oracle::is_connected_within(self.graph, tx.from, tx.to, self.tier.depth()) {
            Verdict::Trusted
        } else {
            Verdict::Unverified
        };
        Ok(verdict)
    }

    /// Fail-closed verdict: unparseable lines are `Unverified` and reported
    pub fn verdict(&self, line_no: usize, line: &str, diagnostics: &mut Diagnostics) -> Verdict {
        match self.classify_line(line) {
            Ok(verdict) => verdict,
            Err(error) => {
                diagnostics.malformed(RecordSource::Stream, line_no, error);
                Verdict::Unverified
            }
        }
    }

    /// Classify lines one by one, handing each verdict to `emit` in input
    /// order. Returns the number of verdicts emitted.
    pub fn classify_each<I, S, F, E>(
        &self,
        lines: I,
        skip_header: bool,
        diagnostics: &mut Diagnostics,
        mut emit: F,
    ) -> Result<usize, E>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: FnMut(Verdict) -> Result<(), E>,
    {
        let mut emitted = 0;
        for (line_no, line) in numbered(lines, skip_header) {
            emit(self.verdict(line_no, line.as_ref(), diagnostics))?;
            emitted += 1;
        }
        Ok(emitted)
    }

    /// Sequential classification into a verdict vector
    pub fn classify<I, S>(&self, lines: I, skip_header: bool, diagnostics: &mut Diagnostics) -> Vec<Verdict>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut verdicts = Vec::new();
        let result = self.classify_each(lines, skip_header, diagnostics, |verdict| {
            verdicts.push(verdict);
            Ok::<(), Infallible>(())
        });
        match result {
            Ok(_) => verdicts,
            Err(never) => match never {},
        }
    }

    /// Parallel classification. Verdicts and diagnostics come back in input
    /// order, identical to [`Classifier::classify`].
    pub fn classify_par<S>(&self, lines: &[S], skip_header: bool, diagnostics: &mut Diagnostics) -> Vec<Verdict>
    where
        S: AsRef<str> + Sync,
    {
        let skip = usize::from(skip_header).min(lines.len());
        let results: Vec<(Verdict, Option<Diagnostic>)> = lines[skip..]
            .par_iter()
            .enumerate()
            .map(|(offset, line)| match self.classify_line(line.as_ref()) {
                Ok(verdict) => (verdict, None),
                Err(error) => (
                    Verdict::Unverified,
                    Some(Diagnostic {
                        source: RecordSource::Stream,
                        line: skip + offset + 1,
                        error,
                    }),
                ),
            })
            .collect();

        let mut verdicts = Vec::with_capacity(results.len());
        for (verdict, diagnostic) in results {
            if let Some(d) = diagnostic {
                diagnostics.malformed(d.source, d.line, d.error);
            }
            verdicts.push(verdict);
        }
        verdicts
    }
}

/// Verdicts produced by one tier's pass over the stream
#[derive(Debug, Clone)]
pub struct TierVerdicts {
    pub tier: PolicyTier,
    pub verdicts: Vec<Verdict>,
    pub diagnostics: Diagnostics,
    /// Wall time spent classifying
    pub elapsed: Duration,
}

impl TierVerdicts {
    pub fn trusted(&self) -> usize {
        self.verdicts.iter().filter(|v| v.is_trusted()).count()
    }

    pub fn unverified(&self) -> usize {
        self.verdicts.len() - self.trusted()
    }
}

/// Run one independent pass per tier over the same stream and graph.
/// Results are returned in the order of `tiers`.
pub fn classify_tiers<S>(
    graph: &RelationshipGraph,
    lines: &[S],
    tiers: &[PolicyTier],
    options: ClassifyOptions,
) -> Vec<TierVerdicts>
where
    S: AsRef<str> + Sync,
{
    let run = |&tier: &PolicyTier| {
        let started = Instant::now();
        let classifier = Classifier::new(graph, tier);
        let mut diagnostics = Diagnostics::new();
        let verdicts = if options.parallel {
            classifier.classify_par(lines, options.skip_header, &mut diagnostics)
        } else {
            classifier.classify(lines, options.skip_header, &mut diagnostics)
        };
        TierVerdicts {
            tier,
            verdicts,
            diagnostics,
            elapsed: started.elapsed(),
        }
    };

    if options.parallel {
        tiers.par_iter().map(run).collect()
    } else {
        tiers.iter().map(run).collect()
    }
}
