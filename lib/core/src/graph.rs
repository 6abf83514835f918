// Undirected relationship graph built from batch payments
use crate::diagnostics::{Diagnostics, RecordSource};
use crate::record::{numbered, PartyId, Transaction};
use ahash::{AHashMap, AHashSet};
use serde::Serialize;

/// Counters gathered while building a graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Lines considered, header excluded
    pub records: usize,
    pub malformed: usize,
    pub self_transactions: usize,
}

/// Undirected, unweighted graph over party ids.
///
/// Adjacency sets are kept symmetric and never contain their own key.
/// The graph has no mutators: build it with [`GraphBuilder`] or
/// [`RelationshipGraph::from_lines`], then share it read-only.
#[derive(Debug, Clone, Default)]
pub struct RelationshipGraph {
    adjacency: AHashMap<PartyId, AHashSet<PartyId>>,
    edge_count: usize,
    stats: BuildStats,
}

impl RelationshipGraph {
    /// Build from raw batch lines, optionally skipping one header line.
    /// Malformed lines are skipped and reported to `diagnostics`.
    pub fn from_lines<I, S>(lines: I, skip_header: bool, diagnostics: &mut Diagnostics) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GraphBuilder::new();
        for (line_no, line) in numbered(lines, skip_header) {
            builder.add_line(line_no, line.as_ref(), diagnostics);
        }
        builder.finish()
    }

    /// Build directly from id pairs
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (PartyId, PartyId)>,
    {
        let mut builder = GraphBuilder::new();
        for (a, b) in edges {
            builder.add_edge(a, b);
        }
        builder.finish()
    }

    /// Neighbors of `node`; empty for a node the graph has never seen
    pub fn neighbors(&self, node: PartyId) -> impl Iterator<Item = PartyId> + '_ {
        self.adjacency.get(&node).into_iter().flat_map(|set| set.iter()).copied()
    }

    #[inline]
    pub fn neighbor_set(&self, node: PartyId) -> Option<&AHashSet<PartyId>> {
        self.adjacency.get(&node)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, node: PartyId) -> bool {
        self.adjacency.contains_key(&node)
    }

    #[inline]
    #[must_use]
    pub fn degree(&self, node: PartyId) -> usize {
        self.adjacency.get(&node).map_or(0, |set| set.len())
    }

    pub fn nodes(&self) -> impl Iterator<Item = PartyId> + '_ {
        self.adjacency.keys().copied()
    }

    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Undirected edges, each counted once
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn stats(&self) -> BuildStats {
        self.stats
    }
}

/// Incremental construction of a [`RelationshipGraph`]
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: RelationshipGraph,
}

impl GraphBuilder {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one batch line and add its edge. `line_no` is only used for
    /// the diagnostic when the line is rejected.
    pub fn add_line(&mut self, line_no: usize, line: &str, diagnostics: &mut Diagnostics) {
        self.graph.stats.records += 1;
        match Transaction::parse(line) {
            Ok(tx) => {
                if tx.is_self_transaction() {
                    self.graph.stats.self_transactions += 1;
                } else {
                    self.add_edge(tx.from, tx.to);
                }
            }
            Err(error) => {
                self.graph.stats.malformed += 1;
                diagnostics.malformed(RecordSource::Batch, line_no, error);
            }
        }
    }

    /// Insert an undirected edge. Returns `true` if the edge is new.
    /// Self-loops are ignored.
    pub fn add_edge(&mut self, a: PartyId, b: PartyId) -> bool {
        if a == b {
            return false;
        }
        let adjacency = &mut self.graph.adjacency;
        let inserted = adjacency.entry(a).or_default().insert(b);
        adjacency.entry(b).or_default().insert(a);
        if inserted {
            self.graph.edge_count += 1;
        }
        inserted
    }

    #[must_use]
    pub fn finish(self) -> RelationshipGraph {
        self.graph
    }
}
