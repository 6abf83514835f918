use crate::diagnostics::Diagnostics;
use crate::graph::RelationshipGraph;
use parking_lot::RwLock;
use std::sync::Arc;

/// Holder for the graph snapshot queries run against.
///
/// Readers take an `Arc` to the current snapshot and keep it for as long as
/// they need it. A reload builds a complete new graph first and only then
/// swaps the pointer, so no query ever observes a partially built graph.
#[derive(Debug, Default)]
pub struct SharedGraph {
    current: RwLock<Arc<RelationshipGraph>>,
}

impl SharedGraph {
    pub fn new(graph: RelationshipGraph) -> Self {
        Self {
            current: RwLock::new(Arc::new(graph)),
        }
    }

    /// The snapshot in effect right now
    #[inline]
    pub fn load(&self) -> Arc<RelationshipGraph> {
        self.current.read().clone()
    }

    /// Install `graph` as the current snapshot, returning the previous one
    pub fn replace(&self, graph: RelationshipGraph) -> Arc<RelationshipGraph> {
        let next = Arc::new(graph);
        std::mem::replace(&mut *self.current.write(), next)
    }

    /// Rebuild from batch lines and swap the result in
    pub fn reload<I, S>(&self, lines: I, skip_header: bool, diagnostics: &mut Diagnostics) -> Arc<RelationshipGraph>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let graph = RelationshipGraph::from_lines(lines, skip_header, diagnostics);
        self.replace(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::distance;

    #[test]
    fn test_reload_swaps_without_touching_held_snapshot() {
        let shared = SharedGraph::new(RelationshipGraph::from_edges([(1, 2)]));
        let held = shared.load();

        let mut diagnostics = Diagnostics::new();
        let previous = shared.reload(["t, 1, 3, 1.00, x"], false, &mut diagnostics);

        assert!(Arc::ptr_eq(&held, &previous));
        assert_eq!(distance(&held, 1, 2, 1), Some(1));
        assert_eq!(distance(&held, 1, 3, 1), None);

        let current = shared.load();
        assert_eq!(distance(&current, 1, 3, 1), Some(1));
        assert!(!current.contains(2));
    }

    #[test]
    fn test_concurrent_readers_see_whole_snapshots() {
        let shared = Arc::new(SharedGraph::new(RelationshipGraph::from_edges([(1, 2), (2, 3)])));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        let graph = shared.load();
                        // Either the old chain (distance 2) or the new direct edge
                        let hops = distance(&graph, 1, 3, 4);
                        assert!(hops == Some(2) || hops == Some(1));
                    }
                })
            })
            .collect();

        shared.replace(RelationshipGraph::from_edges([(1, 3)]));
        for reader in readers {
            reader.join().unwrap();
        }
    }
}
