// Bounded shortest-path queries over the relationship graph
//
// Level-synchronous bidirectional BFS: each step expands one whole level of
// the smaller frontier and checks the newly discovered parties against the
// other side's visited map.

use crate::graph::RelationshipGraph;
use crate::record::PartyId;
use ahash::AHashMap;

/// Shortest-path distance between `source` and `target`, or `None` when the
/// two are not connected within `max_depth` hops.
///
/// A party absent from the graph is unreachable from everything, itself
/// included. A present party is at distance 0 from itself for every depth.
pub fn distance(
    graph: &RelationshipGraph,
    source: PartyId,
    target: PartyId,
    max_depth: u32,
) -> Option<u32> {
    if !graph.contains(source) || !graph.contains(target) {
        return None;
    }
    if source == target {
        return Some(0);
    }

    let mut forward = Search::new(source);
    let mut backward = Search::new(target);

    while forward.depth + backward.depth < max_depth {
        let (expanding, other) = if forward.frontier.len() <= backward.frontier.len() {
            (&mut forward, &backward)
        } else {
            (&mut backward, &forward)
        };

        match expanding.advance(graph, other) {
            Step::Met(hops) => return Some(hops),
            Step::Exhausted => return None,
            Step::Continue => {}
        }
    }

    None
}

/// `true` when `source` and `target` are connected within `max_depth` hops
#[inline]
pub fn is_connected_within(
    graph: &RelationshipGraph,
    source: PartyId,
    target: PartyId,
    max_depth: u32,
) -> bool {
    distance(graph, source, target, max_depth).is_some()
}

enum Step {
    Met(u32),
    Exhausted,
    Continue,
}

/// One side of the bidirectional search
struct Search {
    visited: AHashMap<PartyId, u32>,
    frontier: Vec<PartyId>,
    depth: u32,
}

impl Search {
    fn new(origin: PartyId) -> Self {
        let mut visited = AHashMap::new();
        visited.insert(origin, 0);
        Self {
            visited,
            frontier: vec![origin],
            depth: 0,
        }
    }

    fn advance(&mut self, graph: &RelationshipGraph, other: &Search) -> Step {
        let depth = self.depth + 1;
        let mut next = Vec::new();

        for &node in &self.frontier {
            for neighbor in graph.neighbors(node) {
                if self.visited.contains_key(&neighbor) {
                    continue;
                }
                // No meeting happened at earlier levels, so the first one
                // found here is a shortest path.
                if let Some(&remaining) = other.visited.get(&neighbor) {
                    return Step::Met(depth + remaining);
                }
                self.visited.insert(neighbor, depth);
                next.push(neighbor);
            }
        }

        self.depth = depth;
        if next.is_empty() {
            return Step::Exhausted;
        }
        self.frontier = next;
        Step::Continue
    }
}
