//! Property-based tests for traversals and node ids.
//!
//! Uses proptest to verify invariants across random inputs:
//! - Neither traversal repeats a node, whatever cycles the graph contains
//! - No traversal output lies further than `max_depth` edges from the start
//! - The ancestor chain is a path: each entry is the first parent of the last
//! - `NodeId::parts` recovers the components a node id was built from

// Property tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use etymon::models::{Edge, Entry, Neighbor, NodeId};
use etymon::services::{ancestor_chain, descendant_chain};
use etymon::storage::EdgeStore;
use proptest::prelude::*;
use std::collections::{HashMap, HashSet, VecDeque};

/// Random directed graph over nodes `n0..nN`.
#[derive(Debug, Clone)]
struct RandomGraph {
    nodes: usize,
    children: HashMap<usize, Vec<usize>>,
    parents: HashMap<usize, Vec<usize>>,
}

impl RandomGraph {
    fn new(nodes: usize, edges: &[(usize, usize)]) -> Self {
        let mut children: HashMap<usize, Vec<usize>> = HashMap::new();
        let mut parents: HashMap<usize, Vec<usize>> = HashMap::new();
        for &(src, dst) in edges {
            let (src, dst) = (src % nodes, dst % nodes);
            children.entry(src).or_default().push(dst);
            parents.entry(dst).or_default().push(src);
        }
        Self {
            nodes,
            children,
            parents,
        }
    }

    fn entry(index: usize) -> Entry {
        Entry::new(format!("xx:n{index}:noun:0"), format!("n{index}"), "xx")
    }

    fn index(id: &NodeId) -> usize {
        id.as_str()
            .trim_start_matches("xx:n")
            .trim_end_matches(":noun:0")
            .parse()
            .unwrap()
    }

    fn resolve(&self, ids: Option<&Vec<usize>>) -> Vec<Entry> {
        ids.into_iter().flatten().map(|&i| Self::entry(i)).collect()
    }

    /// Shortest edge distance from `start` to every reachable node.
    fn distances(&self, start: usize) -> HashMap<usize, usize> {
        let mut dist = HashMap::from([(start, 0)]);
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            let d = dist[&node];
            for &child in self.children.get(&node).into_iter().flatten() {
                if !dist.contains_key(&child) {
                    dist.insert(child, d + 1);
                    queue.push_back(child);
                }
            }
        }
        dist
    }
}

impl EdgeStore for RandomGraph {
    fn outgoing(&self, _id: &NodeId) -> etymon::Result<Vec<Edge>> {
        Ok(Vec::new())
    }

    fn incoming(&self, _id: &NodeId) -> etymon::Result<Vec<Edge>> {
        Ok(Vec::new())
    }

    fn outgoing_neighbors(&self, _id: &NodeId) -> etymon::Result<Vec<Neighbor>> {
        Ok(Vec::new())
    }

    fn incoming_neighbors(&self, _id: &NodeId) -> etymon::Result<Vec<Neighbor>> {
        Ok(Vec::new())
    }

    fn descendants_of(&self, id: &NodeId) -> etymon::Result<Vec<Entry>> {
        Ok(self.resolve(self.children.get(&Self::index(id))))
    }

    fn descendant_sources_of(&self, id: &NodeId) -> etymon::Result<Vec<Entry>> {
        Ok(self.resolve(self.parents.get(&Self::index(id))))
    }
}

fn graph_strategy() -> impl Strategy<Value = RandomGraph> {
    (1usize..24).prop_flat_map(|nodes| {
        prop::collection::vec((0..nodes, 0..nodes), 0..64)
            .prop_map(move |edges| RandomGraph::new(nodes, &edges))
    })
}

proptest! {
    /// Property: descendant output never repeats a node.
    #[test]
    fn prop_descendants_unique(graph in graph_strategy(), start in 0usize..24, depth in 0usize..12) {
        let start = start % graph.nodes;
        let chain = descendant_chain(&graph, RandomGraph::entry(start), depth).unwrap();

        let unique: HashSet<_> = chain.iter().map(|e| e.node_id.clone()).collect();
        prop_assert_eq!(unique.len(), chain.len());
        let first = RandomGraph::entry(start);
        prop_assert_eq!(chain[0].node_id.as_str(), first.node_id.as_str());
    }

    /// Property: every descendant lies within `max_depth` edges of the start.
    #[test]
    fn prop_descendants_within_depth(graph in graph_strategy(), start in 0usize..24, depth in 0usize..12) {
        let start = start % graph.nodes;
        let chain = descendant_chain(&graph, RandomGraph::entry(start), depth).unwrap();
        let distances = graph.distances(start);

        for entry in &chain {
            let d = distances[&RandomGraph::index(&entry.node_id)];
            prop_assert!(d <= depth, "{} at distance {d} exceeds {depth}", entry.node_id);
        }
    }

    /// Property: with no ceiling in reach, everything reachable is emitted.
    #[test]
    fn prop_descendants_cover_reachable(graph in graph_strategy(), start in 0usize..24) {
        let start = start % graph.nodes;
        let chain = descendant_chain(&graph, RandomGraph::entry(start), 64).unwrap();
        prop_assert_eq!(chain.len(), graph.distances(start).len());
    }

    /// Property: the ancestor chain is a unique first-parent path of bounded length.
    #[test]
    fn prop_ancestors_follow_first_parent(graph in graph_strategy(), start in 0usize..24, depth in 0usize..12) {
        let start = start % graph.nodes;
        let chain = ancestor_chain(&graph, RandomGraph::entry(start), depth).unwrap();

        prop_assert!(chain.len() <= depth + 1);
        let unique: HashSet<_> = chain.iter().map(|e| e.node_id.clone()).collect();
        prop_assert_eq!(unique.len(), chain.len());

        for pair in chain.windows(2) {
            let child = RandomGraph::index(&pair[0].node_id);
            let first_parent = graph.parents[&child][0];
            prop_assert_eq!(RandomGraph::index(&pair[1].node_id), first_parent);
        }
    }

    /// Property: `NodeId::parts` recovers its components.
    #[test]
    fn prop_node_id_parts(
        lang in "[a-z]{2,3}(-[a-z]{2,3})?",
        word in "[a-zA-Z :'-]{1,20}",
        pos in "[a-z]{1,8}",
        ety in 0i64..10,
    ) {
        let id = NodeId::new(format!("{lang}:{word}:{pos}:{ety}"));
        let parts = id.parts().unwrap();
        prop_assert_eq!(parts.lang_code, lang.as_str());
        prop_assert_eq!(parts.word, word.as_str());
        prop_assert_eq!(parts.pos, Some(pos.as_str()));
        prop_assert_eq!(parts.etymology_number, ety);
    }
}
