//! Candidate Graph
//!
//! Undirected token graph over a pool set: one node per token, one edge per
//! pool. Lets callers check that the inquiry tokens are actually connected
//! through the base-token graph before handing it to route search.

use alloy_primitives::Address;
use petgraph::algo::has_path_connecting;
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::{info, warn};

use super::static_pools::SyntheticPoolRecord;

/// The candidate pool graph
pub struct CandidateGraph {
    pub graph: UnGraph<Address, Address>,
    pub token_to_node: HashMap<Address, NodeIndex>,
}

impl CandidateGraph {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            token_to_node: HashMap::new(),
        }
    }

    pub fn from_records(records: &[SyntheticPoolRecord]) -> Self {
        let mut graph = Self::new();
        let mut skipped = 0;

        for record in records {
            if !graph.add_record(record) {
                skipped += 1;
            }
        }

        info!(
            "Candidate graph built: {} Nodes, {} Edges",
            graph.node_count(),
            graph.edge_count()
        );

        if skipped > 0 {
            warn!("  Skipped {} records with unparseable ids", skipped);
        }

        graph
    }

    /// Add one pool. Returns false if any of its ids is not an address.
    pub fn add_record(&mut self, record: &SyntheticPoolRecord) -> bool {
        let (Ok(pool), Ok(token0), Ok(token1)) = (
            Address::from_str(&record.id),
            Address::from_str(&record.token0.id),
            Address::from_str(&record.token1.id),
        ) else {
            return false;
        };

        let node0 = self.get_or_create_node(token0);
        let node1 = self.get_or_create_node(token1);
        self.graph.add_edge(node0, node1, pool);
        true
    }

    fn get_or_create_node(&mut self, token: Address) -> NodeIndex {
        if let Some(&node) = self.token_to_node.get(&token) {
            return node;
        }

        let node = self.graph.add_node(token);
        self.token_to_node.insert(token, node);
        node
    }

    pub fn get_node(&self, token: Address) -> Option<NodeIndex> {
        self.token_to_node.get(&token).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Is there a pool directly between `a` and `b`?
    pub fn has_pool(&self, a: Address, b: Address) -> bool {
        match (self.get_node(a), self.get_node(b)) {
            (Some(na), Some(nb)) => self.graph.find_edge(na, nb).is_some(),
            _ => false,
        }
    }

    /// Can `b` be reached from `a` through any number of pools?
    pub fn is_reachable(&self, a: Address, b: Address) -> bool {
        match (self.get_node(a), self.get_node(b)) {
            (Some(na), Some(nb)) => has_path_connecting(&self.graph, na, nb, None),
            _ => false,
        }
    }

    /// Tokens sharing a pool with `token`
    pub fn neighbors(&self, token: Address) -> Vec<Address> {
        let Some(node) = self.get_node(token) else {
            return Vec::new();
        };

        let mut neighbors: Vec<Address> = self
            .graph
            .neighbors(node)
            .map(|n| self.graph[n])
            .collect();
        neighbors.sort();
        neighbors.dedup();
        neighbors
    }
}

impl Default for CandidateGraph {
    fn default() -> Self {
        Self::new()
    }
}
