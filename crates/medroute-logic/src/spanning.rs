//! Minimum spanning tree of the corridor network.
//!
//! Kruskal's algorithm over the department graph: corridors sorted by
//! length, joined with a union-find whenever they link two separate groups.
//! On a disconnected hospital the result is a spanning forest, one tree per
//! connected group of departments.

use serde::{Deserialize, Serialize};

use crate::department::Department;
use crate::graph::{Corridor, DistanceGraph};

/// Disjoint-set forest with path compression and union by rank.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Path compression
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merge the groups of `a` and `b`. Returns false if already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }
        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => self.parent[root_a] = root_b,
            std::cmp::Ordering::Greater => self.parent[root_b] = root_a,
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] = self.rank[root_a].saturating_add(1);
            }
        }
        true
    }
}

/// Minimum-length set of corridors connecting every reachable department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanningTree {
    /// Chosen corridors, shortest first.
    pub edges: Vec<Corridor>,
    /// Sum of the chosen corridor lengths.
    pub total_length: u64,
    /// Connected groups of departments, isolated departments included.
    pub components: usize,
    /// Beds held by departments touched by at least one chosen corridor.
    pub connected_beds: u64,
    /// Equipment held by departments touched by at least one chosen corridor.
    pub connected_equipment: u64,
}

impl SpanningTree {
    /// Whether a single tree reaches every department.
    pub fn is_connected(&self) -> bool {
        self.components <= 1
    }
}

/// Build the minimum spanning forest of `graph`.
///
/// Corridors of equal length are taken in (a, b) index order, so the result
/// is deterministic. `departments` supplies the resource totals and may be
/// shorter than the graph; missing departments count as empty.
pub fn minimum_spanning_tree(graph: &DistanceGraph, departments: &[Department]) -> SpanningTree {
    let n = graph.department_count();
    let mut corridors = graph.edges();
    corridors.sort_by_key(|c| (c.distance, c.a, c.b));

    let mut sets = UnionFind::new(n);
    let mut touched = vec![false; n];
    let mut edges = Vec::new();
    let mut total_length = 0u64;

    for corridor in corridors {
        if sets.union(corridor.a, corridor.b) {
            total_length += u64::from(corridor.distance);
            touched[corridor.a] = true;
            touched[corridor.b] = true;
            edges.push(corridor);
        }
    }

    let (connected_beds, connected_equipment) = departments
        .iter()
        .enumerate()
        .filter(|(i, _)| touched.get(*i).copied().unwrap_or(false))
        .fold((0u64, 0u64), |(b, e), (_, d)| {
            (b + u64::from(d.beds), e + u64::from(d.equipment))
        });

    SpanningTree {
        components: n - edges.len(),
        edges,
        total_length,
        connected_beds,
        connected_equipment,
    }
}
