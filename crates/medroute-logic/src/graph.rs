//! Department distance graph.
//!
//! `DistanceGraph` is a dense N×N adjacency matrix over 0-based department
//! indices. A missing corridor is `None`, never a large numeric stand-in,
//! so no valid weight can be mistaken for "no edge".

use serde::{Deserialize, Serialize};

use crate::constants::MIN_EDGE_WEIGHT;
use crate::error::{try_vec, HospitalError};

/// An undirected corridor between two departments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corridor {
    pub a: usize,
    pub b: usize,
    pub distance: u32,
}

/// Symmetric adjacency matrix of corridor lengths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceGraph {
    size: usize,
    /// Row-major `size * size` entries.
    matrix: Vec<Option<u32>>,
}

impl DistanceGraph {
    /// Build an edgeless graph over `size` departments.
    pub fn new(size: usize) -> Result<Self, HospitalError> {
        let cells = size
            .checked_mul(size)
            .ok_or(HospitalError::OutOfMemory("adjacency matrix"))?;
        let matrix = try_vec(cells, None, "adjacency matrix")?;
        Ok(Self { size, matrix })
    }

    /// Number of departments (vertices).
    pub fn department_count(&self) -> usize {
        self.size
    }

    /// Connect `u` and `v` with a corridor of length `weight`, in both
    /// directions. Re-adding an existing corridor overwrites its length.
    pub fn add_edge(&mut self, u: usize, v: usize, weight: u32) -> Result<(), HospitalError> {
        self.check_index(u)?;
        self.check_index(v)?;
        if u == v {
            return Err(HospitalError::SelfLoop(u));
        }
        if weight < MIN_EDGE_WEIGHT {
            return Err(HospitalError::InvalidWeight { from: u, to: v });
        }
        self.matrix[u * self.size + v] = Some(weight);
        self.matrix[v * self.size + u] = Some(weight);
        Ok(())
    }

    /// Direct corridor length between `u` and `v`, if any.
    pub fn weight(&self, u: usize, v: usize) -> Option<u32> {
        if u >= self.size || v >= self.size {
            return None;
        }
        self.matrix[u * self.size + v]
    }

    /// Departments directly connected to `u`, with corridor lengths, in
    /// index order.
    pub fn neighbors(&self, u: usize) -> impl Iterator<Item = (usize, u32)> + '_ {
        let row: &[Option<u32>] = if u < self.size {
            &self.matrix[u * self.size..(u + 1) * self.size]
        } else {
            &[]
        };
        row.iter()
            .enumerate()
            .filter_map(|(v, w)| w.map(|w| (v, w)))
    }

    /// Every corridor once, with `a < b`, in row-major order.
    pub fn edges(&self) -> Vec<Corridor> {
        let mut edges = Vec::new();
        for a in 0..self.size {
            for (b, distance) in self.neighbors(a) {
                if a < b {
                    edges.push(Corridor { a, b, distance });
                }
            }
        }
        edges
    }

    /// Number of distinct corridors.
    pub fn edge_count(&self) -> usize {
        self.matrix.iter().filter(|w| w.is_some()).count() / 2
    }

    pub fn check_index(&self, index: usize) -> Result<(), HospitalError> {
        if index < self.size {
            Ok(())
        } else {
            Err(HospitalError::DepartmentOutOfRange {
                index,
                count: self.size,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> DistanceGraph {
        let mut g = DistanceGraph::new(3).unwrap();
        g.add_edge(0, 1, 4).unwrap();
        g.add_edge(1, 2, 6).unwrap();
        g.add_edge(2, 0, 9).unwrap();
        g
    }

    #[test]
    fn test_new_graph_has_no_edges() {
        let g = DistanceGraph::new(4).unwrap();
        assert_eq!(g.department_count(), 4);
        assert_eq!(g.edge_count(), 0);
        for u in 0..4 {
            for v in 0..4 {
                assert_eq!(g.weight(u, v), None);
            }
        }
    }

    #[test]
    fn test_edges_are_symmetric() {
        let g = triangle();
        for (u, v, w) in [(0, 1, 4), (1, 2, 6), (0, 2, 9)] {
            assert_eq!(g.weight(u, v), Some(w));
            assert_eq!(g.weight(v, u), Some(w));
        }
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn test_diagonal_never_set() {
        let g = triangle();
        for u in 0..3 {
            assert_eq!(g.weight(u, u), None);
        }
    }

    #[test]
    fn test_readd_overwrites() {
        let mut g = triangle();
        g.add_edge(1, 0, 2).unwrap();
        assert_eq!(g.weight(0, 1), Some(2));
        assert_eq!(g.weight(1, 0), Some(2));
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn test_rejects_self_loop() {
        let mut g = DistanceGraph::new(2).unwrap();
        assert!(matches!(g.add_edge(1, 1, 3), Err(HospitalError::SelfLoop(1))));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_rejects_zero_weight() {
        let mut g = DistanceGraph::new(2).unwrap();
        assert!(matches!(
            g.add_edge(0, 1, 0),
            Err(HospitalError::InvalidWeight { from: 0, to: 1 })
        ));
    }

    #[test]
    fn test_rejects_out_of_range() {
        let mut g = DistanceGraph::new(2).unwrap();
        assert!(matches!(
            g.add_edge(0, 2, 1),
            Err(HospitalError::DepartmentOutOfRange { index: 2, count: 2 })
        ));
        assert_eq!(g.weight(0, 7), None);
    }

    #[test]
    fn test_neighbors_in_index_order() {
        let g = triangle();
        let n: Vec<_> = g.neighbors(2).collect();
        assert_eq!(n, vec![(0, 9), (1, 6)]);
        assert_eq!(g.neighbors(42).count(), 0);
    }

    #[test]
    fn test_edges_listed_once() {
        let g = triangle();
        let edges = g.edges();
        assert_eq!(
            edges,
            vec![
                Corridor { a: 0, b: 1, distance: 4 },
                Corridor { a: 0, b: 2, distance: 9 },
                Corridor { a: 1, b: 2, distance: 6 },
            ]
        );
    }
}
