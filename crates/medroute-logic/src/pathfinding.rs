//! Single-source shortest paths over the department graph.
//!
//! `shortest_distances` is the classic O(N²) array form of Dijkstra's
//! algorithm: no heap, one linear scan per settled vertex. Ties settle the
//! lowest index first.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{try_vec, HospitalError};
use crate::graph::DistanceGraph;

/// Shortest travel distance to a department.
///
/// `Unreachable` orders after every finite distance, so `min` and `<` work
/// directly on this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Distance {
    Finite(u64),
    Unreachable,
}

impl Distance {
    pub fn is_reachable(self) -> bool {
        matches!(self, Self::Finite(_))
    }

    pub fn finite(self) -> Option<u64> {
        match self {
            Self::Finite(d) => Some(d),
            Self::Unreachable => None,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(d) => write!(f, "{}", d),
            Self::Unreachable => write!(f, "unreachable"),
        }
    }
}

/// Distances from one fixed source to every department, plus the
/// predecessor of each department on one shortest route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceVector {
    source: usize,
    distances: Vec<Distance>,
    previous: Vec<Option<usize>>,
}

impl DistanceVector {
    /// Department the distances are measured from.
    pub fn source(&self) -> usize {
        self.source
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Distance to `department`; `Unreachable` for indices out of range.
    pub fn get(&self, department: usize) -> Distance {
        self.distances
            .get(department)
            .copied()
            .unwrap_or(Distance::Unreachable)
    }

    pub fn is_reachable(&self, department: usize) -> bool {
        self.get(department).is_reachable()
    }

    pub fn as_slice(&self) -> &[Distance] {
        &self.distances
    }

    /// Departments visited on a shortest route from the source to `target`,
    /// both ends included. `None` if `target` is unreachable.
    pub fn route_to(&self, target: usize) -> Option<Vec<usize>> {
        if !self.is_reachable(target) {
            return None;
        }
        let mut route = vec![target];
        let mut current = target;
        while let Some(prev) = self.previous[current] {
            route.push(prev);
            current = prev;
        }
        route.reverse();
        Some(route)
    }
}

/// Compute the shortest distance from `source` to every department.
///
/// Each of the N−1 rounds settles the unvisited department with the smallest
/// tentative distance (lowest index on ties) and relaxes its direct
/// corridors. Departments with no route keep `Distance::Unreachable`.
/// Path sums are 64-bit, so 32-bit corridor lengths cannot overflow.
pub fn shortest_distances(
    graph: &DistanceGraph,
    source: usize,
) -> Result<DistanceVector, HospitalError> {
    graph.check_index(source)?;
    let n = graph.department_count();

    let mut distances = try_vec(n, Distance::Unreachable, "distance array")?;
    let mut previous = try_vec(n, None, "distance array")?;
    let mut visited = try_vec(n, false, "visited array")?;
    distances[source] = Distance::Finite(0);

    for _ in 0..n.saturating_sub(1) {
        let mut current: Option<usize> = None;
        for v in 0..n {
            if visited[v] {
                continue;
            }
            if current.map_or(true, |c| distances[v] < distances[c]) {
                current = Some(v);
            }
        }
        let Some(current) = current else { break };
        visited[current] = true;

        // Closest remaining vertex has no route: neither does anything else.
        let Distance::Finite(base) = distances[current] else {
            break;
        };

        for (next, weight) in graph.neighbors(current) {
            if visited[next] {
                continue;
            }
            let candidate = Distance::Finite(base + u64::from(weight));
            if candidate < distances[next] {
                distances[next] = candidate;
                previous[next] = Some(current);
            }
        }
    }

    log::debug!(
        "shortest distances from department {}: {:?}",
        source + 1,
        distances
    );

    Ok(DistanceVector {
        source,
        distances,
        previous,
    })
}
