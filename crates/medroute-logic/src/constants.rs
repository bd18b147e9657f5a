//! Hard limits shared by the session, the scenario validator and the console.

/// Largest department count accepted at setup. Keeps the O(N²) matrix and
/// shortest-path scan small.
pub const MAX_DEPARTMENTS: usize = 100;

/// Smallest department count accepted at setup.
pub const MIN_DEPARTMENTS: usize = 1;

/// Longest patient name, in characters.
pub const MAX_PATIENT_NAME_LEN: usize = 49;

/// Smallest permitted edge weight. Zero-length corridors are rejected.
pub const MIN_EDGE_WEIGHT: u32 = 1;

/// Maximum number of undirected edges between `departments` vertices
/// without self-loops.
pub fn max_edges(departments: usize) -> usize {
    departments * departments.saturating_sub(1) / 2
}
