//! Nearest-department selection for incoming patients.

use crate::department::Department;
use crate::pathfinding::{Distance, DistanceVector};

/// Pick the department closest to the centre that still has a free bed and
/// a free piece of equipment.
///
/// Departments are scanned in index order and only a strictly smaller
/// distance replaces the current best, so the first of several equally
/// close departments wins. Unreachable departments are never chosen.
/// Returns `None` when no department qualifies. Nothing is mutated; the
/// caller records the admission.
pub fn select_nearest(distances: &DistanceVector, departments: &[Department]) -> Option<usize> {
    let mut best: Option<(usize, Distance)> = None;
    for (index, department) in departments.iter().enumerate() {
        if !department.has_capacity() {
            continue;
        }
        let distance = distances.get(index);
        if !distance.is_reachable() {
            continue;
        }
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((index, distance));
        }
    }
    best.map(|(index, _)| index)
}
