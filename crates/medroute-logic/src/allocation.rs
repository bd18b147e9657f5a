//! Resource allocation policies.
//!
//! Two independent operations over the live department table:
//! - [`equalize`] spreads total beds and equipment evenly (truncated average)
//! - [`transfer_along_path`] moves half of one department's beds and
//!   equipment to another, provided the destination is reachable from the
//!   central department

use serde::{Deserialize, Serialize};

use crate::department::Department;
use crate::error::HospitalError;
use crate::pathfinding::DistanceVector;

/// Outcome of an equal redistribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EqualizeReport {
    /// Beds across all departments before redistribution.
    pub total_beds: u64,
    /// Equipment across all departments before redistribution.
    pub total_equipment: u64,
    /// Beds now held by every department.
    pub beds_each: u32,
    /// Equipment now held by every department.
    pub equipment_each: u32,
}

impl EqualizeReport {
    /// Beds lost to integer truncation.
    pub fn beds_remainder(&self, departments: usize) -> u64 {
        self.total_beds - u64::from(self.beds_each) * departments as u64
    }

    /// Equipment lost to integer truncation.
    pub fn equipment_remainder(&self, departments: usize) -> u64 {
        self.total_equipment - u64::from(self.equipment_each) * departments as u64
    }
}

/// Outcome of a half transfer between two departments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReport {
    pub from: usize,
    pub to: usize,
    pub moved_beds: u32,
    pub moved_equipment: u32,
    /// Source department after the transfer.
    pub source: Department,
    /// Destination department after the transfer.
    pub destination: Department,
}

/// Give every department the truncated average of all beds and equipment.
///
/// Patient counts are untouched. Applying it twice gives the same state as
/// applying it once.
pub fn equalize(departments: &mut [Department]) -> Result<EqualizeReport, HospitalError> {
    if departments.is_empty() {
        return Err(HospitalError::NoDepartments);
    }
    let count = departments.len() as u64;
    let total_beds: u64 = departments.iter().map(|d| u64::from(d.beds)).sum();
    let total_equipment: u64 = departments.iter().map(|d| u64::from(d.equipment)).sum();

    // An average never exceeds the largest input, so it fits back in u32.
    let beds_each = u32::try_from(total_beds / count).unwrap_or(u32::MAX);
    let equipment_each = u32::try_from(total_equipment / count).unwrap_or(u32::MAX);

    for d in departments.iter_mut() {
        d.beds = beds_each;
        d.equipment = equipment_each;
    }

    Ok(EqualizeReport {
        total_beds,
        total_equipment,
        beds_each,
        equipment_each,
    })
}

/// Move half of `from`'s beds and equipment into `to`.
///
/// The transfer is allowed when `to` is reachable in `distances`, the vector
/// computed once from the central department. Whether `from` and `to` are
/// connected to each other is not checked. When `to` is unreachable nothing
/// changes and `NoPath` is returned.
///
/// The destination gains `from / 2` (floor) of each resource, then the
/// source is halved (floor) in place; an odd unit stays behind. A
/// destination count that would pass `u32::MAX` fails with
/// `CapacityOverflow` and leaves both departments untouched.
pub fn transfer_along_path(
    departments: &mut [Department],
    distances: &DistanceVector,
    from: usize,
    to: usize,
) -> Result<TransferReport, HospitalError> {
    let count = departments.len();
    for index in [from, to] {
        if index >= count {
            return Err(HospitalError::DepartmentOutOfRange { index, count });
        }
    }
    if !distances.is_reachable(to) {
        return Err(HospitalError::NoPath { from, to });
    }

    let moved_beds = departments[from].beds / 2;
    let moved_equipment = departments[from].equipment / 2;

    let overflow = || HospitalError::CapacityOverflow { department: to };
    let beds = departments[to]
        .beds
        .checked_add(moved_beds)
        .ok_or_else(overflow)?;
    let equipment = departments[to]
        .equipment
        .checked_add(moved_equipment)
        .ok_or_else(overflow)?;

    departments[to].beds = beds;
    departments[to].equipment = equipment;
    departments[from].beds /= 2;
    departments[from].equipment /= 2;

    Ok(TransferReport {
        from,
        to,
        moved_beds,
        moved_equipment,
        source: departments[from].clone(),
        destination: departments[to].clone(),
    })
}
