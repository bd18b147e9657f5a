//! Failure kinds surfaced by the session and its building blocks.
//!
//! Department indices carried by these errors are 0-based; the `Display`
//! output shows them 1-based, the way the operator typed them.

use thiserror::Error;

use crate::scenario::ScenarioError;

/// Every way a hospital operation can fail.
#[derive(Debug, Error)]
pub enum HospitalError {
    /// Storage for a core table could not be reserved.
    #[error("failed to allocate memory for {0}")]
    OutOfMemory(&'static str),

    /// Department count outside `MIN_DEPARTMENTS..=MAX_DEPARTMENTS`.
    #[error("department count {0} is out of range")]
    InvalidDepartmentCount(usize),

    #[error("department {} does not exist (valid: 1..={count})", .index + 1)]
    DepartmentOutOfRange { index: usize, count: usize },

    #[error("department {} cannot be connected to itself", .0 + 1)]
    SelfLoop(usize),

    #[error("distance between departments {} and {} must be positive", .from + 1, .to + 1)]
    InvalidWeight { from: usize, to: usize },

    #[error("{count} edges exceed the maximum of {max}")]
    TooManyEdges { count: usize, max: usize },

    /// Transfer would push a destination count past `u32::MAX`.
    #[error("department {} cannot hold the transferred resources", .department + 1)]
    CapacityOverflow { department: usize },

    #[error("no departments to allocate across")]
    NoDepartments,

    /// Transfer target is unreachable from the central department.
    #[error("no path found from department {} to department {}", .from + 1, .to + 1)]
    NoPath { from: usize, to: usize },

    #[error("no suitable department found for patient {0}")]
    NoEligibleDepartment(String),

    #[error("patient {0} not found")]
    PatientNotFound(String),

    #[error("patient roster is full ({0} patients)")]
    RosterFull(usize),

    #[error("invalid patient name {0:?}")]
    InvalidPatientName(String),

    #[error("invalid scenario: {}", format_scenario_errors(.0))]
    InvalidScenario(Vec<ScenarioError>),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl HospitalError {
    /// Recoverable outcomes the operator is simply told about. State is
    /// unchanged when one of these is returned.
    pub fn is_domain_failure(&self) -> bool {
        matches!(
            self,
            Self::NoPath { .. }
                | Self::CapacityOverflow { .. }
                | Self::NoEligibleDepartment(_)
                | Self::PatientNotFound(_)
                | Self::RosterFull(_)
                | Self::InvalidPatientName(_)
        )
    }

    /// Errors after which the process should not continue.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::OutOfMemory(_))
    }
}

/// `vec![value; len]` that reports allocation failure instead of aborting.
pub(crate) fn try_vec<T: Clone>(
    len: usize,
    value: T,
    what: &'static str,
) -> Result<Vec<T>, HospitalError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| HospitalError::OutOfMemory(what))?;
    v.resize(len, value);
    Ok(v)
}

fn format_scenario_errors(errors: &[ScenarioError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_one_based() {
        let err = HospitalError::DepartmentOutOfRange { index: 3, count: 3 };
        assert_eq!(err.to_string(), "department 4 does not exist (valid: 1..=3)");

        let err = HospitalError::NoPath { from: 0, to: 2 };
        assert_eq!(
            err.to_string(),
            "no path found from department 1 to department 3"
        );
    }

    #[test]
    fn test_classification() {
        assert!(HospitalError::PatientNotFound("Bob".into()).is_domain_failure());
        assert!(HospitalError::NoPath { from: 0, to: 1 }.is_domain_failure());
        assert!(!HospitalError::SelfLoop(0).is_domain_failure());
        assert!(HospitalError::CapacityOverflow { department: 0 }.is_domain_failure());
        assert_eq!(
            HospitalError::CapacityOverflow { department: 0 }.to_string(),
            "department 1 cannot hold the transferred resources"
        );
        assert!(HospitalError::OutOfMemory("departments").is_fatal());
        assert!(!HospitalError::RosterFull(10).is_fatal());
    }
}
