//! Initial hospital setup as data.
//!
//! A `Scenario` carries exactly what the console asks for before the menu
//! starts: departments with their beds and equipment, the corridors between
//! them, and the central department. Department numbers are 1-based, as the
//! operator types them. Scenarios deserialize from JSON:
//!
//! ```
//! use medroute_logic::scenario::{validate_scenario, Scenario};
//!
//! let scenario = Scenario::from_json(
//!     r#"{
//!         "name": "Two wards",
//!         "departments": [
//!             {"name": "ER", "beds": 4, "equipment": 2},
//!             {"beds": 6, "equipment": 3}
//!         ],
//!         "edges": [{"from": 1, "to": 2, "distance": 12}],
//!         "central": 1
//!     }"#,
//! )
//! .unwrap();
//! assert!(validate_scenario(&scenario).is_empty());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{max_edges, MAX_DEPARTMENTS, MIN_DEPARTMENTS, MIN_EDGE_WEIGHT};
use crate::department::Department;
use crate::error::HospitalError;
use crate::graph::Corridor;

/// One department as listed in a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub beds: u32,
    pub equipment: u32,
}

/// One corridor as listed in a scenario (1-based endpoints).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: usize,
    pub to: usize,
    pub distance: u32,
}

/// Complete initial setup for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub departments: Vec<DepartmentSpec>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
    /// Central department, 1-based.
    pub central: usize,
    /// Optional ceiling on concurrently admitted patients.
    #[serde(default)]
    pub max_patients: Option<usize>,
}

/// A problem found in a scenario. Edge positions are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioError {
    #[error("department count {0} is outside {min}..={max}", min = MIN_DEPARTMENTS, max = MAX_DEPARTMENTS)]
    DepartmentCount(usize),
    #[error("{count} edges exceed the maximum of {max}")]
    TooManyEdges { count: usize, max: usize },
    #[error("edge {edge} names department {department}, which does not exist")]
    EdgeEndpoint { edge: usize, department: usize },
    #[error("edge {edge} connects department {department} to itself")]
    SelfLoop { edge: usize, department: usize },
    #[error("edge {edge} has a distance below {min}", min = MIN_EDGE_WEIGHT)]
    ZeroDistance { edge: usize },
    #[error("central department {0} does not exist")]
    CentralOutOfRange(usize),
    #[error("patient limit must be at least 1")]
    ZeroPatientLimit,
}

/// Validated setup in 0-based form, ready for `Session::new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSetup {
    pub departments: Vec<Department>,
    pub edges: Vec<Corridor>,
    pub central: usize,
    pub max_patients: Option<usize>,
}

impl Scenario {
    /// Parse a scenario from JSON text. Structure only; see
    /// [`validate_scenario`] for the value checks.
    pub fn from_json(json: &str) -> Result<Self, HospitalError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, HospitalError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate and convert to 0-based indices.
    pub fn to_setup(&self) -> Result<SessionSetup, HospitalError> {
        let errors = validate_scenario(self);
        if !errors.is_empty() {
            return Err(HospitalError::InvalidScenario(errors));
        }
        let departments = self
            .departments
            .iter()
            .map(|d| Department {
                name: d.name.clone(),
                ..Department::new(d.beds, d.equipment)
            })
            .collect();
        let edges = self
            .edges
            .iter()
            .map(|e| Corridor {
                a: e.from - 1,
                b: e.to - 1,
                distance: e.distance,
            })
            .collect();
        Ok(SessionSetup {
            departments,
            edges,
            central: self.central - 1,
            max_patients: self.max_patients,
        })
    }
}

/// Check a scenario, returning every problem found.
pub fn validate_scenario(scenario: &Scenario) -> Vec<ScenarioError> {
    let mut errors = Vec::new();
    let count = scenario.departments.len();

    if !(MIN_DEPARTMENTS..=MAX_DEPARTMENTS).contains(&count) {
        errors.push(ScenarioError::DepartmentCount(count));
    }

    let max = max_edges(count);
    if scenario.edges.len() > max {
        errors.push(ScenarioError::TooManyEdges {
            count: scenario.edges.len(),
            max,
        });
    }

    for (i, edge) in scenario.edges.iter().enumerate() {
        let position = i + 1;
        let mut endpoints_ok = true;
        for department in [edge.from, edge.to] {
            if department == 0 || department > count {
                errors.push(ScenarioError::EdgeEndpoint {
                    edge: position,
                    department,
                });
                endpoints_ok = false;
            }
        }
        if endpoints_ok && edge.from == edge.to {
            errors.push(ScenarioError::SelfLoop {
                edge: position,
                department: edge.from,
            });
        }
        if edge.distance < MIN_EDGE_WEIGHT {
            errors.push(ScenarioError::ZeroDistance { edge: position });
        }
    }

    if scenario.central == 0 || scenario.central > count {
        errors.push(ScenarioError::CentralOutOfRange(scenario.central));
    }

    if scenario.max_patients == Some(0) {
        errors.push(ScenarioError::ZeroPatientLimit);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_wards() -> Scenario {
        Scenario {
            name: Some("Three wards".into()),
            departments: vec![
                DepartmentSpec {
                    name: None,
                    beds: 10,
                    equipment: 5,
                };
                3
            ],
            edges: vec![
                EdgeSpec {
                    from: 1,
                    to: 2,
                    distance: 5,
                },
                EdgeSpec {
                    from: 2,
                    to: 3,
                    distance: 5,
                },
            ],
            central: 1,
            max_patients: None,
        }
    }

    #[test]
    fn test_valid_scenario() {
        assert!(validate_scenario(&three_wards()).is_empty());
    }

    #[test]
    fn test_to_setup_is_zero_based() {
        let setup = three_wards().to_setup().unwrap();
        assert_eq!(setup.central, 0);
        assert_eq!(
            setup.edges[1],
            Corridor {
                a: 1,
                b: 2,
                distance: 5
            }
        );
        assert_eq!(setup.departments[2], Department::new(10, 5));
    }

    #[test]
    fn test_collects_every_error() {
        let mut s = three_wards();
        s.central = 4;
        s.max_patients = Some(0);
        s.edges.push(EdgeSpec {
            from: 3,
            to: 3,
            distance: 0,
        });
        s.edges.push(EdgeSpec {
            from: 0,
            to: 9,
            distance: 1,
        });
        let errors = validate_scenario(&s);
        assert!(errors.contains(&ScenarioError::TooManyEdges { count: 4, max: 3 }));
        assert!(errors.contains(&ScenarioError::SelfLoop {
            edge: 3,
            department: 3
        }));
        assert!(errors.contains(&ScenarioError::ZeroDistance { edge: 3 }));
        assert!(errors.contains(&ScenarioError::EdgeEndpoint {
            edge: 4,
            department: 0
        }));
        assert!(errors.contains(&ScenarioError::EdgeEndpoint {
            edge: 4,
            department: 9
        }));
        assert!(errors.contains(&ScenarioError::CentralOutOfRange(4)));
        assert!(errors.contains(&ScenarioError::ZeroPatientLimit));
    }

    #[test]
    fn test_empty_hospital_rejected() {
        let s = Scenario {
            name: None,
            departments: vec![],
            edges: vec![],
            central: 1,
            max_patients: None,
        };
        let errors = validate_scenario(&s);
        assert!(errors.contains(&ScenarioError::DepartmentCount(0)));
        assert!(matches!(
            s.to_setup(),
            Err(HospitalError::InvalidScenario(_))
        ));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ScenarioError::DepartmentCount(0).to_string(),
            "department count 0 is outside 1..=100"
        );
        assert_eq!(
            ScenarioError::ZeroDistance { edge: 2 }.to_string(),
            "edge 2 has a distance below 1"
        );
        assert_eq!(
            ScenarioError::SelfLoop {
                edge: 3,
                department: 3
            }
            .to_string(),
            "edge 3 connects department 3 to itself"
        );
    }

    #[test]
    fn test_json_defaults() {
        let s = Scenario::from_json(
            r#"{"departments": [{"beds": 1, "equipment": 1}], "central": 1}"#,
        )
        .unwrap();
        assert!(s.edges.is_empty());
        assert_eq!(s.max_patients, None);
        assert!(validate_scenario(&s).is_empty());
    }

    #[test]
    fn test_json_rejects_negative_counts() {
        let err = Scenario::from_json(
            r#"{"departments": [{"beds": -1, "equipment": 1}], "central": 1}"#,
        )
        .unwrap_err();
        assert!(matches!(err, HospitalError::Json(_)));
    }

    #[test]
    fn test_json_roundtrip_preserves_names() {
        let mut s = three_wards();
        s.departments[0].name = Some("ER".into());
        let back = Scenario::from_json(&s.to_json_pretty().unwrap()).unwrap();
        assert_eq!(back, s);
    }
}
