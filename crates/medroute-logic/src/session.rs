//! Session context and the menu command API.
//!
//! A `Session` owns everything one operator works with: the distance graph,
//! the department table, the patient roster and the distance vector computed
//! once from the central department at setup. Each menu action is a method
//! taking `&mut self`, so one decision is fully applied before the next can
//! start. [`Session::execute`] dispatches a [`Command`] for front ends that
//! work with menu numbers.

use serde::{Deserialize, Serialize};

use crate::allocation::{self, EqualizeReport, TransferReport};
use crate::constants::{max_edges, MAX_DEPARTMENTS, MIN_DEPARTMENTS};
use crate::department::Department;
use crate::error::HospitalError;
use crate::graph::DistanceGraph;
use crate::nearest::select_nearest;
use crate::pathfinding::{shortest_distances, Distance, DistanceVector};
use crate::roster::{normalize_name, Patient, Roster};
use crate::scenario::{Scenario, SessionSetup};
use crate::spanning::{minimum_spanning_tree, SpanningTree};

/// A patient placed by [`Session::admit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admission {
    pub name: String,
    /// 0-based department index.
    pub department: usize,
    /// Distance of that department from the centre.
    pub distance: Distance,
    /// Department after the bed and equipment were taken.
    pub resources: Department,
}

/// A patient removed by [`Session::discharge`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discharge {
    pub patient: Patient,
    /// Department after the bed and equipment were returned.
    pub resources: Department,
}

/// Hospital-wide totals shown next to the department table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HospitalTotals {
    pub beds: u64,
    pub equipment: u64,
    pub patients: u64,
}

/// One menu action with its parameters (0-based indices).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Equalize,
    Transfer { from: usize, to: usize },
    Admit { name: String },
    ListPatients,
    Discharge { name: String },
    ShowDepartments,
    Exit,
    SpanningTree,
}

/// Result of a successfully executed [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Equalized(EqualizeReport),
    Transferred(TransferReport),
    Admitted(Admission),
    Patients(Vec<Patient>),
    Discharged(Discharge),
    Departments {
        departments: Vec<Department>,
        totals: HospitalTotals,
    },
    Exit,
    SpanningTree(SpanningTree),
}

/// All mutable state of one hospital simulation.
#[derive(Debug, Clone)]
pub struct Session {
    graph: DistanceGraph,
    departments: Vec<Department>,
    roster: Roster,
    distances: DistanceVector,
}

impl Session {
    /// Build the graph, place the departments and compute distances from
    /// the central department.
    pub fn new(setup: SessionSetup) -> Result<Self, HospitalError> {
        let count = setup.departments.len();
        if !(MIN_DEPARTMENTS..=MAX_DEPARTMENTS).contains(&count) {
            return Err(HospitalError::InvalidDepartmentCount(count));
        }
        let max = max_edges(count);
        if setup.edges.len() > max {
            return Err(HospitalError::TooManyEdges {
                count: setup.edges.len(),
                max,
            });
        }

        let mut graph = DistanceGraph::new(count)?;
        for corridor in &setup.edges {
            graph.add_edge(corridor.a, corridor.b, corridor.distance)?;
        }
        let distances = shortest_distances(&graph, setup.central)?;

        log::info!(
            "Session started: {} departments, {} corridors, central department {}",
            count,
            graph.edge_count(),
            setup.central + 1
        );

        Ok(Self {
            graph,
            departments: setup.departments,
            roster: Roster::with_limit(setup.max_patients),
            distances,
        })
    }

    /// Validate a scenario and start a session from it.
    pub fn from_scenario(scenario: &Scenario) -> Result<Self, HospitalError> {
        Self::new(scenario.to_setup()?)
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn patients(&self) -> &[Patient] {
        self.roster.as_slice()
    }

    pub fn distances(&self) -> &DistanceVector {
        &self.distances
    }

    /// Central department (0-based).
    pub fn central(&self) -> usize {
        self.distances.source()
    }

    /// Shortest route from the central department to `department`.
    pub fn route_to(&self, department: usize) -> Option<Vec<usize>> {
        self.distances.route_to(department)
    }

    pub fn totals(&self) -> HospitalTotals {
        self.departments
            .iter()
            .fold(HospitalTotals::default(), |t, d| HospitalTotals {
                beds: t.beds + u64::from(d.beds),
                equipment: t.equipment + u64::from(d.equipment),
                patients: t.patients + u64::from(d.patients),
            })
    }

    /// Menu 1: spread beds and equipment evenly.
    pub fn equalize(&mut self) -> Result<EqualizeReport, HospitalError> {
        let report = allocation::equalize(&mut self.departments)?;
        log::info!(
            "Equalized {} beds and {} equipment: {} beds, {} equipment each",
            report.total_beds,
            report.total_equipment,
            report.beds_each,
            report.equipment_each
        );
        Ok(report)
    }

    /// Menu 2: move half of `from`'s resources into `to`.
    pub fn transfer(&mut self, from: usize, to: usize) -> Result<TransferReport, HospitalError> {
        let result =
            allocation::transfer_along_path(&mut self.departments, &self.distances, from, to);
        match &result {
            Ok(report) => log::info!(
                "Transferred {} beds and {} equipment from department {} to department {}",
                report.moved_beds,
                report.moved_equipment,
                from + 1,
                to + 1
            ),
            Err(e) => log::warn!("Transfer refused: {}", e),
        }
        result
    }

    /// Menu 3: place a new patient in the nearest department with a free bed
    /// and free equipment.
    pub fn admit(&mut self, name: &str) -> Result<Admission, HospitalError> {
        let result = self.try_admit(name);
        if let Err(e) = &result {
            log::warn!("Admission refused: {}", e);
        }
        result
    }

    fn try_admit(&mut self, name: &str) -> Result<Admission, HospitalError> {
        let name = normalize_name(name)?;
        self.roster.ensure_room()?;
        let department = select_nearest(&self.distances, &self.departments)
            .ok_or_else(|| HospitalError::NoEligibleDepartment(name.clone()))?;

        self.roster.push(Patient {
            name: name.clone(),
            department,
        })?;
        self.departments[department].occupy();

        log::info!("Admitted {} to department {}", name, department + 1);
        Ok(Admission {
            name,
            department,
            distance: self.distances.get(department),
            resources: self.departments[department].clone(),
        })
    }

    /// Menu 5: discharge the first patient with this name and give back
    /// their bed and equipment.
    pub fn discharge(&mut self, name: &str) -> Result<Discharge, HospitalError> {
        let name = name.trim();
        let Some(patient) = self.roster.remove_by_name(name) else {
            log::warn!("Discharge refused: patient {} not found", name);
            return Err(HospitalError::PatientNotFound(name.to_string()));
        };
        let department = &mut self.departments[patient.department];
        department.release();
        let resources = department.clone();

        log::info!(
            "Discharged {} from department {}",
            patient.name,
            patient.department + 1
        );
        Ok(Discharge { patient, resources })
    }

    /// Menu 8: minimum spanning tree of the corridor network.
    pub fn spanning_tree(&self) -> SpanningTree {
        minimum_spanning_tree(&self.graph, &self.departments)
    }

    /// Run one menu action.
    pub fn execute(&mut self, command: Command) -> Result<Outcome, HospitalError> {
        Ok(match command {
            Command::Equalize => Outcome::Equalized(self.equalize()?),
            Command::Transfer { from, to } => Outcome::Transferred(self.transfer(from, to)?),
            Command::Admit { name } => Outcome::Admitted(self.admit(&name)?),
            Command::ListPatients => Outcome::Patients(self.patients().to_vec()),
            Command::Discharge { name } => Outcome::Discharged(self.discharge(&name)?),
            Command::ShowDepartments => Outcome::Departments {
                departments: self.departments.clone(),
                totals: self.totals(),
            },
            Command::Exit => Outcome::Exit,
            Command::SpanningTree => Outcome::SpanningTree(self.spanning_tree()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Corridor;

    fn setup(counts: &[(u32, u32)], edges: &[(usize, usize, u32)], central: usize) -> SessionSetup {
        SessionSetup {
            departments: counts.iter().map(|&(b, e)| Department::new(b, e)).collect(),
            edges: edges
                .iter()
                .map(|&(a, b, distance)| Corridor { a, b, distance })
                .collect(),
            central,
            max_patients: None,
        }
    }

    fn three_wards() -> Session {
        Session::new(setup(&[(10, 5); 3], &[(0, 1, 5), (1, 2, 5)], 0)).unwrap()
    }

    #[test]
    fn test_distances_computed_at_setup() {
        let s = three_wards();
        let d: Vec<_> = s.distances().as_slice().iter().map(|d| d.finite()).collect();
        assert_eq!(d, vec![Some(0), Some(5), Some(10)]);
        assert_eq!(s.central(), 0);
        assert_eq!(s.route_to(2), Some(vec![0, 1, 2]));
    }

    #[test]
    fn test_admit_alice_then_discharge() {
        let mut s = three_wards();
        let a = s.admit("Alice").unwrap();
        assert_eq!(a.department, 0);
        assert_eq!(a.distance, Distance::Finite(0));
        assert_eq!(
            (a.resources.beds, a.resources.equipment, a.resources.patients),
            (9, 4, 1)
        );

        let d = s.discharge("Alice").unwrap();
        assert_eq!(d.patient.department, 0);
        assert_eq!(s.departments()[0], Department::new(10, 5));
        assert!(s.patients().is_empty());
    }

    #[test]
    fn test_admission_moves_outward_as_centre_fills() {
        let mut s = Session::new(setup(&[(1, 1), (1, 1), (1, 1)], &[(0, 1, 5), (1, 2, 5)], 0))
            .unwrap();
        assert_eq!(s.admit("A").unwrap().department, 0);
        assert_eq!(s.admit("B").unwrap().department, 1);
        assert_eq!(s.admit("C").unwrap().department, 2);
        let err = s.admit("D").unwrap_err();
        assert!(matches!(err, HospitalError::NoEligibleDepartment(ref n) if n == "D"));
        assert_eq!(s.patients().len(), 3);
        assert!(s.departments().iter().all(|d| d.beds == 0 && d.equipment == 0));
    }

    #[test]
    fn test_discharge_unknown_changes_nothing() {
        let mut s = three_wards();
        s.admit("Alice").unwrap();
        let departments = s.departments().to_vec();
        let patients = s.patients().to_vec();
        assert!(matches!(
            s.discharge("Bob"),
            Err(HospitalError::PatientNotFound(ref n)) if n == "Bob"
        ));
        assert_eq!(s.departments(), departments.as_slice());
        assert_eq!(s.patients(), patients.as_slice());
    }

    #[test]
    fn test_roster_limit() {
        let mut cfg = setup(&[(10, 10)], &[], 0);
        cfg.max_patients = Some(1);
        let mut s = Session::new(cfg).unwrap();
        s.admit("A").unwrap();
        let before = s.departments().to_vec();
        assert!(matches!(s.admit("B"), Err(HospitalError::RosterFull(1))));
        assert_eq!(s.departments(), before.as_slice());
    }

    #[test]
    fn test_invalid_name_changes_nothing() {
        let mut s = three_wards();
        assert!(matches!(
            s.admit("   "),
            Err(HospitalError::InvalidPatientName(_))
        ));
        assert_eq!(s.departments()[0], Department::new(10, 5));
    }

    #[test]
    fn test_transfer_through_session() {
        let mut s = three_wards();
        let r = s.transfer(0, 2).unwrap();
        assert_eq!((r.moved_beds, r.moved_equipment), (5, 2));
        assert_eq!(s.departments()[0], Department::new(5, 2));
        assert_eq!(s.departments()[2], Department::new(15, 7));
    }

    #[test]
    fn test_setup_rejects_bad_input() {
        assert!(matches!(
            Session::new(setup(&[], &[], 0)),
            Err(HospitalError::InvalidDepartmentCount(0))
        ));
        assert!(matches!(
            Session::new(setup(&[(1, 1); 2], &[(0, 1, 1), (1, 0, 2)], 0)),
            Err(HospitalError::TooManyEdges { count: 2, max: 1 })
        ));
        assert!(matches!(
            Session::new(setup(&[(1, 1); 2], &[(0, 0, 1)], 0)),
            Err(HospitalError::SelfLoop(0))
        ));
        assert!(matches!(
            Session::new(setup(&[(1, 1); 2], &[], 2)),
            Err(HospitalError::DepartmentOutOfRange { index: 2, count: 2 })
        ));
    }

    #[test]
    fn test_totals() {
        let mut s = three_wards();
        s.admit("A").unwrap();
        assert_eq!(
            s.totals(),
            HospitalTotals {
                beds: 29,
                equipment: 14,
                patients: 1
            }
        );
    }

    #[test]
    fn test_execute_dispatch() {
        let mut s = three_wards();
        let out = s
            .execute(Command::Admit {
                name: "Alice".into(),
            })
            .unwrap();
        assert!(matches!(out, Outcome::Admitted(ref a) if a.department == 0));

        match s.execute(Command::ListPatients).unwrap() {
            Outcome::Patients(p) => assert_eq!(p.len(), 1),
            other => panic!("unexpected outcome {:?}", other),
        }
        match s.execute(Command::ShowDepartments).unwrap() {
            Outcome::Departments { totals, .. } => assert_eq!(totals.patients, 1),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(s.execute(Command::Exit).unwrap(), Outcome::Exit);
        assert!(s
            .execute(Command::Discharge { name: "Zed".into() })
            .unwrap_err()
            .is_domain_failure());
    }
}
