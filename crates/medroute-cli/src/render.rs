//! Console text for session results. Departments are shown 1-based.

use std::fmt::Write as _;

use medroute_logic::allocation::{EqualizeReport, TransferReport};
use medroute_logic::department::Department;
use medroute_logic::pathfinding::DistanceVector;
use medroute_logic::roster::Patient;
use medroute_logic::session::{Admission, Discharge, HospitalTotals};
use medroute_logic::spanning::SpanningTree;
use medroute_logic::HospitalError;

pub const MENU: &str = "\nOptions:\n\
1. Allocate resources equally\n\
2. Allocate resources based on Dijkstra's shortest path\n\
3. Patient Entry\n\
4. Display Patient Allocations\n\
5. Depart a Patient\n\
6. Show current resources of each department and total resources and patients in each department\n\
7. Exit\n\
8. Show corridor spanning tree\n";

pub fn distances(distances: &DistanceVector) -> String {
    let mut out = format!(
        "Shortest distances from department {} to all other departments:\n",
        distances.source() + 1
    );
    for (i, d) in distances.as_slice().iter().enumerate() {
        let _ = writeln!(out, "Department {}: {}", i + 1, d);
    }
    out
}

pub fn equalized(report: &EqualizeReport, departments: &[Department]) -> String {
    let mut out = String::from("\nAdjusted resources based on equal allocation:\n");
    for (i, d) in departments.iter().enumerate() {
        let _ = writeln!(
            out,
            "{} - Beds: {}, Equipment: {}",
            d.label(i),
            d.beds,
            d.equipment
        );
    }
    let _ = writeln!(out, "\nTotal resources available across all departments:");
    let _ = writeln!(
        out,
        "Total Beds: {}, Total Equipment: {}",
        report.total_beds, report.total_equipment
    );
    let beds_left = report.beds_remainder(departments.len());
    let equipment_left = report.equipment_remainder(departments.len());
    if beds_left > 0 || equipment_left > 0 {
        let _ = writeln!(
            out,
            "Undistributed remainder - Beds: {}, Equipment: {}",
            beds_left, equipment_left
        );
    }
    out
}

pub fn transferred(report: &TransferReport) -> String {
    let mut out = format!(
        "Allocating resources from department {} to department {}\n",
        report.from + 1,
        report.to + 1
    );
    let _ = writeln!(out, "Updated resources:");
    for (index, d) in [
        (report.from, &report.source),
        (report.to, &report.destination),
    ] {
        let _ = writeln!(
            out,
            "{} - Beds: {}, Equipment: {}",
            d.label(index),
            d.beds,
            d.equipment
        );
    }
    out
}

pub fn admitted(admission: &Admission) -> String {
    format!(
        "Allocating patient {} to department {} (distance {})\n",
        admission.name,
        admission.department + 1,
        admission.distance
    )
}

pub fn patients(patients: &[Patient]) -> String {
    let mut out = String::from("\nPatient Allocations:\n");
    if patients.is_empty() {
        out.push_str("No patients admitted.\n");
    }
    for p in patients {
        let _ = writeln!(out, "Patient {} is in department {}", p.name, p.department + 1);
    }
    out
}

pub fn discharged(discharge: &Discharge) -> String {
    format!(
        "Patient {} has been departed and resources have been updated.\n",
        discharge.patient.name
    )
}

pub fn departments(departments: &[Department], totals: HospitalTotals) -> String {
    let mut out = String::from("\nDepartment Resources:\n");
    for (i, d) in departments.iter().enumerate() {
        let _ = writeln!(
            out,
            "{} - Beds: {}, Equipment: {}, Patients: {}",
            d.label(i),
            d.beds,
            d.equipment,
            d.patients
        );
    }
    let _ = writeln!(
        out,
        "Total - Beds: {}, Equipment: {}, Patients: {}",
        totals.beds, totals.equipment, totals.patients
    );
    out
}

pub fn spanning_tree(tree: &SpanningTree) -> String {
    let mut out = String::from("\nCorridor spanning tree:\n");
    for c in &tree.edges {
        let _ = writeln!(
            out,
            "Department {} <-> Department {} (Distance: {})",
            c.a + 1,
            c.b + 1,
            c.distance
        );
    }
    let _ = writeln!(out, "Total corridor length: {}", tree.total_length);
    if !tree.is_connected() {
        let _ = writeln!(
            out,
            "Hospital is split into {} disconnected groups",
            tree.components
        );
    }
    let _ = writeln!(
        out,
        "Total Beds Connected: {}\nTotal Equipment Connected: {}",
        tree.connected_beds, tree.connected_equipment
    );
    out
}

/// Informational message for a failed menu action.
pub fn failure(error: &HospitalError) -> String {
    match error {
        HospitalError::NoEligibleDepartment(name) => {
            format!("No suitable department found for patient {}\n", name)
        }
        HospitalError::PatientNotFound(name) => format!("Patient {} not found.\n", name),
        HospitalError::NoPath { from, to } => format!(
            "No direct path found from department {} to department {}\n",
            from + 1,
            to + 1
        ),
        other => format!("Error: {}\n", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medroute_logic::scenario::Scenario;
    use medroute_logic::session::Session;

    fn session() -> Session {
        let scenario = Scenario::from_json(
            r#"{
                "departments": [
                    {"name": "ER", "beds": 10, "equipment": 5},
                    {"beds": 10, "equipment": 5},
                    {"beds": 10, "equipment": 5}
                ],
                "edges": [{"from": 1, "to": 2, "distance": 5}],
                "central": 1
            }"#,
        )
        .unwrap();
        Session::from_scenario(&scenario).unwrap()
    }

    #[test]
    fn test_distances_one_based() {
        let text = distances(session().distances());
        assert!(text.starts_with("Shortest distances from department 1"));
        assert!(text.contains("Department 2: 5\n"));
        assert!(text.contains("Department 3: unreachable\n"));
    }

    #[test]
    fn test_admission_and_patient_list() {
        let mut s = session();
        let a = s.admit("Alice").unwrap();
        assert_eq!(
            admitted(&a),
            "Allocating patient Alice to department 1 (distance 0)\n"
        );
        assert!(patients(s.patients()).contains("Patient Alice is in department 1\n"));
        assert!(patients(&[]).contains("No patients admitted."));
    }

    #[test]
    fn test_department_table_uses_labels_and_totals() {
        let s = session();
        let text = departments(s.departments(), s.totals());
        assert!(text.contains("Department 1 (ER) - Beds: 10, Equipment: 5, Patients: 0\n"));
        assert!(text.contains("Total - Beds: 30, Equipment: 15, Patients: 0\n"));
    }

    #[test]
    fn test_equalized_reports_remainder() {
        let mut s = session();
        let report = s.equalize().unwrap();
        let text = equalized(&report, s.departments());
        assert!(text.contains("Total Beds: 30, Total Equipment: 15\n"));
        assert!(!text.contains("Undistributed"));

        s.admit("Alice").unwrap();
        let report = s.equalize().unwrap();
        let text = equalized(&report, s.departments());
        assert!(text.contains("Department 1 (ER) - Beds: 9, Equipment: 4\n"));
        assert!(text.contains("Undistributed remainder - Beds: 2, Equipment: 2\n"));
    }

    #[test]
    fn test_spanning_tree_reports_split() {
        let text = spanning_tree(&session().spanning_tree());
        assert!(text.contains("Department 1 <-> Department 2 (Distance: 5)"));
        assert!(text.contains("split into 2 disconnected groups"));
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(
            failure(&HospitalError::PatientNotFound("Bob".into())),
            "Patient Bob not found.\n"
        );
        assert_eq!(
            failure(&HospitalError::NoPath { from: 0, to: 2 }),
            "No direct path found from department 1 to department 3\n"
        );
        assert_eq!(
            failure(&HospitalError::RosterFull(3)),
            "Error: patient roster is full (3 patients)\n"
        );
    }

    #[test]
    fn test_menu_lists_eight_options() {
        for n in 1..=8 {
            assert!(MENU.contains(&format!("\n{}. ", n)));
        }
    }
}
