//! Per-department resource counters.

use serde::{Deserialize, Serialize};

/// Beds, equipment and current occupancy of one department.
///
/// Counters are unsigned. Admission only draws from a department that
/// [`has_capacity`](Department::has_capacity), so they never underflow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Optional display label ("Emergency", "ICU", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub beds: u32,
    pub equipment: u32,
    #[serde(default)]
    pub patients: u32,
}

impl Department {
    pub fn new(beds: u32, equipment: u32) -> Self {
        Self {
            name: None,
            beds,
            equipment,
            patients: 0,
        }
    }

    pub fn named(name: impl Into<String>, beds: u32, equipment: u32) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(beds, equipment)
        }
    }

    /// Whether a new patient could be placed here.
    pub fn has_capacity(&self) -> bool {
        self.beds > 0 && self.equipment > 0
    }

    /// Take one bed and one piece of equipment for a new patient.
    pub(crate) fn occupy(&mut self) {
        debug_assert!(self.has_capacity());
        self.beds = self.beds.saturating_sub(1);
        self.equipment = self.equipment.saturating_sub(1);
        self.patients = self.patients.saturating_add(1);
    }

    /// Return the bed and equipment of a departing patient.
    pub(crate) fn release(&mut self) {
        self.beds = self.beds.saturating_add(1);
        self.equipment = self.equipment.saturating_add(1);
        self.patients = self.patients.saturating_sub(1);
    }

    /// Label for console output: the name if set, else "Department N".
    pub fn label(&self, index: usize) -> String {
        match &self.name {
            Some(name) => format!("Department {} ({})", index + 1, name),
            None => format!("Department {}", index + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_needs_both_resources() {
        assert!(Department::new(1, 1).has_capacity());
        assert!(!Department::new(0, 5).has_capacity());
        assert!(!Department::new(5, 0).has_capacity());
    }

    #[test]
    fn test_occupy_then_release_restores() {
        let mut d = Department::new(3, 2);
        let before = d.clone();
        d.occupy();
        assert_eq!((d.beds, d.equipment, d.patients), (2, 1, 1));
        d.release();
        assert_eq!(d, before);
    }

    #[test]
    fn test_label() {
        assert_eq!(Department::new(1, 1).label(0), "Department 1");
        assert_eq!(Department::named("ICU", 1, 1).label(2), "Department 3 (ICU)");
    }

    #[test]
    fn test_deserialize_defaults_patients() {
        let d: Department = serde_json::from_str(r#"{"beds": 4, "equipment": 2}"#).unwrap();
        assert_eq!(d, Department::new(4, 2));
    }
}
