//! Ordered patient roster.
//!
//! Patients are kept in admission order. Discharge removes the first patient
//! with a matching name and shifts the rest left, so the relative order of
//! everyone else is preserved. Duplicate names are allowed.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_PATIENT_NAME_LEN;
use crate::error::HospitalError;

/// An admitted patient and the department holding their bed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub name: String,
    /// 0-based department index.
    pub department: usize,
}

/// Growable patient list with an optional ceiling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    patients: Vec<Patient>,
    max_patients: Option<usize>,
}

impl Roster {
    /// Unlimited roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Roster that refuses admissions beyond `max_patients`.
    pub fn with_limit(max_patients: Option<usize>) -> Self {
        Self {
            patients: Vec::new(),
            max_patients,
        }
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    pub fn as_slice(&self) -> &[Patient] {
        &self.patients
    }

    pub fn iter(&self) -> impl Iterator<Item = &Patient> {
        self.patients.iter()
    }

    /// Fails with `RosterFull` when another admission would exceed the limit.
    pub fn ensure_room(&self) -> Result<(), HospitalError> {
        match self.max_patients {
            Some(max) if self.patients.len() >= max => Err(HospitalError::RosterFull(max)),
            _ => Ok(()),
        }
    }

    /// Append a patient at the end of the roster.
    pub fn push(&mut self, patient: Patient) -> Result<(), HospitalError> {
        self.ensure_room()?;
        self.patients
            .try_reserve(1)
            .map_err(|_| HospitalError::OutOfMemory("patient roster"))?;
        self.patients.push(patient);
        Ok(())
    }

    /// Remove the first patient named `name`, keeping everyone else in order.
    pub fn remove_by_name(&mut self, name: &str) -> Option<Patient> {
        let position = self.patients.iter().position(|p| p.name == name)?;
        Some(self.patients.remove(position))
    }
}

/// Normalize an operator-entered patient name.
///
/// Surrounding whitespace is trimmed. Empty names, names longer than
/// `MAX_PATIENT_NAME_LEN` characters and names with control characters are
/// rejected.
pub fn normalize_name(raw: &str) -> Result<String, HospitalError> {
    let name = raw.trim();
    if name.is_empty()
        || name.chars().count() > MAX_PATIENT_NAME_LEN
        || name.chars().any(char::is_control)
    {
        return Err(HospitalError::InvalidPatientName(raw.to_string()));
    }
    Ok(name.to_string())
}
