//! Team roster shared by the risk analysis and lockout forms.
//!
//! # Invariants
//! - One signature per employee; signing twice is a no-op.
//! - Signatures keep the order in which members signed.

use crate::model::document::DocumentId;
use crate::model::employee::Employee;
use crate::model::stamp::{signature_date, signature_time};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One team member's signature on a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub employee_id: DocumentId,
    pub name: String,
    pub role: String,
    /// `dd/mm/yyyy`.
    pub date: String,
    /// `HH:MM`.
    pub time: String,
}

/// Document carrying a team roster.
pub trait HasTeam {
    fn team(&self) -> &TeamRoster;
    fn team_mut(&mut self) -> &mut TeamRoster;
}

/// Ordered set of signatures, unique per employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamRoster(Vec<Signature>);

impl TeamRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `employee` signed at `at`.
    ///
    /// Returns `false` without changes when the employee already signed.
    pub fn sign(&mut self, employee: &Employee, at: NaiveDateTime) -> bool {
        if self.contains(employee.id) {
            return false;
        }
        self.0.push(Signature {
            employee_id: employee.id,
            name: employee.name.clone(),
            role: employee.role.clone(),
            date: signature_date(at),
            time: signature_time(at),
        });
        true
    }

    /// Removes the employee's signature. Returns whether one was removed.
    pub fn remove(&mut self, employee_id: DocumentId) -> bool {
        let before = self.0.len();
        self.0.retain(|signature| signature.employee_id != employee_id);
        self.0.len() != before
    }

    pub fn contains(&self, employee_id: DocumentId) -> bool {
        self.0
            .iter()
            .any(|signature| signature.employee_id == employee_id)
    }

    pub fn signatures(&self) -> &[Signature] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::TeamRoster;
    use crate::model::employee::Employee;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 4)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn sign_copies_employee_fields_and_stamps() {
        let employee = Employee::new("Bruno", "4471", "Eletricista");
        let mut roster = TeamRoster::new();

        assert!(roster.sign(&employee, at(8, 15)));

        let signature = &roster.signatures()[0];
        assert_eq!(signature.employee_id, employee.id);
        assert_eq!(signature.name, "Bruno");
        assert_eq!(signature.role, "Eletricista");
        assert_eq!(signature.date, "04/03/2025");
        assert_eq!(signature.time, "08:15");
    }

    #[test]
    fn signing_twice_keeps_one_signature() {
        let employee = Employee::new("Bruno", "4471", "Eletricista");
        let mut roster = TeamRoster::new();

        assert!(roster.sign(&employee, at(8, 15)));
        assert!(!roster.sign(&employee, at(9, 0)));
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.signatures()[0].time, "08:15");
    }

    #[test]
    fn remove_by_employee_id() {
        let first = Employee::new("Bruno", "4471", "Eletricista");
        let second = Employee::new("Carla", "5520", "Mecânica");
        let mut roster = TeamRoster::new();
        roster.sign(&first, at(8, 0));
        roster.sign(&second, at(8, 1));

        assert!(roster.remove(first.id));
        assert!(!roster.remove(first.id));
        assert_eq!(roster.len(), 1);
        assert!(roster.contains(second.id));
    }

    #[test]
    fn roster_serializes_as_plain_list() {
        let employee = Employee::new("Bruno", "4471", "Eletricista");
        let mut roster = TeamRoster::new();
        roster.sign(&employee, at(8, 0));

        let json = serde_json::to_value(&roster).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["name"], "Bruno");
    }
}
