//! Energy lockout matrix (Matriz de Bloqueio).

use crate::model::activity::{DEFAULT_COMPANY, DEFAULT_MANAGEMENT};
use crate::model::document::{require_text, Collection, Document, DocumentId, ValidationError, YesNo};
use crate::model::stamp::issue_timestamp;
use crate::model::team::{HasTeam, TeamRoster};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Equipment areas covered by the lockout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockoutAreas {
    pub wheel: bool,
    pub steering: bool,
    pub dump_body: bool,
    pub general: bool,
}

impl LockoutAreas {
    /// Printed labels of the selected areas.
    pub fn selected_labels(&self) -> Vec<&'static str> {
        [
            (self.wheel, "Roda"),
            (self.steering, "Direção"),
            (self.dump_body, "Báscula"),
            (self.general, "Geral"),
        ]
        .into_iter()
        .filter_map(|(selected, label)| selected.then_some(label))
        .collect()
    }
}

/// Energy sources isolated before the intervention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergySources {
    pub electrical: bool,
    pub mechanical: bool,
    pub hydraulic: bool,
    pub pneumatic: bool,
    pub thermal: bool,
    pub chemical: bool,
    pub gravitational: bool,
    pub residual: bool,
}

impl EnergySources {
    /// Printed labels of the isolated energies.
    pub fn selected_labels(&self) -> Vec<&'static str> {
        [
            (self.electrical, "Elétrica"),
            (self.mechanical, "Mecânica"),
            (self.hydraulic, "Hidráulica"),
            (self.pneumatic, "Pneumática"),
            (self.thermal, "Térmica"),
            (self.chemical, "Química"),
            (self.gravitational, "Gravitacional"),
            (self.residual, "Residual"),
        ]
        .into_iter()
        .filter_map(|(selected, label)| selected.then_some(label))
        .collect()
    }
}

/// Energy lockout matrix form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockoutMatrix {
    pub id: DocumentId,
    pub company: String,
    pub executed_task: String,
    pub management: String,
    pub art_code: String,
    pub location: String,
    pub issued_at: String,
    pub om: String,
    pub tag: String,
    pub areas: LockoutAreas,
    pub energies: EnergySources,
    /// Whether the zero-energy effectiveness test was performed.
    pub effectiveness_test: Option<YesNo>,
    pub team: TeamRoster,
}

impl LockoutMatrix {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            company: DEFAULT_COMPANY.to_string(),
            executed_task: String::new(),
            management: DEFAULT_MANAGEMENT.to_string(),
            art_code: String::new(),
            location: String::new(),
            issued_at: issue_timestamp(now),
            om: String::new(),
            tag: String::new(),
            areas: LockoutAreas::default(),
            energies: EnergySources::default(),
            effectiveness_test: None,
            team: TeamRoster::new(),
        }
    }
}

impl Document for LockoutMatrix {
    const COLLECTION: Collection = Collection::LockoutMatrices;

    fn id(&self) -> DocumentId {
        self.id
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        require_text("executed_task", &self.executed_task)?;
        require_text("art_code", &self.art_code)?;
        require_text("om", &self.om)?;
        require_text("tag", &self.tag)
    }
}

impl HasTeam for LockoutMatrix {
    fn team(&self) -> &TeamRoster {
        &self.team
    }

    fn team_mut(&mut self) -> &mut TeamRoster {
        &mut self.team
    }
}

#[cfg(test)]
mod tests {
    use super::LockoutMatrix;
    use crate::model::document::{Document, ValidationError};
    use chrono::Utc;

    #[test]
    fn selected_labels_follow_form_order() {
        let mut matrix = LockoutMatrix::new(Utc::now());
        matrix.energies.residual = true;
        matrix.energies.electrical = true;
        matrix.areas.dump_body = true;

        assert_eq!(matrix.energies.selected_labels(), vec!["Elétrica", "Residual"]);
        assert_eq!(matrix.areas.selected_labels(), vec!["Báscula"]);
    }

    #[test]
    fn save_requires_task_art_code_om_and_tag() {
        let mut matrix = LockoutMatrix::new(Utc::now());
        assert_eq!(
            matrix.validate(),
            Err(ValidationError::MissingField("executed_task"))
        );
        matrix.executed_task = "Troca de cilindro de báscula".to_string();
        matrix.art_code = "155574".to_string();
        matrix.om = "OM-1".to_string();
        assert_eq!(matrix.validate(), Err(ValidationError::MissingField("tag")));
        matrix.tag = "CM-210".to_string();
        assert!(matrix.validate().is_ok());
    }
}
