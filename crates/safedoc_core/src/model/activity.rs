//! Activity risk analysis (ART da Atividade).
//!
//! # Responsibility
//! - Hold the task-level risk analysis: steps, circumstantial checklist,
//!   manually edited risk map and the optional linked ART certificate.
//!
//! # Invariants
//! - Exactly one OMVE option is chosen at any time.
//! - Task step ids are unique within a form.
//! - The risk map here is free text; checklist toggles do not reconcile it.

use crate::model::certificate::ArtCertificate;
use crate::model::document::{
    require_predefined_risk, Collection, Document, DocumentId, ValidationError,
};
use crate::model::risk_map::RiskMap;
use crate::model::stamp::issue_timestamp;
use crate::model::team::{HasTeam, TeamRoster};
use crate::risk::RiskId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

/// Company printed on new forms.
pub const DEFAULT_COMPANY: &str = "Vale";
/// Management unit printed on new forms.
pub const DEFAULT_MANAGEMENT: &str = "GER MANUT EQUIP TRANSPORTE - BENTO MOREIRA DA SILVA";
/// Task ART code printed on new activity forms.
pub const DEFAULT_ACTIVITY_ART_CODE: &str = "155574";

/// Boilerplate control measures for MÉDIA and BAIXA risks.
pub const DEFAULT_CONTROL_SUMMARY: &str = "MÉDIA: Utilizar EPI's (capacete com jugular, óculos de proteção, botina de \
segurança tipo manobreiro e luva de proteção), Evitar ficar no raio de ação de partes \
móveis, Manter local de trabalho organizado, Observar o ambiente e local de \
trabalho, Utilizar método FALAAD, Seguir recomendações do alerta amarelo e \
vermelho para descarga atmosférica, Inspecionar local quanto presença de arestas \
cortantes, Inspecionar ambiente de trabalho mantendo acessos desobstruídos, Não \
criar ou improvisar acessos, Utilizar sempre 3 pontos de apoio para subir e descer \
do equipamento, Sempre abrir e fechar portas utilizando as maçanetas com luvas, \
Transitar por caminhos seguros destinados a pedestres\n\
BAIXA: Avaliar previamente o local de trabalho quanto presença de animais e \
insetos, Caso identifique algum animal manter distância segura e acionar o CECOM";

/// One row of the "main risk situations" table printed on every form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskSituation {
    pub situation: &'static str,
    pub total: u32,
    pub level: RiskLevel,
}

/// Main risk situations for the task, with occurrence totals.
pub const MAIN_RISK_SITUATIONS: [RiskSituation; 10] = [
    RiskSituation { situation: "BATIDA CONTRA - ESTRUTURA E EQUIPAMENTOS", total: 7, level: RiskLevel::Medium },
    RiskSituation { situation: "CONTATOS COM SUPERFÍCIES CORTANTES/PERFURANTES/ABRASIVAS", total: 6, level: RiskLevel::Medium },
    RiskSituation { situation: "ATINGIDO POR PROJEÇÃO DE MATERIAIS (FERRAMENTAS, PEÇAS, FRAGMENTOS, FAGULHAS)", total: 5, level: RiskLevel::Medium },
    RiskSituation { situation: "PRENSAMENTO DO CORPO OU PARTES DO CORPO", total: 5, level: RiskLevel::Medium },
    RiskSituation { situation: "ATINGIDO POR QUEDA DE PEÇAS/ESTRUTURAS/EQUIPAMENTOS/FERRAMENTAS", total: 4, level: RiskLevel::Medium },
    RiskSituation { situation: "QUEDA/ESCORREGÃO/TROPEÇO (MESMO NÍVEL)", total: 4, level: RiskLevel::Medium },
    RiskSituation { situation: "ATROPELAMENTO - VEÍCULOS OU EQUIPAMENTOS AUTOMOTORES", total: 3, level: RiskLevel::Medium },
    RiskSituation { situation: "ATINGIDO POR DESCARGA ATMOSFÉRICA", total: 3, level: RiskLevel::Medium },
    RiskSituation { situation: "QUEDA DE PESSOA DE NÍVEL DIFERENTE", total: 3, level: RiskLevel::Medium },
    RiskSituation { situation: "CONTATO/EXPOSIÇÃO A PRODUTOS QUÍMICOS", total: 2, level: RiskLevel::Medium },
];

/// OMVE risk declaration; the form offers exactly one choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OmveRisk {
    #[default]
    #[serde(rename = "nao")]
    None,
    #[serde(rename = "cilindro")]
    Cylinder,
    #[serde(rename = "grades_de_piso")]
    FloorGrates,
}

impl OmveRisk {
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "Não",
            Self::Cylinder => "Cilindro",
            Self::FloorGrates => "Grades de Piso",
        }
    }
}

/// Risk level of a task step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "ALTA")]
    High,
    #[serde(rename = "MÉDIA")]
    Medium,
    #[serde(rename = "BAIXA")]
    Low,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "ALTA",
            Self::Medium => "MÉDIA",
            Self::Low => "BAIXA",
        }
    }
}

/// One step of the task breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStep {
    pub id: Uuid,
    pub description: String,
    pub risk: Option<RiskLevel>,
}

impl TaskStep {
    fn blank() -> Self {
        Self {
            id: Uuid::new_v4(),
            description: String::new(),
            risk: None,
        }
    }
}

/// Snapshot of a registered ART certificate linked to the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedArt {
    pub art_id: DocumentId,
    pub number: String,
    pub pdf_data_url: String,
}

/// Activity risk analysis form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRiskAnalysis {
    pub id: DocumentId,
    pub company: String,
    pub executed_task: String,
    pub management: String,
    pub art_code: String,
    pub omve: OmveRisk,
    pub location: String,
    /// `dd/mm/yyyy HH:MM:SS (UTC-3)`.
    pub issued_at: String,
    pub control_summary: String,
    pub risk_map: RiskMap,
    pub additional_controls: String,
    /// Checked circumstantial risks keyed by risk id (1-19).
    pub circumstantial_risks: BTreeMap<RiskId, bool>,
    /// Free description for circumstantial item 20.
    pub other_situation: String,
    pub linked_art: Option<LinkedArt>,
    pub task_steps: Vec<TaskStep>,
    pub team: TeamRoster,
}

impl ActivityRiskAnalysis {
    /// Creates a form pre-filled with company defaults and one empty step.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            company: DEFAULT_COMPANY.to_string(),
            executed_task: String::new(),
            management: DEFAULT_MANAGEMENT.to_string(),
            art_code: DEFAULT_ACTIVITY_ART_CODE.to_string(),
            omve: OmveRisk::None,
            location: String::new(),
            issued_at: issue_timestamp(now),
            control_summary: DEFAULT_CONTROL_SUMMARY.to_string(),
            risk_map: RiskMap::default(),
            additional_controls: String::new(),
            circumstantial_risks: BTreeMap::new(),
            other_situation: String::new(),
            linked_art: None,
            task_steps: vec![TaskStep::blank()],
            team: TeamRoster::new(),
        }
    }

    /// Flips one circumstantial risk checkbox and returns its new state.
    ///
    /// Item 20 is free text (`other_situation`), so only ids 1-19 toggle.
    pub fn toggle_circumstantial_risk(&mut self, risk_id: RiskId) -> Result<bool, ValidationError> {
        require_predefined_risk(risk_id)?;
        let checked = self.circumstantial_risks.entry(risk_id).or_insert(false);
        *checked = !*checked;
        Ok(*checked)
    }

    /// Checked circumstantial risk ids in ascending order.
    pub fn checked_circumstantial_risks(&self) -> Vec<RiskId> {
        self.circumstantial_risks
            .iter()
            .filter(|(_, checked)| **checked)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Links a registered certificate, replacing any previous link.
    pub fn link_art(&mut self, certificate: &ArtCertificate) {
        self.linked_art = Some(LinkedArt {
            art_id: certificate.id,
            number: certificate.number.clone(),
            pdf_data_url: certificate.pdf_data_url.clone(),
        });
    }

    pub fn unlink_art(&mut self) {
        self.linked_art = None;
    }

    /// Appends an empty task step and returns its id.
    pub fn add_task_step(&mut self) -> Uuid {
        let step = TaskStep::blank();
        let id = step.id;
        self.task_steps.push(step);
        id
    }

    /// Removes a task step. Returns whether a step was removed.
    pub fn remove_task_step(&mut self, step_id: Uuid) -> bool {
        let before = self.task_steps.len();
        self.task_steps.retain(|step| step.id != step_id);
        self.task_steps.len() != before
    }

    pub fn task_step_mut(&mut self, step_id: Uuid) -> Option<&mut TaskStep> {
        self.task_steps.iter_mut().find(|step| step.id == step_id)
    }
}

impl Document for ActivityRiskAnalysis {
    const COLLECTION: Collection = Collection::ActivityAnalyses;

    fn id(&self) -> DocumentId {
        self.id
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        if let Some(duplicate) = self.task_steps.iter().find(|step| !seen.insert(step.id)) {
            return Err(ValidationError::InvalidField {
                field: "task_steps",
                message: format!("duplicate step id {}", duplicate.id),
            });
        }
        self.circumstantial_risks
            .keys()
            .try_for_each(|risk_id| require_predefined_risk(*risk_id))
    }
}

impl HasTeam for ActivityRiskAnalysis {
    fn team(&self) -> &TeamRoster {
        &self.team
    }

    fn team_mut(&mut self) -> &mut TeamRoster {
        &mut self.team
    }
}

#[cfg(test)]
mod tests {
    use super::{ActivityRiskAnalysis, OmveRisk, RiskLevel, DEFAULT_ACTIVITY_ART_CODE};
    use crate::model::certificate::ArtCertificate;
    use crate::model::document::{Document, ValidationError};
    use chrono::{TimeZone, Utc};

    fn form() -> ActivityRiskAnalysis {
        ActivityRiskAnalysis::new(Utc.with_ymd_and_hms(2025, 10, 31, 13, 40, 20).unwrap())
    }

    #[test]
    fn new_form_is_prefilled() {
        let form = form();
        assert_eq!(form.company, "Vale");
        assert_eq!(form.art_code, DEFAULT_ACTIVITY_ART_CODE);
        assert_eq!(form.omve, OmveRisk::None);
        assert_eq!(form.issued_at, "31/10/2025 10:40:20 (UTC-3)");
        assert_eq!(form.task_steps.len(), 1);
        assert!(form.control_summary.starts_with("MÉDIA:"));
        assert!(form.validate().is_ok());
    }

    #[test]
    fn circumstantial_toggle_flips_and_leaves_map_alone() {
        let mut form = form();
        assert_eq!(form.toggle_circumstantial_risk(4), Ok(true));
        assert_eq!(form.toggle_circumstantial_risk(9), Ok(true));
        assert_eq!(form.toggle_circumstantial_risk(4), Ok(false));
        assert_eq!(form.checked_circumstantial_risks(), vec![9]);
        assert!(form.risk_map.is_blank());
    }

    #[test]
    fn circumstantial_toggle_rejects_ids_outside_the_catalogue() {
        let mut form = form();
        for risk_id in [0, 20, 23] {
            assert!(matches!(
                form.toggle_circumstantial_risk(risk_id),
                Err(ValidationError::InvalidField { field: "risk_id", .. })
            ));
        }
        assert!(form.circumstantial_risks.is_empty());

        form.circumstantial_risks.insert(20, true);
        assert!(form.validate().is_err());
    }

    #[test]
    fn task_steps_can_be_added_edited_and_removed() {
        let mut form = form();
        let step_id = form.add_task_step();
        {
            let step = form.task_step_mut(step_id).unwrap();
            step.description = "Drenar óleo".to_string();
            step.risk = Some(RiskLevel::High);
        }
        assert_eq!(form.task_steps.len(), 2);
        assert!(form.remove_task_step(step_id));
        assert!(!form.remove_task_step(step_id));
        assert_eq!(form.task_steps.len(), 1);
    }

    #[test]
    fn duplicate_step_ids_fail_validation() {
        let mut form = form();
        let copy = form.task_steps[0].clone();
        form.task_steps.push(copy);
        assert!(form.validate().is_err());
    }

    #[test]
    fn link_art_snapshots_certificate() {
        let mut form = form();
        let certificate =
            ArtCertificate::from_pdf_bytes("art.pdf", "900123", b"%PDF-1.7\n").unwrap();
        form.link_art(&certificate);

        let linked = form.linked_art.as_ref().unwrap();
        assert_eq!(linked.art_id, certificate.id);
        assert_eq!(linked.number, "900123");

        form.unlink_art();
        assert!(form.linked_art.is_none());
    }

    #[test]
    fn risk_levels_use_form_labels_on_the_wire() {
        assert_eq!(serde_json::to_string(&RiskLevel::Medium).unwrap(), "\"MÉDIA\"");
        assert_eq!(
            serde_json::to_string(&OmveRisk::FloorGrates).unwrap(),
            "\"grades_de_piso\""
        );
    }
}
