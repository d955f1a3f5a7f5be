//! Emergency field risk analysis (ART de Campo Emergencial).
//!
//! # Responsibility
//! - Hold risk selections, control measures and both risk maps.
//! - Drive the diagnosis and execution maps from risk toggles.
//!
//! # Invariants
//! - `identified_risks` is the source of truth; both maps are derived views.
//! - A toggle reconciles the same quadrant of both maps with the same token.
//! - Editing a control measure never touches the maps.

use crate::model::document::{
    require_predefined_risk, require_text, Collection, Document, DocumentId, ValidationError,
    YesNo,
};
use crate::model::risk_map::RiskMap;
use crate::model::team::{HasTeam, TeamRoster};
use crate::risk::quadrant::Quadrant;
use crate::risk::registry::{risks, OTHER_RISK_DEFAULT_DESCRIPTION, OTHER_RISK_IDS};
use crate::risk::RiskId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Procedure number printed on new emergency forms.
pub const DEFAULT_PRO_NUMBER: &str = "PRO 0034346";

/// Selection state of one predefined risk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSelection {
    pub selected: bool,
    /// Control measure typed for this risk.
    pub control: String,
}

/// Free "other risk" slot (ids 20-23).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherRisk {
    pub description: String,
    pub control: String,
}

impl Default for OtherRisk {
    fn default() -> Self {
        Self {
            description: OTHER_RISK_DEFAULT_DESCRIPTION.to_string(),
            control: String::new(),
        }
    }
}

/// Emergency field risk analysis form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyRiskAnalysis {
    pub id: DocumentId,
    pub pro_number: String,
    pub date: String,
    pub time: String,
    pub tag: String,
    pub om: String,
    /// 360° walk-around analysis text.
    pub analysis_360: String,
    pub identified_risks: BTreeMap<RiskId, RiskSelection>,
    pub diagnosis_map: RiskMap,
    pub has_planning_art: Option<YesNo>,
    pub execution_map: RiskMap,
    pub other_risks: BTreeMap<RiskId, OtherRisk>,
    pub team: TeamRoster,
}

impl Default for EmergencyRiskAnalysis {
    fn default() -> Self {
        Self::new()
    }
}

impl EmergencyRiskAnalysis {
    /// Creates a blank form: every predefined risk unselected, default
    /// "other risk" slots, empty maps and team.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            pro_number: DEFAULT_PRO_NUMBER.to_string(),
            date: String::new(),
            time: String::new(),
            tag: String::new(),
            om: String::new(),
            analysis_360: String::new(),
            identified_risks: risks()
                .iter()
                .map(|risk| (risk.id, RiskSelection::default()))
                .collect(),
            diagnosis_map: RiskMap::default(),
            has_planning_art: None,
            execution_map: RiskMap::default(),
            other_risks: OTHER_RISK_IDS
                .iter()
                .map(|id| (*id, OtherRisk::default()))
                .collect(),
            team: TeamRoster::new(),
        }
    }

    /// Sets a risk's selection flag and reconciles both risk maps.
    ///
    /// # Contract
    /// - The quadrant is chosen by `quadrant_for(risk_id)`.
    /// - Diagnosis and execution maps are reconciled independently, each
    ///   from its own current text, with token `risk_id.to_string()`.
    /// - Returns the quadrant that was reconciled.
    ///
    /// # Errors
    /// - `InvalidField("risk_id")` for ids outside 1-19; nothing changes.
    pub fn set_risk_selected(
        &mut self,
        risk_id: RiskId,
        selected: bool,
    ) -> Result<Quadrant, ValidationError> {
        require_predefined_risk(risk_id)?;
        self.identified_risks.entry(risk_id).or_default().selected = selected;
        let quadrant = self.diagnosis_map.apply_risk_toggle(risk_id, selected);
        self.execution_map.apply_risk_toggle(risk_id, selected);
        Ok(quadrant)
    }

    /// Sets a risk's control measure text.
    ///
    /// Only predefined risks (1-19) carry a control here; "other risk" slots
    /// are edited through `other_risk_mut`.
    pub fn set_risk_control(
        &mut self,
        risk_id: RiskId,
        control: impl Into<String>,
    ) -> Result<(), ValidationError> {
        require_predefined_risk(risk_id)?;
        self.identified_risks.entry(risk_id).or_default().control = control.into();
        Ok(())
    }

    /// Returns whether a risk is currently selected.
    pub fn is_risk_selected(&self, risk_id: RiskId) -> bool {
        self.identified_risks
            .get(&risk_id)
            .is_some_and(|selection| selection.selected)
    }

    /// Selected risk ids in ascending order.
    pub fn selected_risks(&self) -> Vec<RiskId> {
        self.identified_risks
            .iter()
            .filter(|(_, selection)| selection.selected)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Returns one "other risk" slot for editing.
    ///
    /// Returns `None` for ids outside 20-23.
    pub fn other_risk_mut(&mut self, id: RiskId) -> Option<&mut OtherRisk> {
        if !OTHER_RISK_IDS.contains(&id) {
            return None;
        }
        Some(self.other_risks.entry(id).or_default())
    }
}

impl Document for EmergencyRiskAnalysis {
    const COLLECTION: Collection = Collection::EmergencyAnalyses;

    fn id(&self) -> DocumentId {
        self.id
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        require_text("date", &self.date)?;
        require_text("time", &self.time)?;
        require_text("analysis_360", &self.analysis_360)?;
        self.identified_risks
            .keys()
            .try_for_each(|risk_id| require_predefined_risk(*risk_id))
    }
}

impl HasTeam for EmergencyRiskAnalysis {
    fn team(&self) -> &TeamRoster {
        &self.team
    }

    fn team_mut(&mut self) -> &mut TeamRoster {
        &mut self.team
    }
}
