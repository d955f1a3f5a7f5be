//! Static risk catalogue shared by the risk analysis forms.

use crate::risk::quadrant::{quadrant_for, Quadrant};
use crate::risk::RiskId;

/// One predefined hazard description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskDefinition {
    pub id: RiskId,
    pub text: &'static str,
}

impl RiskDefinition {
    /// Quadrant where this risk is marked on the risk maps.
    pub fn quadrant(&self) -> Quadrant {
        quadrant_for(self.id)
    }
}

/// Predefined risks, ordered by id.
pub const RISKS: [RiskDefinition; 19] = [
    RiskDefinition { id: 1, text: "Contato com superfícies cortantes/perfurante em ferramentas manuais ou em estruturas." },
    RiskDefinition { id: 2, text: "Prensamento de dedos ou mãos." },
    RiskDefinition { id: 3, text: "Queda de peças/estruturas/equipamentos." },
    RiskDefinition { id: 4, text: "Prensamento ou agarramento do corpo." },
    RiskDefinition { id: 5, text: "Atropelamento/esmagamento por veículos como em vias, pátios, cruzamentos e ferrovias." },
    RiskDefinition { id: 6, text: "Queda, tropeço ou escorregão no acesso ou no local de trabalho." },
    RiskDefinition { id: 7, text: "Animais peçonhentos/insetos/animal selvagem." },
    RiskDefinition { id: 8, text: "Desmoronamentos de pilhas (minério, estéril, entre outros tipos de materiais)." },
    RiskDefinition { id: 9, text: "Queda de plataforma ou de escadas durante o acesso (atenção para os possíveis pontos com corrosão)." },
    RiskDefinition { id: 10, text: "Arco e/ou choque elétrico." },
    RiskDefinition { id: 11, text: "Fontes de energia (hidráulica, pneumática, elétrica, etc)." },
    RiskDefinition { id: 12, text: "Exposição a vapores, condensados ou superfícies quentes." },
    RiskDefinition { id: 13, text: "Gases, vapores, poeiras ou fumos." },
    RiskDefinition { id: 14, text: "Produtos químicos ou queimaduras." },
    RiskDefinition { id: 15, text: "Projeção de materiais na face ou nos olhos." },
    RiskDefinition { id: 16, text: "Condições climáticas adversas (sol, chuva, vento)." },
    RiskDefinition { id: 17, text: "Queda de homem ao mar ou afogamento." },
    RiskDefinition { id: 18, text: "Interferência entre equipes (trabalho sobreposto, espaço restrito)." },
    RiskDefinition { id: 19, text: "Excesso ou deficiência de iluminação." },
];

/// Ids of the free "other risk" slots on the emergency form.
pub const OTHER_RISK_IDS: [RiskId; 4] = [20, 21, 22, 23];

/// Default description of every "other risk" slot and of checklist item 20.
pub const OTHER_RISK_DEFAULT_DESCRIPTION: &str = "Outras situações de risco:";

/// Returns all predefined risks ordered by id.
pub fn risks() -> &'static [RiskDefinition] {
    &RISKS
}

/// Looks up one predefined risk.
pub fn risk(id: RiskId) -> Option<&'static RiskDefinition> {
    RISKS.iter().find(|risk| risk.id == id)
}

/// Returns whether `id` names one of the predefined risks.
pub fn is_predefined(id: RiskId) -> bool {
    risk(id).is_some()
}
