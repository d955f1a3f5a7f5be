//! Post-maintenance checklist.
//!
//! # Invariants
//! - A normalized checklist carries all 34 catalogue items, keyed by item id.
//! - Item system/description always mirror the catalogue; answers are kept.

use crate::model::document::{require_text, Collection, Document, DocumentId, ValidationError, YesNo};
use crate::model::employee::Employee;
use crate::model::stamp::{signature_date, signature_time};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// One catalogue line of the checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistItemDefinition {
    pub item_id: u32,
    pub system: &'static str,
    pub description: &'static str,
}

const fn item(item_id: u32, system: &'static str, description: &'static str) -> ChecklistItemDefinition {
    ChecklistItemDefinition {
        item_id,
        system,
        description,
    }
}

/// Fixed checklist catalogue ordered by item id.
pub const CHECKLIST_ITEMS: [ChecklistItemDefinition; 34] = [
    item(1, "MOTOR", "Nível de óleo do motor"),
    item(2, "MOTOR", "Vazamento de óleo no motor"),
    item(3, "MOTOR", "Ruído anormal no motor"),
    item(4, "MOTOR", "Sistema de arrefecimento (nível/vazamento)"),
    item(5, "MOTOR", "Filtro de ar"),
    item(6, "TRANSMISSÃO", "Nível de óleo da transmissão"),
    item(7, "TRANSMISSÃO", "Vazamento de óleo na transmissão"),
    item(8, "TRANSMISSÃO", "Engate de marchas"),
    item(9, "FREIOS", "Pastilhas/lonas de freio"),
    item(10, "FREIOS", "Nível de fluído de freio"),
    item(11, "FREIOS", "Funcionamento do freio de estacionamento"),
    item(12, "HIDRÁULICO", "Nível de óleo hidráulico"),
    item(13, "HIDRÁULICO", "Vazamento de mangueiras/cilindros"),
    item(14, "HIDRÁULICO", "Funcionamento de comandos"),
    item(15, "ELÉTRICO", "Bateria e terminais"),
    item(16, "ELÉTRICO", "Iluminação (faróis, lanternas, setas)"),
    item(17, "ELÉTRICO", "Alternador/Motor de partida"),
    item(18, "PNEUS", "Calibragem dos pneus"),
    item(19, "PNEUS", "Desgaste/condição dos pneus"),
    item(20, "CHASSI/ESTRUTURA", "Trincas/rachaduras no chassi"),
    item(21, "CHASSI/ESTRUTURA", "Parafusos/fixações"),
    item(22, "CABINE", "Limpeza e organização da cabine"),
    item(23, "CABINE", "Assento do operador"),
    item(24, "CABINE", "Espelhos retrovisores"),
    item(25, "SEGURANÇA", "Extintor de incêndio (validade/pressão)"),
    item(26, "SEGURANÇA", "Cinto de segurança"),
    item(27, "SEGURANÇA", "Alarme de ré"),
    item(28, "SISTEMA DE LUBRIFICAÇÃO", "Pontos de lubrificação"),
    item(29, "SISTEMA DE LUBRIFICAÇÃO", "Graxa/óleo"),
    item(30, "DIREÇÃO", "Folga no sistema de direção"),
    item(31, "DIREÇÃO", "Vazamento na direção hidráulica"),
    item(32, "SUSPENSÃO", "Condição das molas/amortecedores"),
    item(33, "SUSPENSÃO", "Buchas/pinos"),
    item(34, "OUTROS", "Outros itens de verificação (especificar)"),
];

/// Answers for one checklist item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub item_id: u32,
    pub system: String,
    pub description: String,
    /// "Atende" column.
    pub meets: Option<YesNo>,
    pub observation: String,
    /// "Conforme" column.
    pub conforming: Option<YesNo>,
}

impl ChecklistItem {
    fn from_definition(definition: &ChecklistItemDefinition) -> Self {
        Self {
            item_id: definition.item_id,
            system: definition.system.to_string(),
            description: definition.description.to_string(),
            meets: None,
            observation: String::new(),
            conforming: None,
        }
    }
}

/// Shift maintenance technician who signs the checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicianSignature {
    pub employee_id: DocumentId,
    pub name: String,
    pub registration: String,
}

/// Post-maintenance checklist form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    pub id: DocumentId,
    /// Asset (equipment) identifier.
    pub asset: String,
    pub om: String,
    /// `dd/mm/yyyy`.
    pub date: String,
    /// `HH:MM`.
    pub time: String,
    pub items: BTreeMap<u32, ChecklistItem>,
    pub technician: Option<TechnicianSignature>,
}

impl Checklist {
    /// Creates a checklist dated `now` with every catalogue item unanswered.
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            asset: String::new(),
            om: String::new(),
            date: signature_date(now),
            time: signature_time(now),
            items: CHECKLIST_ITEMS
                .iter()
                .map(|definition| (definition.item_id, ChecklistItem::from_definition(definition)))
                .collect(),
            technician: None,
        }
    }

    /// Brings items in line with the catalogue.
    ///
    /// Missing items are added unanswered; catalogue text is refreshed;
    /// answers and observations are kept; unknown item ids are dropped.
    pub fn normalize_items(&mut self) {
        let mut previous = std::mem::take(&mut self.items);
        self.items = CHECKLIST_ITEMS
            .iter()
            .map(|definition| {
                let mut item = ChecklistItem::from_definition(definition);
                if let Some(old) = previous.remove(&definition.item_id) {
                    item.meets = old.meets;
                    item.observation = old.observation;
                    item.conforming = old.conforming;
                }
                (definition.item_id, item)
            })
            .collect();
    }

    pub fn item_mut(&mut self, item_id: u32) -> Option<&mut ChecklistItem> {
        self.items.get_mut(&item_id)
    }

    /// Sets the signing technician from the employee registry.
    pub fn assign_technician(&mut self, employee: &Employee) {
        self.technician = Some(TechnicianSignature {
            employee_id: employee.id,
            name: employee.name.clone(),
            registration: employee.registration.clone(),
        });
    }

    /// Items answered "não" in either column, in item order.
    pub fn failing_items(&self) -> Vec<&ChecklistItem> {
        self.items
            .values()
            .filter(|item| item.meets == Some(YesNo::No) || item.conforming == Some(YesNo::No))
            .collect()
    }
}

impl Document for Checklist {
    const COLLECTION: Collection = Collection::Checklists;

    fn id(&self) -> DocumentId {
        self.id
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        require_text("asset", &self.asset)?;
        require_text("om", &self.om)?;
        if self.technician.is_none() {
            return Err(ValidationError::MissingField("technician"));
        }
        Ok(())
    }
}
