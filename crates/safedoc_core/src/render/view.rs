//! Printable views of the safety forms.
//!
//! # Responsibility
//! - Flatten each form into titled sections of label/value lines.
//! - Keep layout-free content that any renderer backend can lay out.
//!
//! # Invariants
//! - Views only read documents; they never mutate them.
//! - Empty optional values render as `-`.

use crate::model::activity::{ActivityRiskAnalysis, MAIN_RISK_SITUATIONS};
use crate::model::checklist::Checklist;
use crate::model::document::{Document, YesNo};
use crate::model::emergency::EmergencyRiskAnalysis;
use crate::model::lockout::LockoutMatrix;
use crate::model::risk_map::RiskMap;
use crate::model::team::TeamRoster;
use crate::risk::registry::{risk, OTHER_RISK_DEFAULT_DESCRIPTION};

const EMPTY_VALUE: &str = "-";

/// One line inside a view section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewLine {
    Field { label: String, value: String },
    Text(String),
}

/// Titled group of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSection {
    pub heading: String,
    pub lines: Vec<ViewLine>,
}

impl ViewSection {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            lines: Vec::new(),
        }
    }

    /// Appends a label/value line; blank values print as `-`.
    pub fn field(mut self, label: impl Into<String>, value: impl AsRef<str>) -> Self {
        let value = value.as_ref().trim();
        self.lines.push(ViewLine::Field {
            label: label.into(),
            value: if value.is_empty() {
                EMPTY_VALUE.to_string()
            } else {
                value.to_string()
            },
        });
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.lines.push(ViewLine::Text(text.into()));
        self
    }
}

/// Layout-free printable document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    pub title: String,
    pub subtitle: Option<String>,
    pub sections: Vec<ViewSection>,
}

impl RenderedView {
    pub fn section(&self, heading: &str) -> Option<&ViewSection> {
        self.sections.iter().find(|section| section.heading == heading)
    }
}

/// Document that can be turned into a printable view.
pub trait Renderable: Document {
    fn render_view(&self) -> RenderedView;
}

fn yes_no(value: Option<YesNo>) -> &'static str {
    value.map_or(EMPTY_VALUE, YesNo::label)
}

fn risk_map_section(heading: &str, map: &RiskMap) -> ViewSection {
    map.iter()
        .fold(ViewSection::new(heading), |section, (quadrant, text)| {
            section.field(quadrant.label(), text)
        })
}

fn team_section(team: &TeamRoster) -> ViewSection {
    let section = ViewSection::new("Equipe");
    if team.is_empty() {
        return section.text(EMPTY_VALUE);
    }
    team.signatures().iter().fold(section, |section, signature| {
        section.text(format!(
            "{} - {} - {} {}",
            signature.name, signature.role, signature.date, signature.time
        ))
    })
}

impl Renderable for EmergencyRiskAnalysis {
    fn render_view(&self) -> RenderedView {
        let header = ViewSection::new("Identificação")
            .field("Data", &self.date)
            .field("Hora", &self.time)
            .field("TAG", &self.tag)
            .field("OM", &self.om);

        let analysis = ViewSection::new("Análise 360º").text(self.analysis_360.trim());

        let mut identified = ViewSection::new("Riscos identificados");
        for risk_id in self.selected_risks() {
            let description = risk(risk_id).map_or("", |definition| definition.text);
            let control = self
                .identified_risks
                .get(&risk_id)
                .map_or("", |selection| selection.control.as_str());
            identified = identified.field(format!("{risk_id}. {description}"), control);
        }
        if identified.lines.is_empty() {
            identified = identified.text(EMPTY_VALUE);
        }

        let mut others = ViewSection::new("Outras situações de risco");
        for (id, other) in &self.other_risks {
            let description = other.description.trim();
            let changed = description != OTHER_RISK_DEFAULT_DESCRIPTION || !other.control.trim().is_empty();
            if changed {
                others = others.field(format!("{id}. {description}"), &other.control);
            }
        }
        if others.lines.is_empty() {
            others = others.text(EMPTY_VALUE);
        }

        RenderedView {
            title: "ART DE CAMPO EMERGENCIAL".to_string(),
            subtitle: Some(format!("{} - Anexo 1 - REV 03 - 20/12/2023", self.pro_number)),
            sections: vec![
                header,
                analysis,
                identified,
                risk_map_section("Mapa de risco - diagnóstico", &self.diagnosis_map),
                ViewSection::new("Planejamento")
                    .field("Possui ART de planejamento", yes_no(self.has_planning_art)),
                risk_map_section("Mapa de risco - execução", &self.execution_map),
                others,
                team_section(&self.team),
            ],
        }
    }
}

impl Renderable for ActivityRiskAnalysis {
    fn render_view(&self) -> RenderedView {
        let header = ViewSection::new("Identificação")
            .field("Empresa", &self.company)
            .field("Tarefa executada", &self.executed_task)
            .field("Gerência", &self.management)
            .field("Código ART", &self.art_code)
            .field("OMVE - Risco", self.omve.label())
            .field("Local da atividade", &self.location)
            .field("Data de emissão", &self.issued_at);

        let situations = MAIN_RISK_SITUATIONS.iter().fold(
            ViewSection::new("Principais situações de risco"),
            |section, row| section.field(row.situation, format!("{} ({})", row.total, row.level.label())),
        );

        let mut steps = ViewSection::new("Passos da tarefa");
        for (index, step) in self.task_steps.iter().enumerate() {
            let level = step.risk.map_or(EMPTY_VALUE, |level| level.label());
            let description = if step.description.trim().is_empty() {
                EMPTY_VALUE
            } else {
                step.description.trim()
            };
            steps = steps.text(format!("{}. {description} [{level}]", index + 1));
        }

        let mut circumstantial = ViewSection::new("Riscos circunstanciais");
        for risk_id in self.checked_circumstantial_risks() {
            if let Some(definition) = risk(risk_id) {
                circumstantial = circumstantial.text(format!("{risk_id}. {}", definition.text));
            }
        }
        if !self.other_situation.trim().is_empty() {
            circumstantial =
                circumstantial.field(format!("20. {OTHER_RISK_DEFAULT_DESCRIPTION}"), &self.other_situation);
        }
        if circumstantial.lines.is_empty() {
            circumstantial = circumstantial.text(EMPTY_VALUE);
        }

        let linked = match &self.linked_art {
            Some(linked) => ViewSection::new("ART vinculada").field("Número", &linked.number),
            None => ViewSection::new("ART vinculada").text(EMPTY_VALUE),
        };

        RenderedView {
            title: "ART - ANÁLISE DE RISCO DA TAREFA".to_string(),
            subtitle: None,
            sections: vec![
                header,
                situations,
                ViewSection::new("Resumo das medidas de controle").text(self.control_summary.trim()),
                risk_map_section("Mapa de risco", &self.risk_map),
                ViewSection::new("Medidas de controle adicionais").text(if self.additional_controls.trim().is_empty() {
                    EMPTY_VALUE
                } else {
                    self.additional_controls.trim()
                }),
                circumstantial,
                steps,
                linked,
                team_section(&self.team),
            ],
        }
    }
}

impl Renderable for Checklist {
    fn render_view(&self) -> RenderedView {
        let header = ViewSection::new("Identificação")
            .field("Ativo", &self.asset)
            .field("OM", &self.om)
            .field("Data", &self.date)
            .field("Hora", &self.time);

        let items = self.items.values().fold(ViewSection::new("Itens"), |section, item| {
            let observation = if item.observation.trim().is_empty() {
                String::new()
            } else {
                format!(" - {}", item.observation.trim())
            };
            section.text(format!(
                "{}. [{}] {} | Atende: {} | Conforme: {}{observation}",
                item.item_id,
                item.system,
                item.description,
                yes_no(item.meets),
                yes_no(item.conforming),
            ))
        });

        let technician = match &self.technician {
            Some(technician) => ViewSection::new("Técnico do turno manutenção")
                .field("Nome", &technician.name)
                .field("Matrícula", &technician.registration),
            None => ViewSection::new("Técnico do turno manutenção").text(EMPTY_VALUE),
        };

        RenderedView {
            title: "CHECK LIST PÓS-MANUTENÇÃO".to_string(),
            subtitle: None,
            sections: vec![header, items, technician],
        }
    }
}

impl Renderable for LockoutMatrix {
    fn render_view(&self) -> RenderedView {
        let header = ViewSection::new("Identificação")
            .field("Empresa", &self.company)
            .field("Tarefa executada", &self.executed_task)
            .field("Gerência", &self.management)
            .field("Código ART", &self.art_code)
            .field("Local da atividade", &self.location)
            .field("Data de emissão", &self.issued_at)
            .field("OM", &self.om)
            .field("TAG", &self.tag);

        let isolation = ViewSection::new("Bloqueio")
            .field("Áreas", self.areas.selected_labels().join(", "))
            .field("Energias", self.energies.selected_labels().join(", "))
            .field("Teste de efetividade", yes_no(self.effectiveness_test));

        RenderedView {
            title: "MATRIZ DE BLOQUEIO".to_string(),
            subtitle: None,
            sections: vec![header, isolation, team_section(&self.team)],
        }
    }
}
