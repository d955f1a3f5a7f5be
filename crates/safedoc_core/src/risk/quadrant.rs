//! Risk diagram quadrants and the static risk-to-quadrant assignment.

use crate::risk::RiskId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One of the four zones around the equipment on a risk diagram.
///
/// String ids match the labels printed on the paper forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    /// Front / below the equipment.
    #[serde(rename = "frente")]
    Front,
    /// Behind the equipment.
    #[serde(rename = "atras")]
    Back,
    /// Left side.
    #[serde(rename = "esquerda")]
    Left,
    /// Right side.
    #[serde(rename = "direita")]
    Right,
}

impl Quadrant {
    /// All quadrants in diagram reading order.
    pub const ALL: [Quadrant; 4] = [Self::Front, Self::Back, Self::Left, Self::Right];

    /// Stable string id.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Front => "frente",
            Self::Back => "atras",
            Self::Left => "esquerda",
            Self::Right => "direita",
        }
    }

    /// Human-facing label used in rendered documents.
    pub fn label(self) -> &'static str {
        match self {
            Self::Front => "Frente / Abaixo",
            Self::Back => "Atrás",
            Self::Left => "Esquerda",
            Self::Right => "Direita",
        }
    }

    /// Parses one quadrant from its string id.
    pub fn parse(value: &str) -> Result<Self, UnknownQuadrant> {
        match value.trim().to_ascii_lowercase().as_str() {
            "frente" => Ok(Self::Front),
            "atras" => Ok(Self::Back),
            "esquerda" => Ok(Self::Left),
            "direita" => Ok(Self::Right),
            _ => Err(UnknownQuadrant(value.to_string())),
        }
    }
}

impl Display for Quadrant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a quadrant id is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownQuadrant(pub String);

impl Display for UnknownQuadrant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown quadrant `{}`; expected frente|atras|esquerda|direita",
            self.0
        )
    }
}

impl Error for UnknownQuadrant {}

/// Maps a risk id to the quadrant where it is marked.
///
/// - 1-5 -> front, 6-10 -> back, 11-15 -> left, 16-19 -> right.
/// - Any other id falls back to front.
pub fn quadrant_for(risk_id: RiskId) -> Quadrant {
    match risk_id {
        1..=5 => Quadrant::Front,
        6..=10 => Quadrant::Back,
        11..=15 => Quadrant::Left,
        16..=19 => Quadrant::Right,
        _ => Quadrant::Front,
    }
}
