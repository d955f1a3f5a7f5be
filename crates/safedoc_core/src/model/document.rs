//! Shared document identity, collection names and validation contract.
//!
//! # Responsibility
//! - Tie each storable record type to one named collection.
//! - Provide the validation error type used by every record.
//!
//! # Invariants
//! - Collection ids are stable; they are persisted in `documents.collection`.
//! - `Document::validate()` always rejects a nil id before field checks.

use crate::risk::registry::is_predefined;
use crate::risk::RiskId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of every stored document.
pub type DocumentId = Uuid;

/// Named collection a document type is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Registered employees.
    Employees,
    /// Registered ART PDF certificates.
    ArtCertificates,
    /// Emergency field risk analyses.
    EmergencyAnalyses,
    /// Activity (task) risk analyses.
    ActivityAnalyses,
    /// Post-maintenance checklists.
    Checklists,
    /// Energy lockout matrices.
    LockoutMatrices,
}

impl Collection {
    /// All collections in dashboard order.
    pub const ALL: [Collection; 6] = [
        Self::Employees,
        Self::ArtCertificates,
        Self::EmergencyAnalyses,
        Self::ActivityAnalyses,
        Self::Checklists,
        Self::LockoutMatrices,
    ];

    /// Stable string id.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Employees => "employees",
            Self::ArtCertificates => "art_certificates",
            Self::EmergencyAnalyses => "emergency_analyses",
            Self::ActivityAnalyses => "activity_analyses",
            Self::Checklists => "checklists",
            Self::LockoutMatrices => "lockout_matrices",
        }
    }

    /// Parses a collection from its string id.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|collection| collection.as_str() == normalized)
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Yes/no answer left unset until the user picks one.
///
/// Fields use `Option<YesNo>`; `None` is the unanswered state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    #[serde(rename = "sim")]
    Yes,
    #[serde(rename = "nao")]
    No,
}

impl YesNo {
    /// Printed form label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Yes => "Sim",
            Self::No => "Não",
        }
    }
}

/// Validation error for document write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Document id is the nil UUID.
    NilId,
    /// Required field is empty or unset.
    MissingField(&'static str),
    /// Field is present but malformed.
    InvalidField {
        field: &'static str,
        message: String,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "document id must not be nil"),
            Self::MissingField(field) => write!(f, "required field `{field}` is empty"),
            Self::InvalidField { field, message } => {
                write!(f, "invalid field `{field}`: {message}")
            }
        }
    }
}

impl Error for ValidationError {}

/// Storable document contract.
pub trait Document: Serialize + DeserializeOwned {
    /// Collection this document type lives in.
    const COLLECTION: Collection;

    /// Stable id of this document.
    fn id(&self) -> DocumentId;

    /// Checks record-specific required fields and formats.
    fn validate_fields(&self) -> Result<(), ValidationError>;

    /// Checks the full write-path contract.
    fn validate(&self) -> Result<(), ValidationError> {
        if self.id().is_nil() {
            return Err(ValidationError::NilId);
        }
        self.validate_fields()
    }
}

/// Rejects blank text for a required field.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

/// Rejects ids outside the predefined risk catalogue (1-19).
pub(crate) fn require_predefined_risk(risk_id: RiskId) -> Result<(), ValidationError> {
    if is_predefined(risk_id) {
        return Ok(());
    }
    Err(ValidationError::InvalidField {
        field: "risk_id",
        message: format!("{risk_id} is not a predefined risk (1-19)"),
    })
}
