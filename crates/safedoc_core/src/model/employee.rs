//! Employee registry record.

use crate::model::document::{require_text, Collection, Document, DocumentId, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered employee who can sign team rosters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: DocumentId,
    pub name: String,
    /// Company registration number (matrícula).
    pub registration: String,
    pub phone: String,
    /// Job role (função).
    pub role: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Employee {
    /// Creates an employee with a generated id and no contact details.
    pub fn new(
        name: impl Into<String>,
        registration: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            registration: registration.into(),
            phone: String::new(),
            role: role.into(),
            email: None,
        }
    }
}

impl Document for Employee {
    const COLLECTION: Collection = Collection::Employees;

    fn id(&self) -> DocumentId {
        self.id
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("registration", &self.registration)?;
        require_text("role", &self.role)
    }
}
