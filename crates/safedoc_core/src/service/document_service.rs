//! Document use-case service.
//!
//! # Responsibility
//! - Provide save/get/list/delete entry points for every document type.
//! - Orchestrate form edits that span records: risk toggles, team signing,
//!   certificate registration and the per-collection summary.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Emitted log events carry ids and counts only, never form content.

use crate::model::certificate::ArtCertificate;
use crate::model::document::{Collection, Document, DocumentId, ValidationError};
use crate::model::emergency::EmergencyRiskAnalysis;
use crate::model::employee::Employee;
use crate::model::stamp::local_now;
use crate::model::team::HasTeam;
use crate::repo::document_repo::{DocumentRepository, RepoError};
use crate::risk::RiskId;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for document use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Input or stored record breaks a document rule.
    Validation(ValidationError),
    /// Target document does not exist.
    NotFound {
        collection: Collection,
        id: DocumentId,
    },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { collection, id } => {
                write!(f, "document not found: {collection}/{id}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound { collection, id } => Self::NotFound { collection, id },
            other => Self::Repo(other),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Per-collection document counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    /// Counts in `Collection::ALL` order.
    pub counts: Vec<(Collection, u64)>,
}

impl DocumentSummary {
    pub fn count(&self, collection: Collection) -> u64 {
        self.counts
            .iter()
            .find(|(candidate, _)| *candidate == collection)
            .map_or(0, |(_, count)| *count)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, count)| count).sum()
    }
}

/// Document service facade over repository implementations.
pub struct DocumentService<R: DocumentRepository> {
    repo: R,
}

impl<R: DocumentRepository> DocumentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and stores one document (insert or full replace).
    pub fn save<D: Document>(&self, document: &D) -> ServiceResult<()> {
        if let Err(err) = document.validate() {
            warn!(
                "event=document_save module=service status=rejected collection={} id={} error={err}",
                D::COLLECTION,
                document.id()
            );
            return Err(err.into());
        }
        self.repo.put(document)?;
        info!(
            "event=document_save module=service status=ok collection={} id={}",
            D::COLLECTION,
            document.id()
        );
        Ok(())
    }

    /// Gets one document, failing with `NotFound` when absent.
    pub fn get<D: Document>(&self, id: DocumentId) -> ServiceResult<D> {
        self.repo.get(id)?.ok_or(ServiceError::NotFound {
            collection: D::COLLECTION,
            id,
        })
    }

    /// Gets one document if present.
    pub fn find<D: Document>(&self, id: DocumentId) -> ServiceResult<Option<D>> {
        Ok(self.repo.get(id)?)
    }

    /// Lists every document of a type in creation order.
    pub fn list<D: Document>(&self) -> ServiceResult<Vec<D>> {
        Ok(self.repo.list()?)
    }

    /// Deletes one document.
    pub fn delete<D: Document>(&self, id: DocumentId) -> ServiceResult<()> {
        self.repo.delete::<D>(id)?;
        info!(
            "event=document_delete module=service status=ok collection={} id={id}",
            D::COLLECTION
        );
        Ok(())
    }

    /// Registers an employee.
    pub fn register_employee(
        &self,
        name: &str,
        registration: &str,
        role: &str,
        phone: &str,
        email: Option<&str>,
    ) -> ServiceResult<Employee> {
        let mut employee = Employee::new(name.trim(), registration.trim(), role.trim());
        employee.phone = phone.trim().to_string();
        employee.email = email
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        self.save(&employee)?;
        Ok(employee)
    }

    /// Registers an ART certificate from raw PDF file bytes.
    pub fn register_art_certificate(
        &self,
        file_name: &str,
        number: &str,
        bytes: &[u8],
    ) -> ServiceResult<ArtCertificate> {
        let certificate = ArtCertificate::from_pdf_bytes(file_name, number.trim(), bytes)?;
        self.save(&certificate)?;
        info!(
            "event=art_register module=service status=ok id={} size_bytes={}",
            certificate.id,
            bytes.len()
        );
        Ok(certificate)
    }

    /// Toggles one risk on a stored emergency analysis and persists it.
    ///
    /// Both risk maps are reconciled by the model before the write. Ids
    /// outside the predefined catalogue (1-19) are rejected with
    /// `InvalidField("risk_id")` and the stored form is left untouched.
    pub fn set_emergency_risk(
        &self,
        analysis_id: DocumentId,
        risk_id: RiskId,
        selected: bool,
    ) -> ServiceResult<EmergencyRiskAnalysis> {
        let mut analysis: EmergencyRiskAnalysis = self.get(analysis_id)?;
        let quadrant = match analysis.set_risk_selected(risk_id, selected) {
            Ok(quadrant) => quadrant,
            Err(err) => {
                warn!(
                    "event=risk_toggle module=service status=rejected id={analysis_id} risk_id={risk_id} error={err}"
                );
                return Err(err.into());
            }
        };
        self.save(&analysis)?;
        info!(
            "event=risk_toggle module=service status=ok id={analysis_id} risk_id={risk_id} selected={selected} quadrant={quadrant}"
        );
        Ok(analysis)
    }

    /// Signs an employee onto a stored document's team roster.
    ///
    /// Returns the updated document; signing twice leaves it unchanged.
    pub fn sign_team<D: Document + HasTeam>(
        &self,
        document_id: DocumentId,
        employee_id: DocumentId,
    ) -> ServiceResult<D> {
        let employee: Employee = self.get(employee_id)?;
        let mut document: D = self.get(document_id)?;
        if document.team_mut().sign(&employee, local_now()) {
            self.save(&document)?;
        }
        Ok(document)
    }

    /// Removes an employee from a stored document's team roster.
    pub fn unsign_team<D: Document + HasTeam>(
        &self,
        document_id: DocumentId,
        employee_id: DocumentId,
    ) -> ServiceResult<D> {
        let mut document: D = self.get(document_id)?;
        if document.team_mut().remove(employee_id) {
            self.save(&document)?;
        }
        Ok(document)
    }

    /// Counts stored documents per collection.
    pub fn summary(&self) -> ServiceResult<DocumentSummary> {
        let mut counts = Vec::with_capacity(Collection::ALL.len());
        for collection in Collection::ALL {
            counts.push((collection, self.repo.count(collection)?));
        }
        Ok(DocumentSummary { counts })
    }
}
