//! Registered ART certificate (uploaded PDF).
//!
//! # Invariants
//! - `pdf_data_url` is always a base64 `data:application/pdf` URL.
//! - Only payloads starting with the `%PDF` magic are accepted.

use crate::model::document::{require_text, Collection, Document, DocumentId, ValidationError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const PDF_DATA_URL_PREFIX: &str = "data:application/pdf;base64,";
const PDF_MAGIC: &[u8] = b"%PDF";

static PDF_DATA_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:application/pdf;base64,[A-Za-z0-9+/]+={0,2}$").expect("valid data url regex")
});

/// ART certificate registered from a PDF file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtCertificate {
    pub id: DocumentId,
    /// Original upload file name.
    pub file_name: String,
    /// ART number typed by the user.
    pub number: String,
    pub pdf_data_url: String,
}

impl ArtCertificate {
    /// Builds a certificate from raw PDF bytes.
    ///
    /// # Errors
    /// - `MissingField("number")` when `number` is blank.
    /// - `InvalidField("pdf")` when `bytes` is not a PDF file.
    pub fn from_pdf_bytes(
        file_name: impl Into<String>,
        number: impl Into<String>,
        bytes: &[u8],
    ) -> Result<Self, ValidationError> {
        if !bytes.starts_with(PDF_MAGIC) {
            return Err(ValidationError::InvalidField {
                field: "pdf",
                message: "file is not a PDF document".to_string(),
            });
        }

        let certificate = Self {
            id: Uuid::new_v4(),
            file_name: file_name.into(),
            number: number.into(),
            pdf_data_url: format!("{PDF_DATA_URL_PREFIX}{}", STANDARD.encode(bytes)),
        };
        certificate.validate()?;
        Ok(certificate)
    }

    /// Decodes the stored PDF payload.
    pub fn pdf_bytes(&self) -> Result<Vec<u8>, ValidationError> {
        let encoded = self
            .pdf_data_url
            .strip_prefix(PDF_DATA_URL_PREFIX)
            .ok_or_else(|| invalid_payload("missing pdf data url prefix"))?;
        STANDARD
            .decode(encoded)
            .map_err(|err| invalid_payload(&err.to_string()))
    }
}

fn invalid_payload(message: &str) -> ValidationError {
    ValidationError::InvalidField {
        field: "pdf_data_url",
        message: message.to_string(),
    }
}

impl Document for ArtCertificate {
    const COLLECTION: Collection = Collection::ArtCertificates;

    fn id(&self) -> DocumentId {
        self.id
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        require_text("number", &self.number)?;
        require_text("pdf_data_url", &self.pdf_data_url)?;
        if !PDF_DATA_URL_RE.is_match(&self.pdf_data_url) {
            return Err(invalid_payload("expected a base64 pdf data url"));
        }
        Ok(())
    }
}
