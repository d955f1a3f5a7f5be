//! Core domain logic for the SafeDoc safety-form tool.
//! This crate is the single source of truth for form rules and risk-map
//! synchronization.

pub mod db;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod risk;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::document::{Collection, Document, DocumentId, ValidationError, YesNo};
pub use model::emergency::EmergencyRiskAnalysis;
pub use model::risk_map::RiskMap;
pub use render::export::export_document;
pub use render::text::PlainTextRenderer;
pub use render::view::{Renderable, RenderedView};
pub use render::{DocumentRenderer, RenderError};
pub use repo::document_repo::{
    DocumentRepository, RepoError, RepoResult, SqliteDocumentRepository,
};
pub use risk::quadrant::{quadrant_for, Quadrant};
pub use risk::reconcile::{reconcile_quadrant, reconcile_quadrant_with, LineAttribution};
pub use risk::RiskId;
pub use service::document_service::{DocumentService, DocumentSummary, ServiceError, ServiceResult};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
