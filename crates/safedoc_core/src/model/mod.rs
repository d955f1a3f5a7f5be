//! Domain model for safety documents.
//!
//! # Responsibility
//! - Define the records persisted by the document store.
//! - Own per-record invariants (`validate`) and form-level edits such as
//!   risk toggles and team roster changes.
//!
//! # Invariants
//! - Every storable record is identified by a stable, non-nil `DocumentId`.
//! - The four form records share the `TeamRoster` value type.
//! - Emergency risk maps are derived from risk selections through the
//!   quadrant reconciler, never edited behind its back by model code.

pub mod activity;
pub mod certificate;
pub mod checklist;
pub mod document;
pub mod emergency;
pub mod employee;
pub mod lockout;
pub mod risk_map;
pub mod stamp;
pub mod team;
