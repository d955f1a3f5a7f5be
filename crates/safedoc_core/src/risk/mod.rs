//! Risk registry and risk-map synchronization.
//!
//! # Responsibility
//! - Own the fixed catalogue of predefined risks and their quadrant ranges.
//! - Keep free-text risk-map quadrants in sync with risk selection toggles.
//!
//! # Invariants
//! - A selected risk appears as exactly one bare-number line in its quadrant.
//! - An unselected risk has no attributed line left in its quadrant.
//! - Lines attributed to other risks and user free text are never dropped.

pub mod quadrant;
pub mod reconcile;
pub mod registry;

/// Numeric identifier of a predefined risk (1-19) or an "other risk" slot (20-23).
pub type RiskId = u32;
