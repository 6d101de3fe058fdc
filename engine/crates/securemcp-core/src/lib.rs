//! SecureMCP Core - Foundation types and error handling
//!
//! This crate provides the core abstractions shared by every SecureMCP crate:
//! - `Finding`: raw textual evidence emitted by a check module
//! - `Vulnerability`: a finding enriched with type, severity and remediation
//! - `CheckKind`: the three check modules and their display names
//! - `Severity`, `VulnerabilityType`: closed classification enums
//! - `Error`: the shared error taxonomy

pub mod check;
pub mod error;
pub mod finding;
pub mod severity;

// Re-export commonly used types at crate root
pub use check::CheckKind;
pub use error::{Error, Result};
pub use finding::{Finding, Vulnerability};
pub use severity::{Severity, VulnerabilityType};
