//! Report generation modules for different output formats
//!
//! This module contains report generators for various output formats:
//! - human: Human-readable console output
//! - json: JSON format for programmatic use

pub mod human;
pub mod json;

use crate::error::SccError;
use crate::index::ComponentIndex;

/// Common trait for all report generators
pub trait ReportGenerator {
    /// Generate a report from a decomposition
    fn generate_report(&self, index: &ComponentIndex) -> Result<String, SccError>;
}

// Re-export for convenience
pub use human::HumanReportGenerator;
pub use json::JsonReportGenerator;
