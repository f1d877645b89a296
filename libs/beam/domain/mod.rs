//! Domain Layer
//!
//! Project metadata, the editable material table and the emissions summary.

pub mod material;
pub mod project;
pub mod summary;

use thiserror::Error;

pub use material::{MaterialEntry, MaterialTable, Section};
pub use project::{BuildingType, ProjectInfo};
pub use summary::{EmissionsSummary, MaterialSummary};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid project: {0}")]
    InvalidProject(String),

    #[error("Invalid material row {row}: {reason}")]
    InvalidMaterial { row: usize, reason: String },

    #[error("Row {0} out of range")]
    RowOutOfRange(usize),
}

pub type Result<T> = std::result::Result<T, DomainError>;

/// Kilograms to tonnes
pub fn kg_to_tonnes(kg: f64) -> f64 {
    kg / 1000.0
}
