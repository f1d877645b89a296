use super::{DomainError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BuildingType {
    #[default]
    Office,
    Residential,
    School,
    Hospital,
}

impl BuildingType {
    pub const ALL: [BuildingType; 4] = [
        BuildingType::Office,
        BuildingType::Residential,
        BuildingType::School,
        BuildingType::Hospital,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildingType::Office => "Office",
            BuildingType::Residential => "Residential",
            BuildingType::School => "School",
            BuildingType::Hospital => "Hospital",
        }
    }
}

impl fmt::Display for BuildingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BuildingType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        BuildingType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::InvalidProject(format!("unknown building type '{}'", s)))
    }
}

/// Project information form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub project_name: String,
    pub building_type: BuildingType,
    /// Gross floor area in m²
    pub floor_area_m2: f64,
    pub project_id: String,
}

impl Default for ProjectInfo {
    fn default() -> Self {
        Self {
            project_name: "Example Project".to_string(),
            building_type: BuildingType::Office,
            floor_area_m2: 5000.0,
            project_id: "AUTO123".to_string(),
        }
    }
}

impl ProjectInfo {
    pub fn validate(&self) -> Result<()> {
        if self.project_name.trim().is_empty() {
            return Err(DomainError::InvalidProject(
                "project name cannot be empty".to_string(),
            ));
        }
        if self.project_id.trim().is_empty() {
            return Err(DomainError::InvalidProject(
                "project id cannot be empty".to_string(),
            ));
        }
        if !self.floor_area_m2.is_finite() || self.floor_area_m2 < 0.0 {
            return Err(DomainError::InvalidProject(
                "floor area must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}
