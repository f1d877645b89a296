use super::{kg_to_tonnes, DomainError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Building sections whose materials are entered in the material table.
///
/// All sections edit the same table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    FootingsAndSlabs,
    FoundationWalls,
    StructuralElements,
}

impl Section {
    pub const ALL: [Section; 3] = [
        Section::FootingsAndSlabs,
        Section::FoundationWalls,
        Section::StructuralElements,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::FootingsAndSlabs => "Footings & Slabs",
            Section::FoundationWalls => "Foundation Walls",
            Section::StructuralElements => "Structural Elements",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One row of the material table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialEntry {
    pub material: String,
    pub category: String,
    pub quantity: f64,
    pub unit: String,
    /// Embodied emissions of the row in kg CO2e
    pub emissions_kg_co2e: f64,
}

impl MaterialEntry {
    pub fn new(
        material: impl Into<String>,
        category: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        emissions_kg_co2e: f64,
    ) -> Self {
        Self {
            material: material.into(),
            category: category.into(),
            quantity,
            unit: unit.into(),
            emissions_kg_co2e,
        }
    }

    // Negative emissions are allowed (biogenic carbon storage)
    fn validate(&self, row: usize) -> Result<()> {
        let invalid = |reason: &str| DomainError::InvalidMaterial {
            row,
            reason: reason.to_string(),
        };

        if self.material.trim().is_empty() {
            return Err(invalid("material name cannot be empty"));
        }
        if !self.quantity.is_finite() || self.quantity < 0.0 {
            return Err(invalid("quantity must be a non-negative number"));
        }
        if !self.emissions_kg_co2e.is_finite() {
            return Err(invalid("emissions must be a finite number"));
        }
        Ok(())
    }
}

/// Editable material table shared by every section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialTable {
    rows: Vec<MaterialEntry>,
}

impl MaterialTable {
    /// Table the application starts with
    pub fn with_defaults() -> Self {
        Self {
            rows: vec![
                MaterialEntry::new("Concrete", "Generic concrete, 35 MPa", 100.0, "m³", 11229.0),
                MaterialEntry::new("Steel", "Reinforcement steel", 20.0, "tonnes", 3850.0),
            ],
        }
    }

    pub fn from_rows(rows: Vec<MaterialEntry>) -> Result<Self> {
        let table = Self { rows };
        table.validate()?;
        Ok(table)
    }

    pub fn rows(&self) -> &[MaterialEntry] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn add(&mut self, entry: MaterialEntry) -> Result<()> {
        entry.validate(self.rows.len())?;
        self.rows.push(entry);
        Ok(())
    }

    pub fn remove(&mut self, row: usize) -> Result<MaterialEntry> {
        if row >= self.rows.len() {
            return Err(DomainError::RowOutOfRange(row));
        }
        Ok(self.rows.remove(row))
    }

    pub fn replace(&mut self, row: usize, entry: MaterialEntry) -> Result<()> {
        entry.validate(row)?;
        let slot = self
            .rows
            .get_mut(row)
            .ok_or(DomainError::RowOutOfRange(row))?;
        *slot = entry;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.rows
            .iter()
            .enumerate()
            .try_for_each(|(i, entry)| entry.validate(i))
    }

    pub fn total_emissions_kg(&self) -> f64 {
        self.rows.iter().map(|r| r.emissions_kg_co2e).sum()
    }

    pub fn total_emissions_tonnes(&self) -> f64 {
        kg_to_tonnes(self.total_emissions_kg())
    }

    /// Line shown after recalculating a section
    pub fn section_report(&self, section: Section) -> String {
        format!(
            "Total Emissions for {}: {:.2} t CO₂e",
            section.title(),
            self.total_emissions_tonnes()
        )
    }
}
