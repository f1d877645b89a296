use super::kg_to_tonnes;
use super::material::MaterialTable;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialSummary {
    pub material: String,
    pub emissions_kg_co2e: f64,
    pub emissions_t_co2e: f64,
}

/// Emissions grouped by material name, in ascending name order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionsSummary {
    pub rows: Vec<MaterialSummary>,
    pub total_t_co2e: f64,
}

impl EmissionsSummary {
    pub fn from_table(table: &MaterialTable) -> Self {
        let mut by_material: BTreeMap<&str, f64> = BTreeMap::new();
        for entry in table.rows() {
            *by_material.entry(entry.material.as_str()).or_default() += entry.emissions_kg_co2e;
        }

        let rows: Vec<MaterialSummary> = by_material
            .into_iter()
            .map(|(material, kg)| MaterialSummary {
                material: material.to_string(),
                emissions_kg_co2e: kg,
                emissions_t_co2e: kg_to_tonnes(kg),
            })
            .collect();

        let total_t_co2e: f64 = rows.iter().map(|r| r.emissions_t_co2e).sum();

        Self { rows, total_t_co2e }
    }

    /// Total metric, e.g. `15.1 t CO2e`
    pub fn headline(&self) -> String {
        format!("{:.1} t CO2e", self.total_t_co2e)
    }

    /// Largest emitter, if any
    pub fn dominant_material(&self) -> Option<&MaterialSummary> {
        self.rows
            .iter()
            .max_by(|a, b| a.emissions_t_co2e.total_cmp(&b.emissions_t_co2e))
    }
}
