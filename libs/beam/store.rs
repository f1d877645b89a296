//! Entity-backed persistence for BEAM
//!
//! Projects live in the `Project` entity, material rows in the `Material`
//! entity tagged with their `project_id`. Client errors are passed through
//! as-is.

use crate::domain::{DomainError, EmissionsSummary, MaterialEntry, MaterialTable, ProjectInfo};
use base44::{ClientError, ClientHandle, EntityRecord, ListQuery};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const PROJECT_ENTITY: &str = "Project";
pub const MATERIAL_ENTITY: &str = "Material";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Malformed {entity} record {id}: {reason}")]
    MalformedRecord {
        entity: &'static str,
        id: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Serialize, Deserialize)]
struct MaterialRecord {
    project_id: String,
    #[serde(flatten)]
    entry: MaterialEntry,
}

/// Reads and writes BEAM data through a client handle
pub struct EmissionsStore {
    client: ClientHandle,
}

impl EmissionsStore {
    pub fn new(client: ClientHandle) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ClientHandle {
        &self.client
    }

    fn by_project(project_id: &str) -> ListQuery {
        ListQuery::default().filter(json!({ "project_id": project_id }))
    }

    async fn find_project_record(&self, project_id: &str) -> Result<Option<EntityRecord>> {
        let records = self
            .client
            .list_entities(PROJECT_ENTITY, &Self::by_project(project_id).limit(1))
            .await?;
        Ok(records.into_iter().next())
    }

    /// Create or update the project with the same `project_id`
    pub async fn save_project(&self, project: &ProjectInfo) -> Result<EntityRecord> {
        project.validate()?;
        let data = serde_json::to_value(project)?;

        let record = match self.find_project_record(&project.project_id).await? {
            Some(existing) => {
                debug!("Updating project {} ({})", project.project_id, existing.id);
                self.client
                    .update_entity(PROJECT_ENTITY, &existing.id, data)
                    .await?
            }
            None => {
                debug!("Creating project {}", project.project_id);
                self.client.create_entity(PROJECT_ENTITY, data).await?
            }
        };

        info!("Project information saved: {}", project.project_name);
        Ok(record)
    }

    pub async fn load_project(&self, project_id: &str) -> Result<Option<ProjectInfo>> {
        match self.find_project_record(project_id).await? {
            Some(record) => {
                let project = record
                    .parse::<ProjectInfo>()
                    .map_err(|e| StoreError::MalformedRecord {
                        entity: PROJECT_ENTITY,
                        id: record.id.clone(),
                        reason: e.to_string(),
                    })?;
                Ok(Some(project))
            }
            None => Ok(None),
        }
    }

    /// Material table of a project, oldest row first
    pub async fn load_materials(&self, project_id: &str) -> Result<MaterialTable> {
        let query = Self::by_project(project_id).sorted_by("created_date");
        let records = self.client.list_entities(MATERIAL_ENTITY, &query).await?;

        let rows = records
            .iter()
            .map(|record| {
                record
                    .parse::<MaterialEntry>()
                    .map_err(|e| StoreError::MalformedRecord {
                        entity: MATERIAL_ENTITY,
                        id: record.id.clone(),
                        reason: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Loaded {} material rows for {}", rows.len(), project_id);
        Ok(MaterialTable::from_rows(rows)?)
    }

    /// Overwrite the stored material table of a project.
    ///
    /// New rows are written before the old ones are removed. If a create
    /// fails, the rows written so far are removed again and the stored table
    /// is left as it was.
    pub async fn replace_materials(&self, project_id: &str, table: &MaterialTable) -> Result<usize> {
        table.validate()?;

        let old_ids: Vec<String> = self
            .client
            .list_entities(MATERIAL_ENTITY, &Self::by_project(project_id))
            .await?
            .into_iter()
            .map(|record| record.id)
            .collect();

        let mut created = Vec::with_capacity(table.len());
        for entry in table.rows() {
            let data = serde_json::to_value(MaterialRecord {
                project_id: project_id.to_string(),
                entry: entry.clone(),
            })?;
            match self.client.create_entity(MATERIAL_ENTITY, data).await {
                Ok(record) => created.push(record.id),
                Err(e) => {
                    self.discard_materials(&created).await;
                    return Err(e.into());
                }
            }
        }

        for id in &old_ids {
            self.client.delete_entity(MATERIAL_ENTITY, id).await?;
        }

        info!(
            "Replaced {} material rows with {} for {}",
            old_ids.len(),
            created.len(),
            project_id
        );
        Ok(created.len())
    }

    /// Best-effort removal of rows from an aborted replace
    async fn discard_materials(&self, ids: &[String]) {
        for id in ids {
            if let Err(e) = self.client.delete_entity(MATERIAL_ENTITY, id).await {
                warn!("Failed to remove partial material row {}: {}", id, e);
            }
        }
    }

    pub async fn summary(&self, project_id: &str) -> Result<EmissionsSummary> {
        let table = self.load_materials(project_id).await?;
        Ok(EmissionsSummary::from_table(&table))
    }
}
