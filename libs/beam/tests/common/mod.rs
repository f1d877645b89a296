//! Common test utilities for BEAM store tests

use async_trait::async_trait;
use base44::client::Result;
use base44::{AuthenticatedServiceClient, ClientError, EntityRecord, ListQuery, User};
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Entity storage kept in memory. Supports equality filters on body fields.
#[derive(Default)]
pub struct InMemoryClient {
    entities: Mutex<HashMap<String, Vec<EntityRecord>>>,
    next_id: Mutex<u64>,
    /// Creates left before every further create fails with `RateLimitExceeded`
    create_budget: Mutex<Option<usize>>,
    /// When set, every call fails with `Unauthorized`
    pub locked: bool,
}

impl InMemoryClient {
    pub fn locked() -> Self {
        Self {
            locked: true,
            ..Default::default()
        }
    }

    /// Let `n` more creates through, then reject the rest
    pub fn fail_creates_after(&self, n: usize) {
        *self.create_budget.lock() = Some(n);
    }

    pub fn count(&self, entity: &str) -> usize {
        self.entities.lock().get(entity).map_or(0, Vec::len)
    }

    fn check(&self) -> Result<()> {
        if self.locked {
            return Err(ClientError::Unauthorized("locked".to_string()));
        }
        Ok(())
    }

    fn matches(record: &EntityRecord, filter: Option<&Value>) -> bool {
        match filter.and_then(Value::as_object) {
            Some(conditions) => conditions
                .iter()
                .all(|(k, v)| record.data.get(k) == Some(v)),
            None => true,
        }
    }

    fn body(data: Value) -> Result<Map<String, Value>> {
        match data {
            Value::Object(map) => Ok(map),
            _ => Err(ClientError::InvalidArgument("body must be an object".to_string())),
        }
    }
}

#[async_trait]
impl AuthenticatedServiceClient for InMemoryClient {
    fn application_id(&self) -> &str {
        "in-memory"
    }

    fn requires_auth(&self) -> bool {
        true
    }

    fn is_authenticated(&self) -> bool {
        !self.locked
    }

    async fn me(&self) -> Result<User> {
        self.check()?;
        Ok(User {
            id: "u1".to_string(),
            email: "tester@example.com".to_string(),
            full_name: Some("Test User".to_string()),
            role: None,
            extra: Map::new(),
        })
    }

    async fn list_entities(&self, entity: &str, query: &ListQuery) -> Result<Vec<EntityRecord>> {
        self.check()?;
        let entities = self.entities.lock();
        let mut records: Vec<EntityRecord> = entities
            .get(entity)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| Self::matches(r, query.filter.as_ref()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(skip) = query.skip {
            records = records.into_iter().skip(skip).collect();
        }
        if let Some(limit) = query.limit {
            records.truncate(limit);
        }
        Ok(records)
    }

    async fn get_entity(&self, entity: &str, id: &str) -> Result<EntityRecord> {
        self.check()?;
        self.entities
            .lock()
            .get(entity)
            .and_then(|records| records.iter().find(|r| r.id == id).cloned())
            .ok_or_else(|| ClientError::NotFound(format!("{entity} {id}")))
    }

    async fn create_entity(&self, entity: &str, data: Value) -> Result<EntityRecord> {
        self.check()?;
        if let Some(left) = self.create_budget.lock().as_mut() {
            if *left == 0 {
                return Err(ClientError::RateLimitExceeded);
            }
            *left -= 1;
        }
        let body = Self::body(data)?;
        let id = {
            let mut next = self.next_id.lock();
            *next += 1;
            format!("rec{}", *next)
        };
        let record = EntityRecord::new(id, body);
        self.entities
            .lock()
            .entry(entity.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn update_entity(&self, entity: &str, id: &str, data: Value) -> Result<EntityRecord> {
        self.check()?;
        let body = Self::body(data)?;
        let mut entities = self.entities.lock();
        let record = entities
            .get_mut(entity)
            .and_then(|records| records.iter_mut().find(|r| r.id == id))
            .ok_or_else(|| ClientError::NotFound(format!("{entity} {id}")))?;
        record.data.extend(body);
        Ok(record.clone())
    }

    async fn delete_entity(&self, entity: &str, id: &str) -> Result<()> {
        self.check()?;
        let mut entities = self.entities.lock();
        let records = entities
            .get_mut(entity)
            .ok_or_else(|| ClientError::NotFound(format!("{entity} {id}")))?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(ClientError::NotFound(format!("{entity} {id}")));
        }
        Ok(())
    }
}
