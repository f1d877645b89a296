//! Common test utilities for client factory and registry tests

use async_trait::async_trait;
use base44::client::Result;
use base44::{
    AuthenticatedServiceClient, ClientConfiguration, ClientError, ClientFactory, ClientHandle,
    EntityRecord, ListQuery, User,
};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

/// Handle returned by the mock factory. Every remote call fails.
pub struct StubClient {
    pub application_id: String,
    pub requires_auth: bool,
}

#[async_trait]
impl AuthenticatedServiceClient for StubClient {
    fn application_id(&self) -> &str {
        &self.application_id
    }

    fn requires_auth(&self) -> bool {
        self.requires_auth
    }

    fn is_authenticated(&self) -> bool {
        false
    }

    async fn me(&self) -> Result<User> {
        Err(ClientError::Unauthorized("stub".to_string()))
    }

    async fn list_entities(&self, _: &str, _: &ListQuery) -> Result<Vec<EntityRecord>> {
        Err(ClientError::Unauthorized("stub".to_string()))
    }

    async fn get_entity(&self, _: &str, _: &str) -> Result<EntityRecord> {
        Err(ClientError::Unauthorized("stub".to_string()))
    }

    async fn create_entity(&self, _: &str, _: Value) -> Result<EntityRecord> {
        Err(ClientError::Unauthorized("stub".to_string()))
    }

    async fn update_entity(&self, _: &str, _: &str, _: Value) -> Result<EntityRecord> {
        Err(ClientError::Unauthorized("stub".to_string()))
    }

    async fn delete_entity(&self, _: &str, _: &str) -> Result<()> {
        Err(ClientError::Unauthorized("stub".to_string()))
    }
}

/// Records every configuration it is called with and hands out one stub
pub struct MockFactory {
    pub calls: Mutex<Vec<ClientConfiguration>>,
    pub stub: ClientHandle,
}

impl MockFactory {
    pub fn new(application_id: &str, requires_auth: bool) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            stub: Arc::new(StubClient {
                application_id: application_id.to_string(),
                requires_auth,
            }),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl ClientFactory for MockFactory {
    type Error = MockError;

    fn create_client(
        &self,
        config: &ClientConfiguration,
    ) -> std::result::Result<ClientHandle, MockError> {
        self.calls.lock().push(config.clone());
        Ok(Arc::clone(&self.stub))
    }
}

/// Error the failing factory returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockError {
    pub code: u32,
    pub message: String,
}

/// Always fails with the configured error
pub struct FailingFactory(pub MockError);

impl ClientFactory for FailingFactory {
    type Error = MockError;

    fn create_client(
        &self,
        _: &ClientConfiguration,
    ) -> std::result::Result<ClientHandle, MockError> {
        Err(self.0.clone())
    }
}
