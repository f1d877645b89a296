//! Client construction
//!
//! A `ClientFactory` turns a `ClientConfiguration` into a `ClientHandle`.
//! Failures are returned as the factory's own error type; nothing here
//! inspects or translates them.

use crate::client::{Base44Client, ClientError, ClientHandle};
use crate::config::ClientConfiguration;
use std::sync::Arc;
use tracing::info;

/// Builds client handles from configuration
pub trait ClientFactory {
    type Error;

    fn create_client(&self, config: &ClientConfiguration) -> Result<ClientHandle, Self::Error>;
}

/// Production factory backed by the Base44 HTTP API
#[derive(Debug, Clone, Copy, Default)]
pub struct Base44Factory;

impl ClientFactory for Base44Factory {
    type Error = ClientError;

    fn create_client(&self, config: &ClientConfiguration) -> Result<ClientHandle, ClientError> {
        let client = Base44Client::new(config.clone())?;
        info!(
            "Created Base44 client for app {} (requires_auth={}, authenticated={})",
            config.application_id(),
            config.requires_auth(),
            config.access_token().is_some()
        );
        Ok(Arc::new(client))
    }
}

/// Create a Base44 client handle
pub fn create_client(config: &ClientConfiguration) -> Result<ClientHandle, ClientError> {
    Base44Factory.create_client(config)
}
