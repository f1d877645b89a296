//! Base44 API client
//!
//! `AuthenticatedServiceClient` is the capability interface the rest of the
//! application codes against. `Base44Client` is the HTTP implementation.

pub mod auth;
pub mod helpers;
pub mod http;
pub mod types;

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

pub use auth::{AccessToken, TokenSource};
pub use http::Base44Client;
pub use types::{EntityRecord, ListQuery, User};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Authentication required, sign in at {login_url}")]
    AuthenticationRequired { login_url: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization failed: {0}")]
    Deserialize(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Operations available through a client handle
#[async_trait]
pub trait AuthenticatedServiceClient: Send + Sync {
    fn application_id(&self) -> &str;

    /// Whether operations are refused without an access token
    fn requires_auth(&self) -> bool;

    /// Whether an access token is attached to requests
    fn is_authenticated(&self) -> bool;

    /// Currently signed-in user
    async fn me(&self) -> Result<User>;

    async fn list_entities(&self, entity: &str, query: &ListQuery) -> Result<Vec<EntityRecord>>;

    async fn get_entity(&self, entity: &str, id: &str) -> Result<EntityRecord>;

    async fn create_entity(&self, entity: &str, data: Value) -> Result<EntityRecord>;

    async fn update_entity(&self, entity: &str, id: &str, data: Value) -> Result<EntityRecord>;

    async fn delete_entity(&self, entity: &str, id: &str) -> Result<()>;
}

/// Shared handle to the process-wide client
pub type ClientHandle = Arc<dyn AuthenticatedServiceClient>;
